use log::debug;
use rocket::{futures::TryStreamExt, serde::json::Json, Route};

use crate::{
    error::{DbResultExt, Error, Result},
    model::{
        api::{Confirmation, InsertResult, Message, RatingsSubmission},
        db::{AnswerSheet, NewAnswerSheet},
        mongodb::{Coll, Raw},
    },
};

use super::{created, Created, Documents};

pub fn routes() -> Vec<Route> {
    routes![submit_answers, get_submitted_answers, submit_ratings]
}

#[post("/submitAnswers", data = "<sheet>")]
async fn submit_answers(
    sheet: Json<NewAnswerSheet>,
    sheets: Coll<NewAnswerSheet>,
) -> Result<Created<Confirmation<InsertResult>>> {
    debug!("Received answers: {:?}", sheet.0);
    let result = sheets
        .insert_one(&sheet.0, None)
        .await
        .or_db_error("Error saving answers")?;
    Ok(created(Confirmation::new(
        "Answers submitted successfully",
        result.into(),
    )))
}

#[get("/submittedAnswers")]
async fn get_submitted_answers(sheets: Coll<Raw<AnswerSheet>>) -> Result<Documents> {
    const DB_ERROR: &str = "Error fetching submitted answers";

    let sheets = sheets
        .find(None, None)
        .await
        .or_db_error(DB_ERROR)?
        .try_collect::<Vec<_>>()
        .await
        .or_db_error(DB_ERROR)?;
    Ok(Json(sheets.into_iter().map(Raw::into_api_json).collect()))
}

#[post("/submitRatings", data = "<submission>")]
async fn submit_ratings(
    submission: Json<RatingsSubmission>,
    sheets: Coll<AnswerSheet>,
) -> Result<Created<Message>> {
    const DB_ERROR: &str = "Error submitting ratings";

    // Reject a malformed submission before touching the database.
    let sheet_id = submission.sheet_id().map_err(Error::BadRequest)?;
    let ratings = submission.ratings().map_err(Error::BadRequest)?;

    let mut sheet = sheets
        .find_one(sheet_id.as_doc(), None)
        .await
        .or_db_error(DB_ERROR)?
        .ok_or_else(|| Error::NotFound("Answer sheet not found".to_string()))?;

    let rated = sheet.apply_ratings(ratings);
    sheet.save_answers(&sheets).await.or_db_error(DB_ERROR)?;
    debug!("Rated {rated} answers on sheet {sheet_id}");

    Ok(created(Message::new("Ratings submitted successfully")))
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, oid::ObjectId, Bson};
    use rocket::{
        http::{uri::Origin, ContentType, Status},
        local::asynchronous::{Client, LocalResponse},
        serde::json::{json, serde_json::Value},
    };

    use crate::model::mongodb::Id;

    use super::*;

    async fn post_json<'c>(client: &'c Client, uri: Origin<'static>, body: Value) -> LocalResponse<'c> {
        client
            .post(uri)
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await
    }

    /// Insert the example sheet directly and return its ID.
    async fn insert_sheet(sheets: &Coll<NewAnswerSheet>) -> Id {
        sheets
            .insert_one(NewAnswerSheet::example(), None)
            .await
            .unwrap()
            .inserted_id
            .as_object_id()
            .unwrap() // Valid because the ID comes directly from the DB
            .into()
    }

    fn rating(answer: &Bson) -> Option<&Bson> {
        answer.as_document().unwrap().get("rating")
    }

    #[backend_test]
    async fn submit_and_list_answers(client: Client, sheets: Coll<AnswerSheet>) {
        let body = json!({
            "title": "Computer Fundamentals: Written",
            "answers": [
                { "content": "RAM is volatile, ROM is not." },
                { "content": "A compiler translates the whole program at once." },
            ],
            "username": "ayesha",
            "date": "2024-03-14",
            "time": "10:30",
            "day": "Thursday",
        });
        let response = post_json(&client, uri!(submit_answers), body).await;
        assert_eq!(Status::Created, response.status());
        let confirmation: Confirmation<InsertResult> = response.into_json().await.unwrap();
        assert_eq!(confirmation.message, "Answers submitted successfully");

        let id: Id = confirmation.result.inserted_id.as_str().unwrap().parse().unwrap();
        let stored = sheets.find_one(id.as_doc(), None).await.unwrap().unwrap();
        assert_eq!(stored.answers.as_ref().unwrap().len(), 2);

        let response = client.get(uri!(get_submitted_answers)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        let listed: Vec<Value> = response.into_json().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["_id"], json!(id.to_hex()));
        assert_eq!(listed[0]["username"], json!("ayesha"));
        assert_eq!(
            listed[0]["answers"][0]["content"],
            json!("RAM is volatile, ROM is not.")
        );
    }

    #[backend_test]
    async fn answers_stored_as_sent(client: Client) {
        let body = json!({
            "title": 101,
            "answers": ["plain text answer", { "content": "An object answer" }],
            "username": "rafi",
        });
        let response = post_json(&client, uri!(submit_answers), body).await;
        assert_eq!(Status::Created, response.status());

        let response = client.get(uri!(get_submitted_answers)).dispatch().await;
        let listed: Vec<Value> = response.into_json().await.unwrap();
        assert_eq!(listed[0]["title"], json!(101));
        assert_eq!(
            listed[0]["answers"],
            json!(["plain text answer", { "content": "An object answer" }])
        );
        assert_eq!(listed[0]["date"], Value::Null);
    }

    #[backend_test]
    async fn partial_ratings(
        client: Client,
        new_sheets: Coll<NewAnswerSheet>,
        sheets: Coll<AnswerSheet>,
    ) {
        let id = insert_sheet(&new_sheets).await;

        let body = json!({ "answerSheetId": id.to_hex(), "ratings": [4, 5] });
        let response = post_json(&client, uri!(submit_ratings), body).await;
        assert_eq!(Status::Created, response.status());
        let message: Message = response.into_json().await.unwrap();
        assert_eq!(message.message, "Ratings submitted successfully");

        let stored = sheets.find_one(id.as_doc(), None).await.unwrap().unwrap();
        let answers = stored.answers.as_ref().unwrap();
        assert_eq!(answers.len(), 3);
        assert!(rating(&answers[0]).is_some());
        assert!(rating(&answers[1]).is_some());
        assert_eq!(rating(&answers[2]), None);

        // Everything else is as submitted.
        let raw = new_sheets.find_one(id.as_doc(), None).await.unwrap().unwrap();
        let expected = NewAnswerSheet::example();
        assert_eq!(raw.title, expected.title);
        assert_eq!(raw.username, expected.username);
        let contents: Vec<_> = answers
            .iter()
            .map(|answer| answer.as_document().unwrap().get("content").cloned())
            .collect();
        let expected_contents: Vec<_> = expected
            .answers
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|answer| answer.as_document().unwrap().get("content").cloned())
            .collect();
        assert_eq!(contents, expected_contents);
    }

    #[backend_test]
    async fn unrated_answers_untouched(
        client: Client,
        new_sheets: Coll<NewAnswerSheet>,
        sheets: Coll<AnswerSheet>,
    ) {
        let sheet = NewAnswerSheet {
            answers: Some(Bson::Array(vec![
                Bson::Document(doc! { "content": "First" }),
                Bson::Document(doc! { "content": "Second", "rating": null }),
            ])),
            ..NewAnswerSheet::example()
        };
        let id: Id = new_sheets
            .insert_one(sheet, None)
            .await
            .unwrap()
            .inserted_id
            .as_object_id()
            .unwrap()
            .into();

        let body = json!({ "answerSheetId": id.to_hex(), "ratings": [3] });
        let response = post_json(&client, uri!(submit_ratings), body).await;
        assert_eq!(Status::Created, response.status());

        let stored = sheets.find_one(id.as_doc(), None).await.unwrap().unwrap();
        assert_eq!(
            stored.answers.unwrap(),
            vec![
                Bson::Document(doc! { "content": "First", "rating": 3 }),
                Bson::Document(doc! { "content": "Second", "rating": null }),
            ]
        );
    }

    #[backend_test]
    async fn extra_ratings_ignored(
        client: Client,
        new_sheets: Coll<NewAnswerSheet>,
        sheets: Coll<AnswerSheet>,
    ) {
        let id = insert_sheet(&new_sheets).await;

        let body = json!({ "answerSheetId": id.to_hex(), "ratings": ["A", "B", "C", "D", "E"] });
        let response = post_json(&client, uri!(submit_ratings), body).await;
        assert_eq!(Status::Created, response.status());

        let stored = sheets.find_one(id.as_doc(), None).await.unwrap().unwrap();
        let ratings: Vec<_> = stored.answers.as_ref().unwrap().iter().map(rating).collect();
        assert_eq!(
            ratings,
            vec![
                Some(&Bson::String("A".into())),
                Some(&Bson::String("B".into())),
                Some(&Bson::String("C".into())),
            ]
        );
    }

    #[rocket::async_test]
    async fn malformed_sheet_id_rejected_before_storage() {
        let client = Client::tracked(crate::offline_rocket().await).await.unwrap();
        let cases = [
            (json!("12345"), "Invalid ObjectId: 12345"),
            (json!(""), "Invalid ObjectId: "),
            (json!("not-an-object-id-at-all!"), "Invalid ObjectId: not-an-object-id-at-all!"),
            (json!(12345), "Invalid ObjectId: 12345"),
            (json!(true), "Invalid ObjectId: true"),
        ];
        for (id, expected) in cases {
            let body = json!({ "answerSheetId": id, "ratings": [1] });
            let response = post_json(&client, uri!(submit_ratings), body).await;
            assert_eq!(Status::BadRequest, response.status(), "{id}");
            let message: Message = response.into_json().await.unwrap();
            assert_eq!(message.message, expected);
        }

        let response = post_json(&client, uri!(submit_ratings), json!({ "ratings": [1] })).await;
        assert_eq!(Status::BadRequest, response.status());
    }

    #[rocket::async_test]
    async fn ratings_must_be_an_array() {
        let client = Client::tracked(crate::offline_rocket().await).await.unwrap();
        let body = json!({ "answerSheetId": ObjectId::new().to_hex(), "ratings": 5 });
        let response = post_json(&client, uri!(submit_ratings), body).await;
        assert_eq!(Status::BadRequest, response.status());
        let message: Message = response.into_json().await.unwrap();
        assert_eq!(message.message, "Ratings must be an array");
    }

    #[rocket::async_test]
    async fn unreachable_store_is_a_server_error() {
        let client = Client::tracked(crate::offline_rocket().await).await.unwrap();
        let body = json!({ "answerSheetId": ObjectId::new().to_hex(), "ratings": [1] });
        let response = post_json(&client, uri!(submit_ratings), body).await;
        assert_eq!(Status::InternalServerError, response.status());
        let message: Message = response.into_json().await.unwrap();
        assert_eq!(message.message, "Error submitting ratings");
    }

    #[backend_test]
    async fn missing_sheet(client: Client, new_sheets: Coll<NewAnswerSheet>) {
        insert_sheet(&new_sheets).await;

        let body = json!({ "answerSheetId": ObjectId::new().to_hex(), "ratings": [1] });
        let response = post_json(&client, uri!(submit_ratings), body).await;
        assert_eq!(Status::NotFound, response.status());
        let message: Message = response.into_json().await.unwrap();
        assert_eq!(message.message, "Answer sheet not found");
    }
}
