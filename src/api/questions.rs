use log::debug;
use rocket::{futures::TryStreamExt, serde::json::Json, Route};

use crate::{
    error::{DbResultExt, Error, Result},
    model::{
        api::{InsertResult, QuestionSetRequest},
        db::QuestionSet,
        mongodb::{Coll, Raw},
    },
};

use super::{created, Created, Documents};

pub fn routes() -> Vec<Route> {
    routes![create_question_set, get_question_sets]
}

#[post("/questions", data = "<request>")]
async fn create_question_set(
    request: Json<QuestionSetRequest>,
    question_sets: Coll<QuestionSet>,
) -> Result<Created<InsertResult>> {
    debug!("Received question set: {:?}", request.0);
    let question_set =
        QuestionSet::try_from(request.0).map_err(|e| Error::BadRequest(e.to_string()))?;

    let result = question_sets
        .insert_one(&question_set, None)
        .await
        .or_db_error("Error saving question")?;
    debug!("Question set '{}' saved", question_set.title);
    Ok(created(result.into()))
}

#[get("/questions")]
async fn get_question_sets(question_sets: Coll<Raw<QuestionSet>>) -> Result<Documents> {
    const DB_ERROR: &str = "Error fetching questions";

    let question_sets = question_sets
        .find(None, None)
        .await
        .or_db_error(DB_ERROR)?
        .try_collect::<Vec<_>>()
        .await
        .or_db_error(DB_ERROR)?;
    Ok(Json(
        question_sets.into_iter().map(Raw::into_api_json).collect(),
    ))
}
