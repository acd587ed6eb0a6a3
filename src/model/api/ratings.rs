use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Ratings for the answers on one sheet, in answer order.
///
/// Both fields accept any JSON value, so that a malformed submission is
/// reported by [`RatingsSubmission::sheet_id`] and [`RatingsSubmission::ratings`]
/// rather than rejected by the JSON parser.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingsSubmission {
    #[serde(default)]
    pub answer_sheet_id: Option<Bson>,
    #[serde(default)]
    pub ratings: Option<Bson>,
}

impl RatingsSubmission {
    /// The answer sheet ID, which must be a 24-digit hex string.
    pub fn sheet_id(&self) -> Result<Id, String> {
        match &self.answer_sheet_id {
            Some(Bson::String(id)) => id
                .parse()
                .map_err(|_| format!("Invalid ObjectId: {id}")),
            Some(other) => Err(format!("Invalid ObjectId: {other}")),
            None => Err("Invalid ObjectId: ".to_string()),
        }
    }

    /// The ratings, in answer order. Missing or null means no ratings.
    pub fn ratings(&self) -> Result<&[Bson], String> {
        match &self.ratings {
            Some(Bson::Array(ratings)) => Ok(ratings),
            None | Some(Bson::Null) => Ok(&[]),
            Some(_) => Err("Ratings must be an array".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::{json, serde_json};

    use super::*;

    fn parse(body: serde_json::Value) -> RatingsSubmission {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn parse_submission() {
        let submission = parse(json!({
            "answerSheetId": "65f1a2b3c4d5e6f708192a3b",
            "ratings": [4, 3.5, "A"],
        }));
        assert_eq!(
            submission.sheet_id().unwrap().to_hex(),
            "65f1a2b3c4d5e6f708192a3b"
        );
        let ratings = submission.ratings().unwrap();
        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings[1], Bson::Double(3.5));
        assert_eq!(ratings[2], Bson::String("A".into()));
    }

    #[test]
    fn malformed_id() {
        let submission = parse(json!({ "answerSheetId": "12345", "ratings": [1] }));
        assert_eq!(
            submission.sheet_id().unwrap_err(),
            "Invalid ObjectId: 12345"
        );
    }

    #[test]
    fn id_of_the_wrong_type() {
        for id in [json!(12345), json!(true), json!(["65f1a2b3c4d5e6f708192a3b"]), json!(null)] {
            let submission = parse(json!({ "answerSheetId": id, "ratings": [1] }));
            let err = submission.sheet_id().unwrap_err();
            assert!(err.starts_with("Invalid ObjectId: "), "{err}");
        }
        let submission = parse(json!({ "answerSheetId": 12345 }));
        assert_eq!(submission.sheet_id().unwrap_err(), "Invalid ObjectId: 12345");
    }

    #[test]
    fn ratings_must_be_an_array() {
        for ratings in [json!(5), json!("5"), json!({ "0": 5 })] {
            let submission = parse(json!({ "ratings": ratings }));
            assert_eq!(submission.ratings().unwrap_err(), "Ratings must be an array");
        }
    }

    #[test]
    fn missing_fields_default() {
        let submission = parse(json!({}));
        assert!(submission.ratings().unwrap().is_empty());
        assert_eq!(submission.sheet_id().unwrap_err(), "Invalid ObjectId: ");
        let submission = parse(json!({ "ratings": null }));
        assert!(submission.ratings().unwrap().is_empty());
    }
}
