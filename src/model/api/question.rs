use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use crate::model::db::QuestionSet;

/// A question set as received from a client, before validation.
///
/// Every field accepts any JSON value so that a wrongly typed title is
/// reported as a validation failure rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSetRequest {
    pub title: Option<Bson>,
    /// Anything other than a non-empty array is rejected.
    pub selected_questions: Option<Bson>,
    pub date: Option<Bson>,
    pub time: Option<Bson>,
    pub day: Option<Bson>,
}

impl TryFrom<QuestionSetRequest> for QuestionSet {
    type Error = &'static str;

    /// Enforce a non-empty title and at least one question.
    fn try_from(request: QuestionSetRequest) -> Result<Self, Self::Error> {
        const MISSING: &str = "Title and at least one question are required";
        let title = match request.title {
            Some(Bson::String(title)) if !title.is_empty() => title,
            _ => return Err(MISSING),
        };
        let selected_questions = match request.selected_questions {
            Some(Bson::Array(questions)) if !questions.is_empty() => questions,
            _ => return Err(MISSING),
        };
        Ok(Self {
            title,
            selected_questions,
            date: request.date,
            time: request.time,
            day: request.day,
        })
    }
}
