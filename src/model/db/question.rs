use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

/// A set of written questions for an exam.
///
/// The questions themselves are opaque; only their order matters here. The
/// schedule fields are stored exactly as the client sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    pub title: String,
    pub selected_questions: Vec<Bson>,
    pub date: Option<Bson>,
    pub time: Option<Bson>,
    pub day: Option<Bson>,
}
