use mongodb::{
    bson::{doc, Bson},
    error::Result,
    results::UpdateResult,
};
use serde::{Deserialize, Serialize};

use crate::model::mongodb::{Coll, Id};

/// An answer sheet as submitted by a student.
///
/// Every field is stored exactly as sent, including its type. Absent fields
/// are stored as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAnswerSheet {
    pub title: Option<Bson>,
    pub answers: Option<Bson>,
    pub username: Option<Bson>,
    pub date: Option<Bson>,
    pub time: Option<Bson>,
    pub day: Option<Bson>,
}

/// The parts of a stored answer sheet that grading touches.
///
/// Answers are kept as raw BSON so that a write-back reproduces every field
/// of every answer, nulls included.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerSheet {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(default)]
    pub answers: Option<Vec<Bson>>,
}

impl AnswerSheet {
    /// Overlay `ratings[i]` onto `answers[i]`.
    ///
    /// Ratings are paired with answers by position only. Whichever of the two
    /// lists is longer has its tail ignored, as are answers that are not
    /// documents. Returns the number of answers that were rated.
    pub fn apply_ratings(&mut self, ratings: &[Bson]) -> usize {
        let Some(answers) = self.answers.as_mut() else {
            return 0;
        };
        let mut rated = 0;
        for (answer, rating) in answers.iter_mut().zip(ratings) {
            if let Bson::Document(answer) = answer {
                answer.insert("rating", rating.clone());
                rated += 1;
            }
        }
        rated
    }

    /// Write this sheet's answers back to the database, leaving the other fields alone.
    pub async fn save_answers(&self, sheets: &Coll<AnswerSheet>) -> Result<UpdateResult> {
        let answers = match &self.answers {
            Some(answers) => Bson::Array(answers.clone()),
            None => Bson::Null,
        };
        let update = doc! {
            "$set": { "answers": answers }
        };
        sheets.update_one(self.id.as_doc(), update, None).await
    }
}
