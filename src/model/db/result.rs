use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

/// A multiple-choice result, stored exactly as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct McqResult(pub Document);
