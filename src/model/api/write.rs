use mongodb::results::{InsertOneResult, UpdateResult};
use rocket::serde::json::serde_json::Value;
use serde::{Deserialize, Serialize};

use crate::model::mongodb::to_api_json;

/// The outcome of inserting a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

impl From<InsertOneResult> for InsertResult {
    fn from(result: InsertOneResult) -> Self {
        Self {
            acknowledged: true,
            inserted_id: to_api_json(result.inserted_id),
        }
    }
}

/// The outcome of updating (or upserting) a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Value>,
}

impl From<UpdateResult> for UpdateSummary {
    fn from(result: UpdateResult) -> Self {
        let upserted_id = result.upserted_id.map(to_api_json);
        Self {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

