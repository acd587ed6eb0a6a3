use mongodb::{
    bson::doc,
    error::Result,
    options::UpdateOptions,
    results::UpdateResult,
};
use serde::{Deserialize, Serialize};

use crate::model::mongodb::Coll;

/// The message of the day. The collection never holds more than one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motd {
    pub message: String,
}

impl Motd {
    /// Replace the message, creating the document if there isn't one yet.
    ///
    /// The empty filter matches the existing document, if any, so repeated
    /// calls keep updating the same one.
    pub async fn set(motds: &Coll<Motd>, message: &str) -> Result<UpdateResult> {
        let update = doc! {
            "$set": { "message": message }
        };
        let options = UpdateOptions::builder().upsert(true).build();
        motds.update_one(doc! {}, update, options).await
    }

    /// The current message, if one has ever been set.
    pub async fn get(motds: &Coll<Motd>) -> Result<Option<Motd>> {
        motds.find_one(None, None).await
    }
}
