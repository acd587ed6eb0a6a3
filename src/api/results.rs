use mongodb::bson::Document;
use rocket::{futures::TryStreamExt, serde::json::Json, Route};

use crate::{
    error::{DbResultExt, Result},
    model::{
        api::InsertResult,
        db::McqResult,
        mongodb::{Coll, Raw},
    },
};

use super::{created, Created, Documents};

pub fn routes() -> Vec<Route> {
    routes![record_result, get_results]
}

#[post("/result", data = "<result>")]
async fn record_result(
    result: Json<Document>,
    results: Coll<McqResult>,
) -> Result<Created<InsertResult>> {
    let inserted = results
        .insert_one(McqResult(result.0), None)
        .await
        .or_db_error("Error saving result")?;
    Ok(created(inserted.into()))
}

#[get("/result")]
async fn get_results(results: Coll<Raw<McqResult>>) -> Result<Documents> {
    const DB_ERROR: &str = "Error fetching results";

    let results = results
        .find(None, None)
        .await
        .or_db_error(DB_ERROR)?
        .try_collect::<Vec<_>>()
        .await
        .or_db_error(DB_ERROR)?;
    Ok(Json(results.into_iter().map(Raw::into_api_json).collect()))
}
