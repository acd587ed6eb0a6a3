use rocket::{serde::json::Json, Route};

use crate::{
    error::{DbResultExt, Error, Result},
    model::{
        api::{Confirmation, Message, MotdRequest, UpdateSummary},
        db::Motd,
        mongodb::Coll,
    },
};

pub fn routes() -> Vec<Route> {
    routes![set_motd, get_motd]
}

#[post("/motd", data = "<request>")]
async fn set_motd(
    request: Json<MotdRequest>,
    motds: Coll<Motd>,
) -> Result<Json<Confirmation<UpdateSummary>>> {
    let message = request
        .message()
        .ok_or_else(|| Error::BadRequest("Message is required".to_string()))?;
    let result = Motd::set(&motds, message)
        .await
        .or_db_error("Error setting message of the day")?;
    Ok(Json(Confirmation::new(
        "Message of the day updated",
        result.into(),
    )))
}

#[get("/motd")]
async fn get_motd(motds: Coll<Motd>) -> Result<Json<Message>> {
    let motd = Motd::get(&motds)
        .await
        .or_db_error("Error fetching message of the day")?
        .ok_or_else(|| Error::NotFound("No message of the day set".to_string()))?;
    Ok(Json(Message::new(motd.message)))
}
