use rocket::{
    http::Status,
    response::status,
    serde::json::{serde_json::Value, Json},
    Catcher, Request, Route,
};

use crate::model::api::Message;

mod answers;
mod motd;
mod questions;
mod results;
mod users;

/// A JSON body sent with `201 Created`.
pub type Created<T> = status::Custom<Json<T>>;

fn created<T>(body: T) -> Created<T> {
    status::Custom(Status::Created, Json(body))
}

/// Listing endpoints hand back every stored document in this shape.
pub type Documents = Json<Vec<Value>>;

pub fn routes() -> Vec<Route> {
    let mut routes = routes![index];
    routes.extend(users::routes());
    routes.extend(results::routes());
    routes.extend(questions::routes());
    routes.extend(answers::routes());
    routes.extend(motd::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    catchers![not_found, malformed_body, default_catcher]
}

#[get("/")]
fn index() -> &'static str {
    "Template server is running"
}

#[catch(404)]
fn not_found(req: &Request<'_>) -> Json<Message> {
    Json(Message::new(format!(
        "No route for {} {}",
        req.method(),
        req.uri()
    )))
}

/// A JSON body of the wrong shape, e.g. an array where an object belongs.
/// Reported the same way as any other invalid input.
#[catch(422)]
fn malformed_body() -> status::Custom<Json<Message>> {
    status::Custom(Status::BadRequest, Json(Message::new("Malformed request body")))
}

/// Anything Rocket rejects before a handler runs, e.g. a body that isn't JSON.
#[catch(default)]
fn default_catcher(status: Status, _req: &Request<'_>) -> status::Custom<Json<Message>> {
    let reason = status.reason().unwrap_or("Unexpected error");
    status::Custom(status, Json(Message::new(reason)))
}
