#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod cors;
pub mod error;
pub mod logging;
pub mod model;

use config::DatabaseFairing;
use cors::CorsFairing;
use logging::LoggerFairing;

/// Build the server. The database connection is made during ignition.
pub fn build() -> Rocket<Build> {
    mount(rocket::custom(config::figment())).attach(DatabaseFairing)
}

/// Attach everything except the database.
fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", api::routes())
        .mount("/", cors::routes())
        .register("/", api::catchers())
        .attach(LoggerFairing)
        .attach(CorsFairing)
}

/// Connection string for the test database, if one is configured.
#[cfg(test)]
fn test_db_uri() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var("DB_URI").ok()
}

#[cfg(test)]
async fn db_client(db_uri: &str) -> mongodb::Client {
    config::connect(db_uri).await.unwrap()
}

/// Get the name of the database to use for a test.
/// Use a random name to avoid collisions between tests.
#[cfg(test)]
fn database() -> String {
    let random: u32 = rand::random();
    format!("test{random}")
}

/// Build a server around an existing database connection.
#[cfg(test)]
fn rocket_for_db(db_client: mongodb::Client, db_name: &str) -> Rocket<Build> {
    let db = db_client.database(db_name);
    mount(rocket::custom(config::figment()))
        .manage(db_client)
        .manage(db)
}

/// Build a server whose database cannot be reached.
///
/// Requests that are turned away before touching the store behave normally;
/// anything that does reach the store fails quickly with a 500.
#[cfg(test)]
async fn offline_rocket() -> Rocket<Build> {
    let mut options = mongodb::options::ClientOptions::parse("mongodb://127.0.0.1:1")
        .await
        .unwrap();
    options.server_selection_timeout = Some(std::time::Duration::from_millis(200));
    let db_client = mongodb::Client::with_options(options).unwrap();
    rocket_for_db(db_client, &database())
}
