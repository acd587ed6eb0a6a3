use log::{debug, error};
use mongodb::error::Error as DbError;
use rocket::{
    http::Status,
    response::{status, Responder},
    serde::json::Json,
    Request,
};
use thiserror::Error;

use crate::model::api::Message;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A database operation failed. `message` is all the caller gets to see.
    #[error("{message}: {source}")]
    Db {
        message: &'static str,
        #[source]
        source: DbError,
    },
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Self::Db { .. } => Status::InternalServerError,
            Self::BadRequest(_) | Self::Conflict(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
        }
    }

    /// The text sent back in the response body.
    pub fn public_message(&self) -> &str {
        match self {
            Self::Db { message, .. } => message,
            Self::BadRequest(msg) | Self::Conflict(msg) | Self::NotFound(msg) => msg,
        }
    }
}

/// Attach the client-facing message to a failed database operation.
pub trait DbResultExt<T> {
    fn or_db_error(self, message: &'static str) -> Result<T>;
}

impl<T> DbResultExt<T> for std::result::Result<T, DbError> {
    fn or_db_error(self, message: &'static str) -> Result<T> {
        self.map_err(|source| Error::Db { message, source })
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        match self {
            Self::Db { .. } => error!("{self}"),
            _ => debug!("{self}"),
        }
        let body = Json(Message::new(self.public_message()));
        status::Custom(self.status(), body).respond_to(req)
    }
}
