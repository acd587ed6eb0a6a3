use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::model::db::NewUser;

/// Registration data as received from a client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserRegistration {
    /// Any JSON value, so that a non-string email is a validation failure.
    #[serde(default)]
    pub email: Option<Bson>,
    #[serde(flatten)]
    pub profile: Document,
}

impl TryFrom<UserRegistration> for NewUser {
    type Error = &'static str;

    /// The email is the only field we insist on, since it identifies the user.
    fn try_from(registration: UserRegistration) -> Result<Self, Self::Error> {
        match registration.email {
            Some(Bson::String(email)) if !email.is_empty() => Ok(Self {
                email,
                profile: registration.profile,
            }),
            _ => Err("Email is required"),
        }
    }
}
