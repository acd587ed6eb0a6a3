use std::ops::Deref;

use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// A user to register. Everything besides the email is stored as the client sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    #[serde(flatten)]
    pub profile: Document,
}

impl NewUser {
    /// Filter matching any stored user with the same email.
    pub fn same_email(&self) -> Document {
        doc! { "email": &self.email }
    }
}

/// A user from the database, with its unique ID.
#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub user: NewUser,
}

impl Deref for User {
    type Target = NewUser;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}
