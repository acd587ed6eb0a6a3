use std::{marker::PhantomData, ops::Deref};

use mongodb::{
    bson::{Bson, Document},
    Collection, Database,
};
use rocket::{
    request::{self, FromRequest, Request},
    serde::json::serde_json::Value,
    State,
};
use serde::{Deserialize, Serialize};

use crate::model::db::{AnswerSheet, McqResult, Motd, NewAnswerSheet, NewUser, QuestionSet, User};

use super::to_api_json;

/// A type that can be directly inserted/read to/from the database.
pub trait MongoCollection {
    /// The name of the collection.
    const NAME: &'static str;
}

/// A database collection of the given type.
pub struct Coll<T>(Collection<T>);

impl<T> Coll<T>
where
    T: MongoCollection,
{
    /// Get a handle on this collection in the given database.
    pub fn from_db(db: &Database) -> Self {
        Self(db.collection(T::NAME))
    }
}

// `Derive(Clone)` would only derive if `T: Clone`, but we don't need that bound.
impl<T> Clone for Coll<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Deref for Coll<T> {
    type Target = Collection<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r, T> FromRequest<'r> for Coll<T>
where
    T: MongoCollection,
{
    type Error = ();

    /// Get the database connection from the managed state and wrap it in a collection.
    ///
    /// Panics iff the [`Database`] is not managed by [`rocket::Rocket`].
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let db = req.guard::<&State<Database>>().await.unwrap();
        request::Outcome::Success(Coll::from_db(db))
    }
}

/// An untyped document from the same collection as `T`.
///
/// Listing endpoints return whatever is stored, even documents that no
/// longer fit `T`, so they read through this instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Raw<T> {
    document: Document,
    #[serde(skip)]
    collection: PhantomData<T>,
}

impl<T> Raw<T> {
    /// Render the document for an API response.
    pub fn into_api_json(self) -> Value {
        to_api_json(Bson::Document(self.document))
    }
}

impl<T> MongoCollection for Raw<T>
where
    T: MongoCollection,
{
    const NAME: &'static str = T::NAME;
}

// User collections
const USERS: &str = "users";
impl MongoCollection for User {
    const NAME: &'static str = USERS;
}
impl MongoCollection for NewUser {
    const NAME: &'static str = USERS;
}

// Multiple-choice results
impl MongoCollection for McqResult {
    const NAME: &'static str = "answer";
}

// Written question sets
impl MongoCollection for QuestionSet {
    const NAME: &'static str = "questionCollection";
}

// Answer sheet collections
const ANSWER_SHEETS: &str = "answerSheet";
impl MongoCollection for AnswerSheet {
    const NAME: &'static str = ANSWER_SHEETS;
}
impl MongoCollection for NewAnswerSheet {
    const NAME: &'static str = ANSWER_SHEETS;
}

// Message of the day
impl MongoCollection for Motd {
    const NAME: &'static str = "motd";
}
