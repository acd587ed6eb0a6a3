use std::{
    fmt::{Display, Formatter},
    ops::Deref,
    str::FromStr,
};

use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use rocket::serde::json::serde_json::{Map, Value};
use serde::{Deserialize, Serialize};

/// A document ID as MongoDB stores it.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id(ObjectId);

impl Id {
    /// A filter document matching exactly this ID.
    pub fn as_doc(&self) -> Document {
        doc! { "_id": self.0 }
    }
}

impl Deref for Id {
    type Target = ObjectId;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Only 24-character hex strings are accepted.
impl FromStr for Id {
    type Err = mongodb::bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse::<ObjectId>()?))
    }
}

impl From<ObjectId> for Id {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

/// Render a BSON value the way API clients expect: ObjectIds become hex
/// strings, datetimes become RFC 3339 strings, and everything else is relaxed
/// extended JSON.
pub fn to_api_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(datetime) => match datetime.try_to_rfc3339_string() {
            Ok(formatted) => Value::String(formatted),
            Err(_) => Bson::DateTime(datetime).into_relaxed_extjson(),
        },
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, to_api_json(value)))
                .collect::<Map<_, _>>(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(to_api_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
