mod bson;
mod collection;

pub use bson::{to_api_json, Id};
pub use collection::{Coll, MongoCollection, Raw};
