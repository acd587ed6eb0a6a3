//! DB-compatible (e.g. de/serialisable) types.
//!
//! The types in this module are serialised in a DB-friendly way, e.g.:
//!
//! - IDs are serialised in MongoDB's own format.
//! - Free-form payloads are kept as BSON documents.

mod answer_sheet;
pub use answer_sheet::{AnswerSheet, NewAnswerSheet};

mod motd;
pub use motd::Motd;

mod question;
pub use question::QuestionSet;

mod result;
pub use result::McqResult;

mod user;
pub use user::{NewUser, User};
