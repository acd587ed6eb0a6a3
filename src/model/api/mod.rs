//! API-compatible types.
//!
//! The types in this module are serialised in an API-friendly way, e.g.:
//!
//! - IDs are serialised as hex strings.
//! - Field names are camelCase where the clients expect it.

mod message;
pub use message::{Confirmation, Message};

mod motd;
pub use motd::MotdRequest;

mod question;
pub use question::QuestionSetRequest;

mod ratings;
pub use ratings::RatingsSubmission;

mod user;
pub use user::UserRegistration;

mod write;
pub use write::{InsertResult, UpdateSummary};
