//! Data model: stored documents, API request/response shapes, and the
//! MongoDB plumbing that binds them together.

pub mod api;
pub mod db;
pub mod mongodb;
