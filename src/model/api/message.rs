use serde::{Deserialize, Serialize};

/// A free-text message, used both for confirmations and for errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A confirmation message together with the raw outcome of the write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation<T> {
    pub message: String,
    pub result: T,
}

impl<T> Confirmation<T> {
    pub fn new(message: impl Into<String>, result: T) -> Self {
        Self {
            message: message.into(),
            result,
        }
    }
}
