use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

/// A new message of the day, as received from a client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotdRequest {
    #[serde(default)]
    pub message: Option<Bson>,
}

impl MotdRequest {
    /// The message, if it is a non-empty string.
    pub fn message(&self) -> Option<&str> {
        match &self.message {
            Some(Bson::String(message)) if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::{json, serde_json};

    use super::*;

    fn parse(body: serde_json::Value) -> MotdRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn only_text_counts_as_a_message() {
        assert_eq!(
            parse(json!({ "message": "Exams start Monday" })).message(),
            Some("Exams start Monday")
        );
        for body in [
            json!({}),
            json!({ "message": "" }),
            json!({ "message": null }),
            json!({ "message": 42 }),
            json!({ "message": ["a"] }),
        ] {
            assert_eq!(parse(body.clone()).message(), None, "{body}");
        }
    }
}
