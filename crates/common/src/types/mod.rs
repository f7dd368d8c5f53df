use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform body returned by mutating endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope {
    pub message: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl Envelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { message: message.into(), status: "OK".to_string(), timestamp: Utc::now() }
    }
}
