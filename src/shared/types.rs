use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response: `{"error": <human message>}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of acknowledgment responses: `{"message": <human message>}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
