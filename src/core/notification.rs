use serde::{Deserialize, Serialize};

use crate::core::{ConfigMessage, DataResult};

/// Control message from the host.
#[derive(Deserialize)]
#[serde(tag = "notification", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Inbound {
    Config(ConfigMessage),
}

/// Message to the display consumer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "notification", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Notification {
    /// Latest snapshot of both categories.
    DataResult(DataResult),

    /// New error, never the same text twice in a row.
    ApiError { message: String },

    /// The category that raised the standing error has succeeded again.
    ApiErrorCleared,
}
