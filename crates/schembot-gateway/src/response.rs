//! JSON response types for the command gateway.

use schembot_core::Embed;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Gateway version.
    pub version: String,
}

/// A command response, always ephemeral (visible only to the invoking user).
///
/// Exactly one of `message` and `embed` is set: plain notices for
/// rejections and failures, an embed for an accepted schematic.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// Whether the reply is visible only to the invoker.
    pub ephemeral: bool,
    /// Plain-text notice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rendered embed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<Embed>,
}

impl CommandResponse {
    /// A plain-text notice.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            ephemeral: true,
            message: Some(text.into()),
            embed: None,
        }
    }

    /// An embed reply.
    pub fn embed(embed: Embed) -> Self {
        Self {
            ephemeral: true,
            message: None,
            embed: Some(embed),
        }
    }
}
