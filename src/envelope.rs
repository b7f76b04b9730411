//! Uniform API envelope shared with the remote rifa backend.
//!
//! Every JSON endpoint — the remote backend's and this service's own —
//! answers `{ success, errorMessage?, data? }`. Keeping one envelope type on
//! both sides means the console frontend reads local and relayed responses
//! identically.

use serde::{Deserialize, Serialize};

/// Envelope carried by every JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResult<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable failure reason when `success` is false.
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Payload when `success` is true. Some successful operations carry none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResult<T> {
    /// Successful envelope wrapping `data`.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self { success: true, error_message: None, data: Some(data) }
    }

    /// Failed envelope with a user-visible message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, error_message: Some(message.into()), data: None }
    }

    /// Unwrap into the payload, turning `success: false` into its message.
    ///
    /// # Errors
    ///
    /// Returns the envelope's `errorMessage` (or a placeholder when the
    /// backend omitted one) if the envelope reports failure.
    pub fn into_data(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .error_message
                .unwrap_or_else(|| "unspecified backend error".to_owned()))
        }
    }
}
