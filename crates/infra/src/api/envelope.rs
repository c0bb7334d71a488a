//! Response envelope
//!
//! Every API response body has the shape
//! `{"success": bool, "data"?: T, "message"?: string}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::errors::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Payload of a successful envelope, `None` when it carried no data.
    ///
    /// # Errors
    /// Returns `ApiError::Rejected` with the server message when
    /// `success` is false.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "request was not successful".to_string()),
            ))
        }
    }
}

/// Decode the `data` member of an untyped payload.
pub(crate) fn decode_data<T: DeserializeOwned>(
    data: Option<serde_json::Value>,
    what: &str,
) -> Result<T, ApiError> {
    let value = data.ok_or_else(|| ApiError::Decode(format!("{what}: response has no data")))?;
    serde_json::from_value(value).map_err(|e| ApiError::Decode(format!("{what}: {e}")))
}
