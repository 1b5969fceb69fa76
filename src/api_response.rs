//! The JSON envelope every endpoint responds with.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// A JSON response body of the form `{"success": .., "message": .., "data": ..}`.
///
/// `data` is omitted for failures and for operations that have nothing to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// A short, human readable description of the outcome.
    pub message: String,
    /// The payload of a successful operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn success(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
            data: Some(data),
        }
    }

    /// A failed response with no payload.
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// A successful response with no payload.
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
