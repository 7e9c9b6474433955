use serde::Serialize;

/// The response envelope every endpoint uses:
/// `{success, data?, error?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Error body shared by the `IntoResponse` impls of the per-module errors.
#[must_use]
pub fn error_body(message: &str) -> serde_json::Value {
    serde_json::json!({ "success": false, "error": message })
}
