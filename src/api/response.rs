//! API response types
//!
//! `{"status":"ok","data":...}` or `{"status":"error","code":...,"message":...}`

use serde::Serialize;
use serde_json::Value;

use super::errors::ApiError;

/// Success response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    pub status: &'static str,
    pub data: Value,
}

impl SuccessResponse {
    pub fn new(data: Value) -> Self {
        Self { status: "ok", data }
    }
}

/// Error response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    /// Create from an API error
    pub fn from_error(err: &ApiError) -> Self {
        Self {
            status: "error",
            code: err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}

/// Unified response type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl Response {
    /// Create a success response
    pub fn success(data: Value) -> Self {
        Response::Success(SuccessResponse::new(data))
    }

    /// Create an error response
    pub fn error(err: &ApiError) -> Self {
        Response::Error(ErrorResponse::from_error(err))
    }

    /// Converts to a JSON value
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        match self {
            Response::Success(r) => {
                map.insert("status".into(), Value::from(r.status));
                map.insert("data".into(), r.data.clone());
            }
            Response::Error(r) => {
                map.insert("status".into(), Value::from(r.status));
                map.insert("code".into(), Value::from(r.code.as_str()));
                map.insert("message".into(), Value::from(r.message.as_str()));
            }
        }
        Value::Object(map)
    }

    /// Converts to a single-line JSON string
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Check if this is a success response
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Error code, if this is an error response
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Error(r) => Some(&r.code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_response() {
        let resp = Response::success(json!([{"id": "register"}]));
        assert!(resp.is_success());
        assert_eq!(resp.to_json(), r#"{"status":"ok","data":[{"id":"register"}]}"#);
    }

    #[test]
    fn test_error_response() {
        let err = ApiError::invalid_request("bad facts");
        let resp = Response::error(&err);

        assert!(!resp.is_success());
        assert_eq!(resp.error_code(), Some("LEGOL_INVALID_REQUEST"));
        assert_eq!(
            resp.to_value(),
            json!({"status": "error", "code": "LEGOL_INVALID_REQUEST", "message": "bad facts"})
        );
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let resp = Response::success(json!({"nodes": [], "edges": []}));
        assert_eq!(serde_json::to_value(&resp).unwrap(), resp.to_value());
    }
}
