//! Remote API access.
//!
//! [`Transport`] is the seam between the client and the network: the HTTP
//! implementation lives in [`http`], tests plug in scripted transports.
//! [`DeltaApi`] layers typed endpoint calls on top of any transport.

pub mod client;
pub mod http;
pub mod types;

pub use client::DeltaApi;
pub use http::HttpTransport;
pub use types::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Raw answer from the service: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 409, which registration uses for "already exists".
    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }

    /// Decode the body, failing on malformed JSON.
    pub fn json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::InvalidResponse {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// Decode the body if there is a usable one. Empty, `null` and
    /// malformed bodies all yield `None`.
    pub fn json_opt<T: DeserializeOwned>(&self) -> Option<T> {
        if self.body.trim().is_empty() {
            return None;
        }
        serde_json::from_str::<Option<T>>(&self.body).ok().flatten()
    }

    /// Turn a non-2xx answer into [`ApiError::Status`].
    pub fn error_for_status(self, path: &str) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                path: path.to_string(),
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Moves JSON requests to the service. Paths are relative to the API base.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError>;

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_conflict() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(201, "").is_success());
        assert!(!ApiResponse::new(409, "").is_success());
        assert!(ApiResponse::new(409, "").is_conflict());
        assert!(!ApiResponse::new(500, "").is_conflict());
    }

    #[test]
    fn json_opt_handles_empty_and_null() {
        let empty = ApiResponse::new(409, "");
        assert!(empty.json_opt::<UserEnvelope>().is_none());

        let null = ApiResponse::new(200, "null");
        assert!(null.json_opt::<UserEnvelope>().is_none());

        let garbage = ApiResponse::new(200, "<html>");
        assert!(garbage.json_opt::<UserEnvelope>().is_none());

        let ok = ApiResponse::new(200, r#"{"user": {"id": 7}}"#);
        let env = ok.json_opt::<UserEnvelope>().unwrap();
        assert_eq!(env.user_id(), Some(Id::Numeric(7)));
    }

    #[test]
    fn json_reports_invalid_body() {
        let resp = ApiResponse::new(200, "not json");
        let err = resp.json::<TasksResponse>("/progress/1/tasks").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { ref path, .. } if path == "/progress/1/tasks"));
    }

    #[test]
    fn error_for_status_keeps_body() {
        let err = ApiResponse::new(500, "boom")
            .error_for_status("/users/onboard")
            .unwrap_err();
        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
