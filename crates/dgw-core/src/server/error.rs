//! JSON error responses for the HTTP surface.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::allow_list::AllowList;
use crate::resolver::ResolveError;

/// Seconds clients are told to wait after an unreachable upstream.
const RETRY_AFTER_SECS: u64 = 30;

/// Machine-readable error returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_types: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
    retry_after: Option<u64>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: &str) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.to_string(),
                code,
                valid_types: None,
            },
            retry_after: None,
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", "Not found")
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "Internal server error",
        )
    }

    /// Maps a resolution failure; internal detail never reaches the body.
    pub fn from_resolve(err: &ResolveError, allow_list: &AllowList) -> Self {
        match err {
            ResolveError::InvalidType { .. } => {
                let mut e = Self::new(StatusCode::NOT_FOUND, "invalid_type", "Invalid dialog type");
                e.body.valid_types = Some(allow_list.to_vec());
                e
            }
            ResolveError::UpstreamMissing { .. } => Self::new(
                StatusCode::NOT_FOUND,
                "not_found",
                "ZIP file not found upstream",
            ),
            ResolveError::UpstreamUnreachable { .. } => {
                let mut e = Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "upstream_unreachable",
                    "Failed to connect to upstream, retry later",
                );
                e.retry_after = Some(RETRY_AFTER_SECS);
                e
            }
            ResolveError::Internal(_) => Self::internal(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut resp = (self.status, Json(self.body)).into_response();
        if let Some(secs) = self.retry_after {
            resp.headers_mut()
                .insert(header::RETRY_AFTER, header::HeaderValue::from(secs));
        }
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{FailureKind, ProbeError};

    fn allow() -> AllowList {
        AllowList::new(["simpleDialog", "iosDialog"]).unwrap()
    }

    #[test]
    fn invalid_type_lists_valid_types() {
        let err = ResolveError::InvalidType {
            dialog_type: "x".to_string(),
        };
        let api = ApiError::from_resolve(&err, &allow());
        assert_eq!(api.status(), StatusCode::NOT_FOUND);
        assert_eq!(api.body.code, "invalid_type");
        assert_eq!(
            api.body.valid_types,
            Some(vec!["iosDialog".to_string(), "simpleDialog".to_string()])
        );
    }

    #[test]
    fn unreachable_is_503_with_retry_after() {
        let err = ResolveError::UpstreamUnreachable {
            url: "https://example.com/a.zip".to_string(),
            source: ProbeError::new(FailureKind::Timeout, "timed out"),
        };
        let resp = ApiError::from_resolve(&err, &allow()).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(resp.headers().get(header::RETRY_AFTER).unwrap(), "30");
    }

    #[test]
    fn internal_detail_is_hidden() {
        let err = ResolveError::Internal("secret stack detail".to_string());
        let api = ApiError::from_resolve(&err, &allow());
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.body.error.contains("secret"));
        assert!(api.body.valid_types.is_none());
    }
}
