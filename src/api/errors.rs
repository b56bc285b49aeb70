/// Errors from the catalog API client layer.
use thiserror::Error;

/// Typed errors from the HTTP API layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed (bad TLS setup, invalid header value).
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// A user-supplied identifier cannot be used as a URL path segment.
    #[error("'{value}' is not a valid identifier")]
    InvalidIdentifier {
        /// The rejected slug or version.
        value: String,
    },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server rejected the API token.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Server-provided message, or the status line.
        message: String,
    },

    /// The requested path does not exist on the server.
    #[error("Not found on server: {path}")]
    NotFound {
        /// Request path relative to the API root.
        path: String,
    },

    /// Any other non-success status.
    #[error("API returned status {status}: {message}")]
    Status {
        /// Raw HTTP status code.
        status: u16,
        /// Server-provided message, or the status line.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Map a non-success status and its body to a typed `ApiError`.
///
/// The server usually answers errors with `{"status": N, "message": "..."}`;
/// the `message` field is used when present, the canonical reason otherwise.
#[must_use]
pub fn status_error(status: u16, path: &str, body: &str) -> ApiError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("unknown status")
                .to_owned()
        });

    match status {
        401 | 403 => ApiError::Unauthorized { message },
        404 => ApiError::NotFound {
            path: path.to_owned(),
        },
        _ => ApiError::Status { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_are_unauthorized() {
        let err = status_error(401, "/products/x", r#"{"status":401,"message":"invalid token"}"#);
        assert!(matches!(err, ApiError::Unauthorized { ref message } if message == "invalid token"));
        assert!(matches!(status_error(403, "/x", ""), ApiError::Unauthorized { .. }));
    }

    #[test]
    fn test_404_keeps_path() {
        let err = status_error(404, "/products/nope", "");
        assert!(matches!(err, ApiError::NotFound { ref path } if path == "/products/nope"));
    }

    #[test]
    fn test_other_status_falls_back_to_reason() {
        let err = status_error(502, "/user_groups", "<html>bad gateway</html>");
        assert!(matches!(
            err,
            ApiError::Status { status: 502, ref message } if message == "Bad Gateway"
        ));
    }
}
