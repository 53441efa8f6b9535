use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token missing or rejected")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Maximum length for raw response bodies carried inside error messages
const MAX_ERROR_BODY_LENGTH: usize = 300;

impl ApiError {
    /// Classify a non-success response. The backend reports failures as
    /// `{"message": "..."}`; when that field is present it becomes the error
    /// text, otherwise a truncated body snippet does.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::message_from_body(body)
            .unwrap_or_else(|| Self::truncate_body(body));
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::RequestFailed {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Extract the backend's `message` field from an error body, if any.
    fn message_from_body(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from)
    }

    /// Truncate a response body so errors stay loggable.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... ({} total bytes)", cut, body.len())
        }
    }

    /// A short message fit for inline display next to the action that
    /// failed. Pages render this; errors never escalate past the page.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Session expired. Please log in again.".to_string(),
            ApiError::AccessDenied(_) => "You do not have access to this resource.".to_string(),
            ApiError::NotFound(_) => "The requested resource was not found.".to_string(),
            ApiError::ServerError(_) => {
                "The server hit an error. Please try again later.".to_string()
            }
            ApiError::RequestFailed { message, .. } if !message.is_empty() => message.clone(),
            ApiError::RequestFailed { status, .. } => {
                format!("Request failed (status {}).", status)
            }
            ApiError::Network(e) if e.is_timeout() => {
                "Connection timed out. Please try again.".to_string()
            }
            ApiError::Network(e) if e.is_connect() => {
                "Unable to connect to the server. Check your internet connection.".to_string()
            }
            ApiError::Network(_) => "Network error. Check your connection.".to_string(),
            ApiError::InvalidResponse(_) => "Unexpected response from the server.".to_string(),
            ApiError::InvalidInput(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn maps_auth_statuses() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "nope"),
            ApiError::AccessDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, ""),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, ""),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, ""),
            ApiError::RequestFailed { status: 400, .. }
        ));
    }

    #[test]
    fn prefers_message_field_over_raw_body() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"token":null,"message":"Email already in use."}"#,
        );
        match err {
            ApiError::RequestFailed { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Email already in use.");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_truncated_body() {
        let body = "x".repeat(400);
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, &body);
        match err {
            ApiError::ServerError(message) => {
                assert!(message.len() < body.len());
                assert!(message.contains("total bytes"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn user_message_surfaces_backend_text() {
        let err = ApiError::RequestFailed {
            status: 400,
            message: "Email already in use.".to_string(),
        };
        assert_eq!(err.user_message(), "Email already in use.");
    }
}
