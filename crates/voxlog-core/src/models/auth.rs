use serde::{Deserialize, Serialize};

/// Request body for both `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Response body of the auth endpoints.
///
/// The canonical token field is `token`. Older backend builds issued the
/// same value under `jwt`; that spelling is tolerated on input only and
/// never produced.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    #[serde(default, alias = "jwt")]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthPayload {
    /// The issued token, if the backend sent one under either spelling.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_token_field() {
        let payload: AuthPayload =
            serde_json::from_str(r#"{"token":"abc123","message":"Login successful"}"#).unwrap();
        assert_eq!(payload.token(), Some("abc123"));
        assert_eq!(payload.message.as_deref(), Some("Login successful"));
    }

    #[test]
    fn tolerates_deprecated_jwt_field() {
        let payload: AuthPayload = serde_json::from_str(r#"{"jwt":"abc123"}"#).unwrap();
        assert_eq!(payload.token(), Some("abc123"));
    }

    #[test]
    fn reports_missing_token() {
        let payload: AuthPayload =
            serde_json::from_str(r#"{"token":null,"message":"Email already in use."}"#).unwrap();
        assert_eq!(payload.token(), None);
        assert_eq!(payload.message.as_deref(), Some("Email already in use."));
    }
}
