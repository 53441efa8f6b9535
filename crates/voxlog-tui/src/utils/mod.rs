//! Small presentation helpers shared by the TUI and the CLI modes.

pub mod format;

use voxlog_core::api::ApiError;

/// Error text for the credential form. A 401/403 during login means bad
/// credentials, not an expired session, so the generic wording is replaced.
pub fn auth_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized | ApiError::AccessDenied(_) => {
            "Invalid email or password.".to_string()
        }
        other => other.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_credentials_read_as_bad_login() {
        assert_eq!(
            auth_error_message(&ApiError::Unauthorized),
            "Invalid email or password."
        );
        assert_eq!(
            auth_error_message(&ApiError::AccessDenied("denied".to_string())),
            "Invalid email or password."
        );
    }

    #[test]
    fn other_errors_keep_their_user_message() {
        let err = ApiError::RequestFailed {
            status: 400,
            message: "Email already in use.".to_string(),
        };
        assert_eq!(auth_error_message(&err), "Email already in use.");
    }
}
