//! Error types for `cupreg-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. Expected negative
//! outcomes (a password mismatch, a rate-limit rejection) are ordinary
//! return values, never errors; only genuine faults land here.

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or map the condition to an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No administrator secret is configured for this deployment.
    ///
    /// A distinct condition from a mismatch: an operator misconfiguration
    /// must not be reported as (or counted against) a user's wrong guess.
    #[error("administrator secret is not configured")]
    AdminSecretMissing,

    /// A new password failed the acceptability policy.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The hashing primitive itself failed (malformed stored hash, cost
    /// parameter out of range).
    #[error("hash error: {0}")]
    Hash(String),

    /// The backing account store could not be queried.
    #[error("store error: {0}")]
    Store(String),

    /// A team with this email is already registered.
    #[error("email already registered: {0}")]
    EmailTaken(String),
}

/// Convenience alias used throughout `cupreg-core`.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_secret_missing_displays_message() {
        let err = CoreError::AdminSecretMissing;
        assert_eq!(err.to_string(), "administrator secret is not configured");
    }

    #[test]
    fn weak_password_displays_reason() {
        let err = CoreError::WeakPassword("password must contain a digit".to_string());
        assert_eq!(
            err.to_string(),
            "weak password: password must contain a digit"
        );
    }

    #[test]
    fn hash_error_displays_message() {
        let err = CoreError::Hash("invalid cost".to_string());
        assert_eq!(err.to_string(), "hash error: invalid cost");
    }

    #[test]
    fn store_error_displays_message() {
        let err = CoreError::Store("connection refused".to_string());
        assert_eq!(err.to_string(), "store error: connection refused");
    }

    #[test]
    fn email_taken_displays_email() {
        let err = CoreError::EmailTaken("captain@example.com".to_string());
        assert_eq!(
            err.to_string(),
            "email already registered: captain@example.com"
        );
    }

    #[test]
    fn core_result_ok() {
        let result: CoreResult<i32> = Ok(42);
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn error_is_debug() {
        let err = CoreError::AdminSecretMissing;
        let debug = format!("{:?}", err);
        assert!(debug.contains("AdminSecretMissing"));
    }
}
