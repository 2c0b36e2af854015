use thiserror::Error;

/// Unified error type for git-version-guard setup faults.
///
/// Validation failures are not errors: they are reported as
/// [`Verdict::Invalid`](crate::domain::Verdict::Invalid).
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: rule '{rule}' has an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-version-guard
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GuardError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GuardError::Version(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        GuardError::Manifest(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GuardError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GuardError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_invalid_pattern_names_rule_and_pattern() {
        let source = regex::Regex::new("release/(").unwrap_err();
        let err = GuardError::InvalidPattern {
            rule: "release".to_string(),
            pattern: "release/(".to_string(),
            source,
        };

        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error"));
        assert!(msg.contains("'release'"));
        assert!(msg.contains("'release/('"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GuardError::config("x"), "Configuration error"),
            (GuardError::version("x"), "Version parsing error"),
            (GuardError::manifest("x"), "Manifest error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
