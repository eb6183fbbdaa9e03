use thiserror::Error;

/// Top-level error type for the Concierge system.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// ConciergeError` so that the `?` operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConciergeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ConciergeError {
    fn from(err: toml::de::Error) -> Self {
        ConciergeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ConciergeError {
    fn from(err: toml::ser::Error) -> Self {
        ConciergeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ConciergeError {
    fn from(err: serde_json::Error) -> Self {
        ConciergeError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Concierge operations.
pub type Result<T> = std::result::Result<T, ConciergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConciergeError::Config("missing section".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing section");
    }

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(ConciergeError, &str)> = vec![
            (
                ConciergeError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                ConciergeError::Session("no name set".to_string()),
                "Session error: no name set",
            ),
            (
                ConciergeError::Relay("upstream down".to_string()),
                "Relay error: upstream down",
            ),
            (
                ConciergeError::Transcript("disk full".to_string()),
                "Transcript error: disk full",
            ),
            (
                ConciergeError::Api("bind failed".to_string()),
                "API error: bind failed",
            ),
            (
                ConciergeError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ConciergeError = io_err.into();
        assert!(matches!(err, ConciergeError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let parsed: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        assert!(parsed.is_err());
        let err: ConciergeError = parsed.unwrap_err().into();
        assert!(matches!(err, ConciergeError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        assert!(parsed.is_err());
        let err: ConciergeError = parsed.unwrap_err().into();
        assert!(matches!(err, ConciergeError::Serialization(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(7)
        }

        fn returns_err() -> Result<i32> {
            Err(ConciergeError::Config("fail".to_string()))
        }

        assert_eq!(returns_ok().unwrap(), 7);
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }

    #[test]
    fn test_error_debug_impl() {
        let err = ConciergeError::Relay("test debug".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Relay"));
        assert!(debug_str.contains("test debug"));
    }
}
