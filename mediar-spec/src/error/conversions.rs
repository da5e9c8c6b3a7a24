//! Type conversions for `MediarError`.
//!
//! `From` implementations for foreign error types used by schema tooling.

use super::types::MediarError;

impl From<serde_json::Error> for MediarError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: MediarError = json_err.into();
        assert!(matches!(err, MediarError::JsonError(_)));
    }
}
