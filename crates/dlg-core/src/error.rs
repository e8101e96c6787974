use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct DialogueError {
    pub code: String,
    pub message: String,
}

impl DialogueError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Import failures: malformed JSON, wrong shape, or broken invariants.
    pub fn is_parse_error(&self) -> bool {
        self.code.starts_with("PARSE_")
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn display_joins_code_and_message() {
        let error = DialogueError::new("PARSE_JSON", "expected value at line 1");
        assert_eq!(error.to_string(), "PARSE_JSON: expected value at line 1");
    }

    #[test]
    fn parse_errors_are_recognized_by_code_prefix() {
        assert!(DialogueError::new("PARSE_JSON", "x").is_parse_error());
        assert!(DialogueError::new("PARSE_INVARIANT", "x").is_parse_error());
        assert!(!DialogueError::new("IO_READ", "x").is_parse_error());
    }
}
