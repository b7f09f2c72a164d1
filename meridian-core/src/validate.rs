//! Validation error types shared by providers
//!
//! Providers validate user-supplied attribute values (identifiers, names,
//! enum values) before any API call is made. Validation is statically typed:
//! the binding layer hands the provider a `&str`, never a dynamic value.

/// Validation error, pointing at the attribute that failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Attribute path within the resource (e.g., "id", "scope")
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for validation
pub type ValidationResult = Result<(), ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_and_message() {
        let err = ValidationError::new("id", "missing segment");
        assert_eq!(err.to_string(), "id: missing segment");
    }
}
