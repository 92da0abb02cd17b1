//! Error types and error handling
//!
//! The generators themselves are total and never fail. Every variant here is
//! raised by the boundary layer: entity validation, field spec parsing,
//! configuration loading and JSON decoding.

use thiserror::Error;

/// Scaffold error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Entity violates a structural rule (empty name, missing FK target, ...)
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    /// A name that is spliced into generated SQL or Go is not a plain identifier
    #[error("Unsafe identifier for {context}: '{value}'")]
    UnsafeIdentifier {
        /// Where the identifier was found (e.g. "table name")
        context: &'static str,
        /// The rejected value
        value: String,
    },

    /// A table or column name is a PostgreSQL reserved keyword
    #[error("Reserved SQL keyword used as {context}: '{value}'")]
    ReservedKeyword {
        /// Where the keyword was found (e.g. "table name")
        context: &'static str,
        /// The rejected value
        value: String,
    },

    /// Field name collides with a column the generators emit themselves
    #[error("Reserved field name: '{0}' is generated implicitly")]
    ReservedFieldName(String),

    /// Two fields share the same name
    #[error("Duplicate field name: '{0}'")]
    DuplicateField(String),

    /// Validation pattern contains characters that would break the struct tag
    #[error("Unsafe pattern on field '{field}': {reason}")]
    UnsafePattern {
        /// Field carrying the pattern
        field: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Index references a column the table does not have
    #[error("Index references unknown column '{column}'")]
    UnknownIndexField {
        /// The missing column
        column: String,
    },

    /// Field type is outside the supported set (strict mode only)
    #[error("Unknown field type '{field_type}' on field '{field}'. Supported types: string, int, bigint, float, bool, timestamp, date, time, uuid")]
    UnknownFieldType {
        /// Field carrying the type
        field: String,
        /// The unrecognized type name
        field_type: String,
    },

    /// Field spec string (`name:type[:modifier]*`) could not be parsed
    #[error("Invalid field spec: {0}")]
    InvalidFieldSpec(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Entity JSON could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for ScaffoldError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias for fallible boundary operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScaffoldError::UnsafeIdentifier {
            context: "table name",
            value: "users; DROP".to_string(),
        };
        assert_eq!(err.to_string(), "Unsafe identifier for table name: 'users; DROP'");

        let err = ScaffoldError::ReservedFieldName("id".to_string());
        assert_eq!(err.to_string(), "Reserved field name: 'id' is generated implicitly");

        let err = ScaffoldError::ReservedKeyword {
            context: "table name",
            value: "order".to_string(),
        };
        assert_eq!(err.to_string(), "Reserved SQL keyword used as table name: 'order'");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ScaffoldError = json_err.into();
        assert!(matches!(err, ScaffoldError::Json(_)));
    }
}
