//! Field type definitions and type-mapping tables
//!
//! Every logical field type maps to a SQL column type and to a Go host type.
//! Both mappings are total: an unrecognized type is carried as
//! [`FieldType::Unknown`] and falls back to `UUID` / `interface{}`.
//!
//! # Supported Field Types
//!
//! | type        | SQL         | Go          |
//! |-------------|-------------|-------------|
//! | `string`    | `TEXT`      | `string`    |
//! | `int`       | `INTEGER`   | `int32`     |
//! | `bigint`    | `BIGINT`    | `int64`     |
//! | `float`     | `DECIMAL`   | `float64`   |
//! | `bool`      | `BOOLEAN`   | `bool`      |
//! | `timestamp` | `TIMESTAMP` | `time.Time` |
//! | `date`      | `DATE`      | `time.Time` |
//! | `time`      | `TIME`      | `time.Time` |
//! | `uuid`      | `UUID`      | `uuid.UUID` |
//! | other       | `UUID`      | `interface{}` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Go import path for `time.Time`
pub const TIME_IMPORT: &str = "time";

/// Go import path for `uuid.UUID`
pub const UUID_IMPORT: &str = "github.com/google/uuid";

/// Field type enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Text of any length
    String,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    BigInt,
    /// Floating point / decimal number
    Float,
    /// Boolean
    Bool,
    /// Point in time
    Timestamp,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// UUID
    Uuid,
    /// Anything else, kept verbatim so it can be reported
    Unknown(String),
}

impl FieldType {
    /// All supported (non-fallback) types
    pub const KNOWN: [Self; 9] = [
        Self::String,
        Self::Int,
        Self::BigInt,
        Self::Float,
        Self::Bool,
        Self::Timestamp,
        Self::Date,
        Self::Time,
        Self::Uuid,
    ];

    /// Parse a type name, never failing
    ///
    /// Matching is case-insensitive and accepts a few aliases
    /// (`integer`, `boolean`, `datetime`, ...). Anything else becomes
    /// [`FieldType::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use entity_scaffold::scaffold::FieldType;
    /// assert_eq!(FieldType::parse("string"), FieldType::String);
    /// assert_eq!(FieldType::parse("Integer"), FieldType::Int);
    /// assert_eq!(FieldType::parse("money"), FieldType::Unknown("money".to_string()));
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "string" | "text" => Self::String,
            "int" | "integer" | "i32" => Self::Int,
            "bigint" | "biginteger" | "i64" => Self::BigInt,
            "float" | "double" | "decimal" | "f64" => Self::Float,
            "bool" | "boolean" => Self::Bool,
            "timestamp" | "datetime" => Self::Timestamp,
            "date" => Self::Date,
            "time" => Self::Time,
            "uuid" => Self::Uuid,
            _ => Self::Unknown(input.to_string()),
        }
    }

    /// Whether this is one of the supported types
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// SQL column type for this field type
    ///
    /// `bool` maps to `BOOLEAN`. Unrecognized types fall back to `UUID`.
    #[must_use]
    pub const fn schema_type(&self) -> &'static str {
        match self {
            Self::String => "TEXT",
            Self::Int => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Float => "DECIMAL",
            Self::Bool => "BOOLEAN",
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Uuid | Self::Unknown(_) => "UUID",
        }
    }

    /// Go type for this field type
    #[must_use]
    pub const fn host_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int32",
            Self::BigInt => "int64",
            Self::Float => "float64",
            Self::Bool => "bool",
            Self::Timestamp | Self::Date | Self::Time => "time.Time",
            Self::Uuid => "uuid.UUID",
            Self::Unknown(_) => "interface{}",
        }
    }

    /// Go import path required by [`Self::host_type`], if any
    #[must_use]
    pub const fn host_import(&self) -> Option<&'static str> {
        match self {
            Self::Timestamp | Self::Date | Self::Time => Some(TIME_IMPORT),
            Self::Uuid => Some(UUID_IMPORT),
            _ => None,
        }
    }

    /// Whether the Go type can already hold `nil`
    #[must_use]
    pub const fn host_is_nilable(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "int"),
            Self::BigInt => write!(f, "bigint"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Date => write!(f, "date"),
            Self::Time => write!(f, "time"),
            Self::Uuid => write!(f, "uuid"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_types() {
        let cases = [
            (FieldType::String, "TEXT"),
            (FieldType::Int, "INTEGER"),
            (FieldType::BigInt, "BIGINT"),
            (FieldType::Float, "DECIMAL"),
            (FieldType::Bool, "BOOLEAN"),
            (FieldType::Timestamp, "TIMESTAMP"),
            (FieldType::Date, "DATE"),
            (FieldType::Time, "TIME"),
            (FieldType::Uuid, "UUID"),
        ];
        for (field_type, expected) in cases {
            assert_eq!(field_type.schema_type(), expected, "{field_type}");
        }
    }

    #[test]
    fn test_host_types() {
        let cases = [
            (FieldType::String, "string"),
            (FieldType::Int, "int32"),
            (FieldType::BigInt, "int64"),
            (FieldType::Float, "float64"),
            (FieldType::Bool, "bool"),
            (FieldType::Timestamp, "time.Time"),
            (FieldType::Date, "time.Time"),
            (FieldType::Time, "time.Time"),
            (FieldType::Uuid, "uuid.UUID"),
        ];
        for (field_type, expected) in cases {
            assert_eq!(field_type.host_type(), expected, "{field_type}");
        }
    }

    #[test]
    fn test_unknown_falls_back() {
        let field_type = FieldType::parse("money");
        assert!(!field_type.is_known());
        assert_eq!(field_type.schema_type(), "UUID");
        assert_eq!(field_type.host_type(), "interface{}");
        assert_eq!(field_type.host_import(), None);
        assert_eq!(field_type.to_string(), "money");
    }

    #[test]
    fn test_parse_aliases_and_case() {
        assert_eq!(FieldType::parse("INT"), FieldType::Int);
        assert_eq!(FieldType::parse("boolean"), FieldType::Bool);
        assert_eq!(FieldType::parse(" datetime "), FieldType::Timestamp);
        assert_eq!(FieldType::parse("i64"), FieldType::BigInt);
        assert_eq!("uuid".parse::<FieldType>(), Ok(FieldType::Uuid));
    }

    #[test]
    fn test_display_roundtrips_known_types() {
        for field_type in FieldType::KNOWN {
            assert_eq!(FieldType::parse(&field_type.to_string()), field_type);
        }
    }

    #[test]
    fn test_host_imports() {
        assert_eq!(FieldType::Date.host_import(), Some(TIME_IMPORT));
        assert_eq!(FieldType::Uuid.host_import(), Some(UUID_IMPORT));
        assert_eq!(FieldType::String.host_import(), None);
    }

    #[test]
    fn test_serde_uses_plain_strings() {
        let json = serde_json::to_string(&FieldType::BigInt).unwrap();
        assert_eq!(json, "\"bigint\"");

        let parsed: FieldType = serde_json::from_str("\"geometry\"").unwrap();
        assert_eq!(parsed, FieldType::Unknown("geometry".to_string()));
    }
}
