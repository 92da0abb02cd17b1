//! Naming helpers for code generation
//!
//! Identifier derivation used by the generators (first-character
//! capitalization) plus the naming conventions the CLI uses to fill in
//! defaults (table names, plurals).

use inflector::Inflector;

/// Naming helpers shared by the schema, query and DTO generators
pub struct NamingHelpers;

impl NamingHelpers {
    /// Upper-case the first character and keep the rest verbatim
    ///
    /// This is the exported-name transform used for Go struct fields and
    /// `GetXByY` query names.
    ///
    /// # Examples
    ///
    /// ```
    /// # use entity_scaffold::scaffold::NamingHelpers;
    /// assert_eq!(NamingHelpers::capitalize_first("email"), "Email");
    /// assert_eq!(NamingHelpers::capitalize_first("firstName"), "FirstName");
    /// assert_eq!(NamingHelpers::capitalize_first("created_at"), "Created_at");
    /// assert_eq!(NamingHelpers::capitalize_first(""), "");
    /// ```
    #[must_use]
    pub fn capitalize_first(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Whether `input` is a plain SQL/Go identifier (`[A-Za-z_][A-Za-z0-9_]*`)
    ///
    /// # Examples
    ///
    /// ```
    /// # use entity_scaffold::scaffold::NamingHelpers;
    /// assert!(NamingHelpers::is_identifier("user_profiles"));
    /// assert!(!NamingHelpers::is_identifier("users; DROP TABLE users"));
    /// assert!(!NamingHelpers::is_identifier("1users"));
    /// ```
    #[must_use]
    pub fn is_identifier(input: &str) -> bool {
        let mut chars = input.chars();
        chars
            .next()
            .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Convert string to `snake_case`
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Pluralize a word
    ///
    /// Irregular and uncountable nouns are not special-cased everywhere:
    /// `Person` becomes `Persons` and `Data` becomes `Datas`.
    ///
    /// ```
    /// # use entity_scaffold::scaffold::NamingHelpers;
    /// assert_eq!(NamingHelpers::pluralize("category"), "categories");
    /// ```
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        input.to_plural()
    }

    /// Convert an entity name to a table name (`snake_case` plural)
    ///
    /// # Examples
    ///
    /// ```
    /// # use entity_scaffold::scaffold::NamingHelpers;
    /// assert_eq!(NamingHelpers::to_table_name("Post"), "posts");
    /// assert_eq!(NamingHelpers::to_table_name("UserProfile"), "user_profiles");
    /// ```
    #[must_use]
    pub fn to_table_name(entity: &str) -> String {
        Self::pluralize(&Self::to_snake_case(entity))
    }
}
