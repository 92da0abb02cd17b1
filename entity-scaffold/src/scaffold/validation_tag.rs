//! `validate:"..."` struct tag builder
//!
//! Rules are emitted in a fixed order: `required`, `min=`, `max=`, `email`,
//! `regexp="..."`. The pattern is spliced verbatim; [`Entity::validate`]
//! rejects patterns that would break out of the tag.
//!
//! [`Entity::validate`]: super::Entity::validate

use super::entity::Field;

/// Validation rules for a field, in emission order
#[must_use]
pub fn validation_rules(field: &Field) -> Vec<String> {
    let mut rules = Vec::new();

    if field.is_required {
        rules.push("required".to_string());
    }

    let validations = &field.validations;
    if let Some(min) = validations.min {
        rules.push(format!("min={min}"));
    }
    if let Some(max) = validations.max {
        rules.push(format!("max={max}"));
    }
    if validations.email {
        rules.push("email".to_string());
    }
    if let Some(pattern) = validations.pattern() {
        rules.push(format!("regexp=\"{pattern}\""));
    }

    rules
}

/// Struct tag fragment for a field: `""` or ` validate:"<rules>"`
///
/// The leading space lets the fragment be appended directly after the
/// `json:"..."` tag.
///
/// # Examples
///
/// ```
/// # use entity_scaffold::scaffold::{validation_tag, Field, FieldType};
/// let field = Field::new("email", FieldType::String).required().email();
/// assert_eq!(validation_tag(&field), r#" validate:"required,email""#);
///
/// let field = Field::new("nickname", FieldType::String);
/// assert_eq!(validation_tag(&field), "");
/// ```
#[must_use]
pub fn validation_tag(field: &Field) -> String {
    let rules = validation_rules(field);
    if rules.is_empty() {
        String::new()
    } else {
        format!(" validate:\"{}\"", rules.join(","))
    }
}
