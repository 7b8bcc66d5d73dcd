//! Validation error records.
//!
//! A `ValidatorError` is an immutable record of one rule failure: which
//! field failed, which rule, and the rule's message arguments. Records
//! carry no message text themselves; rendering resolves a template from a
//! `MessageCatalog` for the record's locale and substitutes the field and
//! arguments positionally.

use crate::{BuiltinCatalog, MessageCatalog};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier of a validation rule.
///
/// `as_str()` yields the wire-facing camelCase id used to key message
/// templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    /// Field must be present and non-null
    Required,
    /// Field must not be empty
    Empty,
    /// Field must be a syntactically valid email
    Email,
    /// Field must parse as a number
    Numeric,
    /// Field must match the money format
    Money,
    /// Field must match the slug format
    Slug,
    /// Field length must fall between two bounds
    BetweenLength,
    /// Field length must reach a minimum
    MinLength,
    /// Field length must not exceed a maximum
    MaxLength,
    /// Field must parse as a date/time in a given format
    DateTime,
    /// Field value must exist in a table
    Exists,
    /// Field value must not already exist in a table
    Unique,
    /// Upload must carry an allowed file extension
    Filetype,
    /// Upload must not exceed a size limit
    MaxSize,
    /// Field must contain a completed upload
    Uploaded,
}

impl Rule {
    /// Returns the camelCase identifier of this rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Empty => "empty",
            Rule::Email => "email",
            Rule::Numeric => "numeric",
            Rule::Money => "money",
            Rule::Slug => "slug",
            Rule::BetweenLength => "betweenLength",
            Rule::MinLength => "minLength",
            Rule::MaxLength => "maxLength",
            Rule::DateTime => "datetime",
            Rule::Exists => "exists",
            Rule::Unique => "unique",
            Rule::Filetype => "filetype",
            Rule::MaxSize => "maxSize",
            Rule::Uploaded => "uploaded",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A primitive argument carried by an error record into its message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorArg {
    /// Signed integer argument (lengths, bounds)
    Int(i64),
    /// Unsigned integer argument (byte sizes)
    Uint(u64),
    /// String argument (formats, table names, joined lists)
    Str(String),
}

impl fmt::Display for ErrorArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorArg::Int(i) => write!(f, "{i}"),
            ErrorArg::Uint(u) => write!(f, "{u}"),
            ErrorArg::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ErrorArg {
    fn from(i: i64) -> Self {
        ErrorArg::Int(i)
    }
}

impl From<u64> for ErrorArg {
    fn from(u: u64) -> Self {
        ErrorArg::Uint(u)
    }
}

impl From<&str> for ErrorArg {
    fn from(s: &str) -> Self {
        ErrorArg::Str(s.to_string())
    }
}

impl From<String> for ErrorArg {
    fn from(s: String) -> Self {
        ErrorArg::Str(s)
    }
}

/// Error raised when a message template cannot be resolved.
///
/// This is a configuration error, not a validation outcome: the catalog
/// for a locale must cover every rule the application renders.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    /// No template for this rule in this locale
    #[error("no message template for rule '{rule}' in locale '{locale}'")]
    MissingTemplate {
        /// Rule whose template is missing
        rule: Rule,
        /// Locale that was looked up
        locale: String,
    },
}

/// An immutable record of one validation failure.
///
/// Equality compares all four components: field, rule, arguments, and
/// locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorError {
    field: String,
    rule: Rule,
    args: Vec<ErrorArg>,
    locale: String,
}

impl ValidatorError {
    /// Creates a new error record.
    pub fn new(
        field: impl Into<String>,
        rule: Rule,
        args: Vec<ErrorArg>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule,
            args,
            locale: locale.into(),
        }
    }

    /// Returns the field this record belongs to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the rule that failed.
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Returns the message arguments, in template order.
    pub fn args(&self) -> &[ErrorArg] {
        &self.args
    }

    /// Returns the locale this record renders in.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns a copy of this record keyed under a different field name.
    ///
    /// Used when errors are re-exposed under external-facing names.
    pub fn with_field(&self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: self.rule,
            args: self.args.clone(),
            locale: self.locale.clone(),
        }
    }

    /// Renders this record through the builtin catalog.
    pub fn render(&self) -> Result<String, MessageError> {
        self.render_with(&BuiltinCatalog)
    }

    /// Renders this record through the given catalog.
    ///
    /// The template is resolved for `(rule, locale)`; `{0}` substitutes
    /// the field name, `{1}`.. substitute the arguments in order.
    pub fn render_with(&self, catalog: &dyn MessageCatalog) -> Result<String, MessageError> {
        let template =
            catalog
                .template(self.rule, &self.locale)
                .ok_or_else(|| MessageError::MissingTemplate {
                    rule: self.rule,
                    locale: self.locale.clone(),
                })?;

        let mut message = template.replace("{0}", &self.field);
        for (position, arg) in self.args.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", position + 1), &arg.to_string());
        }

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_LOCALE;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rule_identifiers() {
        assert_eq!(Rule::BetweenLength.as_str(), "betweenLength");
        assert_eq!(Rule::MaxSize.as_str(), "maxSize");
        assert_eq!(Rule::DateTime.as_str(), "datetime");
    }

    #[test]
    fn test_render_substitutes_field_then_args() {
        let error = ValidatorError::new(
            "password",
            Rule::BetweenLength,
            vec![ErrorArg::Int(8), ErrorArg::Int(64)],
            DEFAULT_LOCALE,
        );

        assert_eq!(
            error.render().unwrap(),
            "'password' must have a length between 8 and 64 characters"
        );
    }

    #[test]
    fn test_render_unknown_locale_fails() {
        let error = ValidatorError::new("field", Rule::Email, vec![], "xx-XX");

        assert_eq!(
            error.render(),
            Err(MessageError::MissingTemplate {
                rule: Rule::Email,
                locale: "xx-XX".to_string(),
            })
        );
    }

    #[test]
    fn test_with_field_changes_only_the_key() {
        let error = ValidatorError::new("internal", Rule::Numeric, vec![], DEFAULT_LOCALE);
        let renamed = error.with_field("external");

        assert_eq!(renamed.field(), "external");
        assert_eq!(renamed.rule(), error.rule());
        assert_eq!(renamed.args(), error.args());
        assert_eq!(renamed.locale(), error.locale());
        assert_ne!(renamed, error);
    }

    #[test]
    fn test_equality_over_all_components() {
        let a = ValidatorError::new("f", Rule::Slug, vec![], "en-US");
        let b = ValidatorError::new("f", Rule::Slug, vec![], "en-US");
        let c = ValidatorError::new("f", Rule::Slug, vec![], "fr-FR");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serializes_with_camel_case_rule() {
        let error = ValidatorError::new("f", Rule::BetweenLength, vec![], "en-US");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("betweenLength"), "got: {json}");
    }
}
