//! Message-template catalogs.
//!
//! Rendering an error record requires a template for its `(rule, locale)`
//! pair. The catalog is a capability injected at render time, so
//! applications can ship their own translations; `BuiltinCatalog`
//! provides complete `en-US` and `fr-FR` tables.

use crate::Rule;

/// Default locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Translation-catalog capability.
///
/// Returns the message template for a rule in a locale, or `None` when
/// the pair is not covered. Templates use positional placeholders:
/// `{0}` is the field name, `{1}`.. are the rule's arguments.
pub trait MessageCatalog {
    /// Looks up the template for `(rule, locale)`.
    fn template(&self, rule: Rule, locale: &str) -> Option<&str>;
}

/// Builtin catalog covering `en-US` and `fr-FR` for every rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl MessageCatalog for BuiltinCatalog {
    fn template(&self, rule: Rule, locale: &str) -> Option<&str> {
        match locale {
            "en-US" => Some(en_us(rule)),
            "fr-FR" => Some(fr_fr(rule)),
            _ => None,
        }
    }
}

fn en_us(rule: Rule) -> &'static str {
    match rule {
        Rule::Required => "'{0}' is required",
        Rule::Empty => "'{0}' must not be empty",
        Rule::Email => "'{0}' must be a valid email",
        Rule::Numeric => "'{0}' must be a number",
        Rule::Money => "'{0}' must be money format",
        Rule::Slug => "'{0}' must be a valid slug",
        Rule::BetweenLength => "'{0}' must have a length between {1} and {2} characters",
        Rule::MinLength => "'{0}' must be longer than {1} characters",
        Rule::MaxLength => "'{0}' must be shorter than {1} characters",
        Rule::DateTime => "'{0}' must be a date with the format '{1}'",
        Rule::Exists => "'{0}' does not exist in '{1}'",
        Rule::Unique => "'{0}' must be unique, '{1}' is already used",
        Rule::Filetype => "'{0}' must be a file with the following extensions {1}",
        Rule::MaxSize => "'{0}' must be smaller than {1} bytes",
        Rule::Uploaded => "'{0}' must contain a file",
    }
}

fn fr_fr(rule: Rule) -> &'static str {
    match rule {
        Rule::Required => "'{0}' est requis",
        Rule::Empty => "'{0}' ne doit pas être vide",
        Rule::Email => "'{0}' doit être un email valide",
        Rule::Numeric => "'{0}' doit être un nombre",
        Rule::Money => "'{0}' doit être un montant valide",
        Rule::Slug => "'{0}' doit être un slug valide",
        Rule::BetweenLength => "'{0}' doit avoir une longueur comprise entre {1} et {2} caractères",
        Rule::MinLength => "'{0}' doit être plus long que {1} caractères",
        Rule::MaxLength => "'{0}' doit être plus court que {1} caractères",
        Rule::DateTime => "'{0}' doit être une date au format '{1}'",
        Rule::Exists => "'{0}' n'existe pas dans '{1}'",
        Rule::Unique => "'{0}' doit être unique, '{1}' est déjà utilisé",
        Rule::Filetype => "'{0}' doit être un fichier avec une des extensions suivantes {1}",
        Rule::MaxSize => "'{0}' doit être plus petit que {1} octets",
        Rule::Uploaded => "'{0}' doit contenir un fichier",
    }
}
