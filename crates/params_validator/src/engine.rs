//! The rule-chaining validation engine.
//!
//! `Validator` owns a filtered parameter map and an accumulator of error
//! records keyed by field. Rule methods consume and return the validator,
//! so a validation is written as one chain; a failing rule records its
//! error and the chain keeps going. The accumulator holds at most one
//! error per field: a later failure on a field already in error replaces
//! the earlier record in place.

use chrono::{NaiveDate, NaiveDateTime};
use params_core::{
    mime_for_extension, ErrorArg, ParamValue, Params, RowSource, Rule, StoreError, UploadStatus,
    ValidatorError, DEFAULT_LOCALE, DEFAULT_UPLOAD_LIMIT,
};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;
use validator::ValidateEmail;

/// Default date/time format: `2019-03-11 22:50:34`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Optional digits, optionally followed by a `.` or `,` and 1-2 decimals.
static MONEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*((\.|,)[0-9]{1,2})?$").expect("valid regex"));

/// Lowercase alphanumeric segments joined by single hyphens.
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-?[a-z0-9]+)*$").expect("valid regex"));

/// Fluent validation engine over a request-parameter map.
///
/// # Example
///
/// ```rust
/// use params_core::{ParamValue, Params};
/// use params_validator::Validator;
///
/// let params = Params::from([
///     ("username".to_string(), ParamValue::from("joe")),
///     ("age".to_string(), ParamValue::from("twenty")),
/// ]);
///
/// let validator = Validator::new(params)
///     .length("username", Some(3), Some(32))
///     .numeric("age");
///
/// assert!(!validator.is_valid());
/// assert_eq!(validator.errors().len(), 1);
/// assert_eq!(validator.errors()[0].field(), "age");
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    params: Params,
    errors: Vec<ValidatorError>,
    partial: bool,
    locale: String,
    upload_limit: u64,
}

impl Validator {
    /// Creates a validator over the given parameters.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            errors: Vec::new(),
            partial: false,
            locale: DEFAULT_LOCALE.to_string(),
            upload_limit: DEFAULT_UPLOAD_LIMIT,
        }
    }

    /// Keeps only the parameters whose name appears in `filter`.
    ///
    /// Allowlisted names absent from the input are not created.
    pub fn with_filter(mut self, filter: &[&str]) -> Self {
        self.params.retain(|key, _| filter.contains(&key.as_str()));
        self
    }

    /// Enables partial mode.
    ///
    /// In partial mode every rule except `required`/`not_empty` is a
    /// no-op on fields absent from the parameter map, so one rule chain
    /// can serve as a template applied to varying subsets of fields.
    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Sets the locale recorded on error records.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Sets the platform upload limit in bytes.
    ///
    /// Used by `extension` for its unconditional size check and by
    /// `max_size` when an upload exceeded the platform limit.
    pub fn with_upload_limit(mut self, bytes: u64) -> Self {
        self.upload_limit = bytes;
        self
    }

    // --- presence rules ---------------------------------------------------

    /// Checks that every listed field is present and non-null.
    ///
    /// Unlike every other rule, `required` does not honor partial mode:
    /// demanding presence on an absent field must fail.
    pub fn required(mut self, keys: &[&str]) -> Self {
        for key in keys {
            if self.value(key).is_null() {
                self.add_error(key, Rule::Required, vec![]);
            }
        }
        self
    }

    /// Checks that every listed field is non-empty.
    ///
    /// Empty means null, an empty string, numeric zero, or `false`.
    pub fn not_empty(mut self, keys: &[&str]) -> Self {
        for key in keys {
            if self.skips(key) {
                continue;
            }
            if self.value(key).is_empty() {
                self.add_error(key, Rule::Empty, vec![]);
            }
        }
        self
    }

    // --- format rules -----------------------------------------------------

    /// Checks that the field is a syntactically valid email address.
    pub fn email(mut self, key: &str) -> Self {
        if self.skips(key) {
            return self;
        }
        let ok = match self.value(key) {
            ParamValue::String(s) => s.validate_email(),
            _ => false,
        };
        if !ok {
            self.add_error(key, Rule::Email, vec![]);
        }
        self
    }

    /// Checks that the field parses as a number.
    ///
    /// Integer and float values pass as-is; strings must contain an
    /// integer or decimal literal.
    pub fn numeric(mut self, key: &str) -> Self {
        if self.skips(key) {
            return self;
        }
        let ok = match self.value(key) {
            ParamValue::Int(_) | ParamValue::Float(_) => true,
            ParamValue::String(s) => !s.is_empty() && s.parse::<f64>().is_ok(),
            _ => false,
        };
        if !ok {
            self.add_error(key, Rule::Numeric, vec![]);
        }
        self
    }

    /// Checks that the field matches the money format: optional digits,
    /// optionally followed by a `.` or `,` and one or two decimals.
    ///
    /// A null value is vacuously valid.
    pub fn money(mut self, key: &str) -> Self {
        if self.skips(key) {
            return self;
        }
        let value = self.value(key);
        if !value.is_null() && !MONEY_RE.is_match(&value.render()) {
            self.add_error(key, Rule::Money, vec![]);
        }
        self
    }

    /// Checks that the field is a slug: lowercase alphanumeric segments
    /// joined by single hyphens, no leading or trailing hyphen.
    ///
    /// A null value is vacuously valid.
    pub fn slug(mut self, key: &str) -> Self {
        if self.skips(key) {
            return self;
        }
        let value = self.value(key);
        if !value.is_null() && !SLUG_RE.is_match(&value.render()) {
            self.add_error(key, Rule::Slug, vec![]);
        }
        self
    }

    /// Checks that the field's character length lies within the given
    /// bounds. Either bound may be omitted.
    ///
    /// When both bounds are given and the length falls outside them, a
    /// single `betweenLength` error is recorded instead of the individual
    /// bound errors.
    pub fn length(mut self, key: &str, min: Option<usize>, max: Option<usize>) -> Self {
        if self.skips(key) {
            return self;
        }
        let len = self.value(key).char_len();

        if let (Some(min), Some(max)) = (min, max) {
            if len < min || len > max {
                self.add_error(
                    key,
                    Rule::BetweenLength,
                    vec![ErrorArg::Int(min as i64), ErrorArg::Int(max as i64)],
                );
                return self;
            }
        }

        if let Some(min) = min {
            if len < min {
                self.add_error(key, Rule::MinLength, vec![ErrorArg::Int(min as i64)]);
            }
        }
        if let Some(max) = max {
            if len > max {
                self.add_error(key, Rule::MaxLength, vec![ErrorArg::Int(max as i64)]);
            }
        }
        self
    }

    /// Checks that the field parses as a date/time in the default
    /// format (`%Y-%m-%d %H:%M:%S`).
    pub fn date_time(self, key: &str) -> Self {
        self.date_time_format(key, DATETIME_FORMAT)
    }

    /// Checks that the field parses strictly against `format`.
    ///
    /// Parsing is calendar-aware: out-of-range months and Feb 29 in a
    /// non-leap year are rejected. Date-only formats are accepted.
    pub fn date_time_format(mut self, key: &str, format: &str) -> Self {
        if self.skips(key) {
            return self;
        }
        let text = self.value(key).render();
        let ok = NaiveDateTime::parse_from_str(&text, format).is_ok()
            || NaiveDate::parse_from_str(&text, format).is_ok();
        if !ok {
            self.add_error(key, Rule::DateTime, vec![ErrorArg::from(format)]);
        }
        self
    }

    // --- database-backed rules --------------------------------------------

    /// Checks that a row exists in `table` where `column` equals the
    /// field's value.
    ///
    /// A collaborator failure is not a validation outcome and propagates
    /// to the caller.
    pub fn exists(
        mut self,
        key: &str,
        column: &str,
        table: &str,
        store: &dyn RowSource,
    ) -> Result<Self, StoreError> {
        if self.skips(key) {
            return Ok(self);
        }
        let found = store.row_exists(table, column, self.value(key), None)?;
        if !found {
            self.add_error(key, Rule::Exists, vec![ErrorArg::from(table)]);
        }
        Ok(self)
    }

    /// Checks that no row exists in `table` where `column` equals the
    /// field's value, optionally ignoring the row with id `exclude`.
    pub fn unique(
        mut self,
        key: &str,
        column: &str,
        table: &str,
        store: &dyn RowSource,
        exclude: Option<i64>,
    ) -> Result<Self, StoreError> {
        if self.skips(key) {
            return Ok(self);
        }
        let value = self.value(key).clone();
        let found = store.row_exists(table, column, &value, exclude)?;
        if found {
            self.add_error(key, Rule::Unique, vec![ErrorArg::Str(value.render())]);
        }
        Ok(self)
    }

    // --- upload rules -----------------------------------------------------

    /// Checks that the upload's filename extension is in `extensions` and
    /// that its declared media type matches the extension's canonical
    /// MIME type.
    ///
    /// Always additionally runs `max_size` against the platform upload
    /// limit, whatever the outcome of the extension check.
    pub fn extension(mut self, key: &str, extensions: &[&str]) -> Self {
        if self.skips(key) {
            return self;
        }

        let upload = self.value(key).as_upload().cloned();
        if let Some(file) = upload.filter(|f| f.is_ok()) {
            let allowed = file.extension().is_some_and(|ext| {
                extensions.contains(&ext.as_str())
                    && mime_for_extension(&ext) == Some(file.media_type())
            });
            if !allowed {
                self.add_error(key, Rule::Filetype, vec![ErrorArg::Str(extensions.join(","))]);
            }
        }

        let limit = self.upload_limit;
        self.max_size(key, limit)
    }

    /// Checks that the upload's size does not exceed `max_bytes`.
    ///
    /// An empty upload or one that exceeded the form-declared limit also
    /// fails. An upload rejected at the platform limit fails with the
    /// platform limit in the message instead of `max_bytes`. A non-upload
    /// value is a predicate failure, not a crash.
    pub fn max_size(mut self, key: &str, max_bytes: u64) -> Self {
        if self.skips(key) {
            return self;
        }
        match self.value(key).as_upload().cloned() {
            Some(file) => {
                if file.status() == UploadStatus::ExceedsFormLimit
                    || file.size() > max_bytes
                    || file.size() == 0
                {
                    self.add_error(key, Rule::MaxSize, vec![ErrorArg::Uint(max_bytes)]);
                } else if file.status() == UploadStatus::ExceedsPlatformLimit {
                    let limit = self.upload_limit;
                    self.add_error(key, Rule::MaxSize, vec![ErrorArg::Uint(limit)]);
                }
            }
            None => self.add_error(key, Rule::MaxSize, vec![ErrorArg::Uint(max_bytes)]),
        }
        self
    }

    /// Checks that the field holds a completed upload.
    pub fn uploaded(mut self, key: &str) -> Self {
        if self.skips(key) {
            return self;
        }
        let ok = self.value(key).as_upload().is_some_and(|f| f.is_ok());
        if !ok {
            self.add_error(key, Rule::Uploaded, vec![]);
        }
        self
    }

    // --- accessors --------------------------------------------------------

    /// Returns true if no rule has recorded an error so far.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the accumulated errors, one per failed field, in the order
    /// the fields first failed.
    pub fn errors(&self) -> &[ValidatorError] {
        &self.errors
    }

    /// Returns the errors whose field appears in `key_map`, each rewritten
    /// under its mapped external name.
    ///
    /// Fields absent from the map are dropped from this view; the
    /// accumulator itself is unchanged.
    pub fn mapped_errors(&self, key_map: &HashMap<String, String>) -> Vec<ValidatorError> {
        self.errors
            .iter()
            .filter_map(|error| {
                key_map
                    .get(error.field())
                    .map(|external| error.with_field(external))
            })
            .collect()
    }

    /// Returns the current parameter map.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Merges new parameters into the map; duplicated names take the new
    /// value.
    pub fn add_params(&mut self, new_params: Params) {
        self.params.extend(new_params);
    }

    // --- internals --------------------------------------------------------

    /// Reads a field's current value. Absent and present-null both read
    /// as null; this lookup never fails.
    fn value(&self, key: &str) -> &ParamValue {
        self.params.get(key).unwrap_or(&ParamValue::Null)
    }

    /// Returns true if partial mode exempts this field from validation.
    fn skips(&self, key: &str) -> bool {
        self.partial && !self.params.contains_key(key)
    }

    /// Records an error for a field, replacing any earlier error for the
    /// same field in place.
    fn add_error(&mut self, key: &str, rule: Rule, args: Vec<ErrorArg>) {
        debug!(field = key, rule = %rule, "validation failed");
        let record = ValidatorError::new(key, rule, args, &self.locale);
        match self.errors.iter_mut().find(|e| e.field() == key) {
            Some(slot) => *slot = record,
            None => self.errors.push(record),
        }
    }
}
