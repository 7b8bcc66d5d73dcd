//! Parameter value model.
//!
//! This module provides the tagged value type for request parameters.
//! Web inputs are loosely typed: a field can arrive as a string, a number,
//! a boolean, a file upload, or be missing entirely. Rule methods pattern
//! match on the variant and treat a type mismatch as a predicate failure,
//! never as a crash.

use crate::UploadedFile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single request-parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// Null/missing value
    Null,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// File-upload descriptor
    Upload(UploadedFile),
}

impl ParamValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Returns true if this value is "empty": null, an empty string,
    /// numeric zero, `false`, or a zero-size upload.
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Null => true,
            ParamValue::String(s) => s.is_empty(),
            ParamValue::Int(i) => *i == 0,
            ParamValue::Float(f) => *f == 0.0,
            ParamValue::Bool(b) => !b,
            ParamValue::Upload(file) => file.size() == 0,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::String(_) => "string",
            ParamValue::Int(_) => "int64",
            ParamValue::Float(_) => "float64",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Upload(_) => "upload",
        }
    }

    /// Attempts to get this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an upload descriptor.
    pub fn as_upload(&self) -> Option<&UploadedFile> {
        match self {
            ParamValue::Upload(file) => Some(file),
            _ => None,
        }
    }

    /// Returns the string rendering of this value.
    ///
    /// This is the form format rules (`money`, `slug`, `date_time`) match
    /// against and the form reported in `unique` error messages. Null
    /// renders as the empty string; an upload renders as its declared
    /// filename.
    pub fn render(&self) -> String {
        match self {
            ParamValue::Null => String::new(),
            ParamValue::String(s) => s.clone(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Float(f) => f.to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Upload(file) => file.filename().to_string(),
        }
    }

    /// Returns the character length of this value's string rendering.
    ///
    /// Counts Unicode scalar values, not bytes, so multi-byte characters
    /// count once.
    pub fn char_len(&self) -> usize {
        match self {
            ParamValue::String(s) => s.chars().count(),
            other => other.render().chars().count(),
        }
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        ParamValue::Float(f)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<UploadedFile> for ParamValue {
    fn from(file: UploadedFile) -> Self {
        ParamValue::Upload(file)
    }
}

/// A named parameter mapping, as extracted from a request.
pub type Params = HashMap<String, ParamValue>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UploadStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_types() {
        assert_eq!(ParamValue::Null.type_name(), "null");
        assert_eq!(ParamValue::String("test".into()).type_name(), "string");
        assert_eq!(ParamValue::Int(42).type_name(), "int64");
        assert_eq!(ParamValue::Float(3.5).type_name(), "float64");
        assert_eq!(ParamValue::Bool(true).type_name(), "boolean");
    }

    #[test]
    fn test_emptiness() {
        assert!(ParamValue::Null.is_empty());
        assert!(ParamValue::String(String::new()).is_empty());
        assert!(ParamValue::Int(0).is_empty());
        assert!(ParamValue::Float(0.0).is_empty());
        assert!(ParamValue::Bool(false).is_empty());

        assert!(!ParamValue::String("0".into()).is_empty());
        assert!(!ParamValue::Int(1).is_empty());
        assert!(!ParamValue::Bool(true).is_empty());
    }

    #[test]
    fn test_render() {
        assert_eq!(ParamValue::Null.render(), "");
        assert_eq!(ParamValue::String("abc".into()).render(), "abc");
        assert_eq!(ParamValue::Int(11).render(), "11");
        assert_eq!(ParamValue::Float(11.32).render(), "11.32");
    }

    #[test]
    fn test_char_len_counts_codepoints() {
        assert_eq!(ParamValue::String("héllo".into()).char_len(), 5);
        assert_eq!(ParamValue::String("日本語".into()).char_len(), 3);
        assert_eq!(ParamValue::Int(1234).char_len(), 4);
        assert_eq!(ParamValue::Null.char_len(), 0);
    }

    #[test]
    fn test_upload_accessor() {
        let file = UploadedFile::new(UploadStatus::Ok, 10, "image/png", "a.png");
        let value = ParamValue::from(file.clone());
        assert_eq!(value.as_upload(), Some(&file));
        assert_eq!(ParamValue::Int(1).as_upload(), None);
    }
}
