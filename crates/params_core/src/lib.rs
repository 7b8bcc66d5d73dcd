//! # Params Core
//!
//! Core data structures and types for the request-parameter validation
//! engine.
//!
//! This crate provides the building blocks the validator works with:
//!
//! - **ParamValue**: a tagged value type for request parameters (strings,
//!   numbers, booleans, nulls, file uploads)
//! - **ValidatorError**: an immutable record of one validation failure,
//!   renderable as a localized message
//! - **MessageCatalog**: the translation-catalog capability used to render
//!   errors, with a builtin `en-US`/`fr-FR` implementation
//! - **RowSource**: the row-existence capability used by database-backed
//!   rules (`exists`, `unique`)
//! - **UploadedFile**: the read-only upload descriptor used by file rules
//!
//! ## Example
//!
//! ```rust
//! use params_core::{ErrorArg, Rule, ValidatorError, DEFAULT_LOCALE};
//!
//! let error = ValidatorError::new(
//!     "username",
//!     Rule::MinLength,
//!     vec![ErrorArg::Int(3)],
//!     DEFAULT_LOCALE,
//! );
//!
//! assert_eq!(
//!     error.render().unwrap(),
//!     "'username' must be longer than 3 characters"
//! );
//! ```

pub mod catalog;
pub mod error;
pub mod store;
pub mod upload;
pub mod value;

pub use catalog::*;
pub use error::*;
pub use store::*;
pub use upload::*;
pub use value::*;
