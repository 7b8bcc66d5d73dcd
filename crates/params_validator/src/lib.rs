//! # Params Validator
//!
//! Fluent, rule-based validation engine for request parameters. A
//! `Validator` is built over a parameter map and driven through a chain
//! of rule methods; each failing rule records one error for its field
//! without interrupting the chain, and the caller inspects the outcome
//! through `is_valid()` / `errors()`.
//!
//! ## Example
//!
//! ```rust
//! use params_core::{ParamValue, Params};
//! use params_validator::Validator;
//!
//! let params = Params::from([
//!     ("email".to_string(), ParamValue::from("joe@doe.fr")),
//!     ("amount".to_string(), ParamValue::from("11,32")),
//! ]);
//!
//! let validator = Validator::new(params)
//!     .required(&["email", "amount"])
//!     .email("email")
//!     .money("amount");
//!
//! assert!(validator.is_valid());
//! ```

mod engine;

pub use engine::*;
