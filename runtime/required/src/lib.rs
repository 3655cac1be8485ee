//! # required
//!
//! Mark fields of your serde data models as **required**, then check that they were
//! actually present in the incoming document.
//!
//! A field of type [`Required<T>`] records whether it was populated during deserialization.
//! That's different from holding a default value: `{"age": 0}` populates `age`, `{}` doesn't.
//! After decoding, [`validate`] walks all the visible fields of your type,
//! including those promoted from `#[serde(flatten)]` members, and reports every required
//! field that was left unpopulated.
//!
//! ```rust
//! use required::{Required, Validate};
//!
//! #[derive(serde::Deserialize, Validate)]
//! pub struct Person {
//!     #[serde(default)]
//!     name: Required<String>,
//!     #[serde(default)]
//!     age: Required<u32>,
//!     nickname: Option<String>,
//! }
//!
//! let person: Person = serde_json::from_str(r#"{"name": "Saoirse"}"#).unwrap();
//! let err = required::validate(&person).unwrap_err();
//! assert_eq!(err.to_string(), "field 'age' in 'Person' is required");
//! ```
//!
//! [`parse`], [`from_slice`] and [`from_str`] decode a JSON document and validate it in one go.
//! Use a [`Parser`] if you need to customise the configuration.
pub use capability::{RequiredField, Settable, TypeDescriptor, TypeMismatch};
pub use field::Required;
pub use parse::{
    DocumentSizeLimit, Parser, ParserConfig, ParseError, from_slice, from_str, parse,
};
/// Derive an implementation of the [`Validate`] trait.
///
/// Check out [`Validate`]'s documentation for the available attributes.
pub use required_macros::Validate;
pub use validate::{
    BadType, FieldWalker, MissingField, Validate, ValidateAnyError, ValidationErrors,
    VisibleField, validate, validate_any, visible_fields,
};

mod capability;
mod field;
pub mod parse;
pub mod validate;

#[doc(hidden)]
pub mod __private;
