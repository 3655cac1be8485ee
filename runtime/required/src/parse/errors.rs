//! Errors that can occur while parsing and validating a document.
use ubyte::ByteUnit;

use crate::validate::ValidationErrors;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`Parser::parse`](super::Parser::parse) and its siblings.
///
/// Reading and deserialization failures short-circuit: validation only runs
/// on documents that were decoded successfully.
pub enum ParseError {
    #[error(transparent)]
    /// See [`ReadDocumentError`] for details.
    Read(#[from] ReadDocumentError),
    #[error(transparent)]
    /// See [`DocumentTooLarge`] for details.
    SizeLimitExceeded(#[from] DocumentTooLarge),
    #[error(transparent)]
    /// See [`JsonDeserializationError`] for details.
    Deserialization(#[from] JsonDeserializationError),
    #[error(transparent)]
    /// See [`ValidationErrors`] for details.
    Validation(#[from] ValidationErrors),
}

impl ParseError {
    /// The missing required fields, if the document was decoded successfully but failed validation.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ParseError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Something went wrong while reading the input document.")]
#[non_exhaustive]
/// The input stream returned an I/O error.
pub struct ReadDocumentError {
    #[source]
    pub(super) source: std::io::Error,
}

#[derive(Debug, thiserror::Error)]
#[error(
    "The input document is larger than the maximum size limit ({} bytes).",
    .max_size.as_u64()
)]
#[non_exhaustive]
/// The input document is larger than the configured [`DocumentSizeLimit`](super::DocumentSizeLimit).
pub struct DocumentTooLarge {
    /// The maximum size limit that was breached.
    pub max_size: ByteUnit,
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to deserialize the input as a JSON document.\n{}", describe(.path.as_deref(), .source))]
#[non_exhaustive]
/// Something went wrong when deserializing the document into the specified type.
pub struct JsonDeserializationError {
    pub(super) path: Option<String>,
    #[source]
    pub(super) source: serde_json::Error,
}

impl JsonDeserializationError {
    pub(super) fn new(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = e.path().iter().next().is_some().then(|| e.path().to_string());
        Self {
            path,
            source: e.into_inner(),
        }
    }

    /// The location of the offending value, e.g. `address.street`.
    ///
    /// It's `None` if the error occurred at the top level of the document
    /// (e.g. malformed JSON).
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The error returned by `serde_json`.
    pub fn inner(&self) -> &serde_json::Error {
        &self.source
    }
}

fn describe(path: Option<&str>, source: &serde_json::Error) -> String {
    match path {
        Some(path) => format!("{path}: {source}"),
        None => source.to_string(),
    }
}

impl From<serde_json::Error> for JsonDeserializationError {
    fn from(source: serde_json::Error) -> Self {
        Self { path: None, source }
    }
}
