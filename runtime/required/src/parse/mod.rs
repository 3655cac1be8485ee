//! Decode a JSON document and validate it in one go.
//!
//! [`Parser`] is the key type in this module.
//! [`parse`], [`from_slice`] and [`from_str`] are shortcuts for a [`Parser`] with the
//! default configuration.
use std::io::Read;

use serde::de::DeserializeOwned;

use crate::validate::{Validate, validate};

pub use config::{DocumentSizeLimit, ParserConfig};
pub use errors::{DocumentTooLarge, JsonDeserializationError, ParseError, ReadDocumentError};

mod config;
pub mod errors;

#[derive(Debug, Clone, Default)]
/// Decode JSON documents and check that all required fields have been populated.
///
/// # Example
///
/// ```rust
/// use required::{DocumentSizeLimit, ParseError, Parser, ParserConfig, Required, Validate};
///
/// #[derive(serde::Deserialize, Validate, Debug)]
/// pub struct Person {
///     #[serde(default)]
///     name: Required<String>,
///     #[serde(default)]
///     age: Required<u8>,
/// }
///
/// let parser = Parser::new(ParserConfig::default().max_document_size(DocumentSizeLimit::Disabled));
///
/// let person: Person = parser.parse(r#"{"name":"Saoirse","age":25}"#.as_bytes()).unwrap();
/// assert_eq!(person.age.get(), Some(&25));
///
/// let err = parser.parse::<Person, _>(r#"{"name":"Saoirse"}"#.as_bytes()).unwrap_err();
/// assert!(matches!(err, ParseError::Validation(_)));
/// ```
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with the given configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    fn unbounded() -> Self {
        Self::new(ParserConfig::default().max_document_size(DocumentSizeLimit::Disabled))
    }

    /// The configuration of this parser.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Read a full JSON document from `reader`, decode it into a `T` and validate it.
    ///
    /// The parsing can fail for a number of reasons:
    ///
    /// - reading from `reader` fails
    /// - the document exceeds the configured size limit
    /// - the document isn't valid JSON, or doesn't match the shape of `T`
    /// - one or more required fields weren't populated
    ///
    /// Validation only runs if the document was decoded successfully.
    pub fn parse<T, R>(&self, reader: R) -> Result<T, ParseError>
    where
        T: DeserializeOwned + Validate,
        R: Read,
    {
        let bytes = self.read_document(reader)?;
        self.decode_and_validate(&bytes)
    }

    /// Decode the JSON document in `bytes` into a `T` and validate it.
    ///
    /// Check out [`Parser::parse`] for the possible failure modes.
    pub fn from_slice<T>(&self, bytes: &[u8]) -> Result<T, ParseError>
    where
        T: DeserializeOwned + Validate,
    {
        self.check_size(bytes.len())?;
        self.decode_and_validate(bytes)
    }

    fn read_document<R: Read>(&self, reader: R) -> Result<Vec<u8>, ParseError> {
        let mut buffer = Vec::new();
        let outcome = match self.config.max_document_size {
            // We read one byte past the limit to tell apart documents that are exactly
            // as large as the limit from those that exceed it.
            DocumentSizeLimit::Enabled { max_size } => reader
                .take(max_size.as_u64().saturating_add(1))
                .read_to_end(&mut buffer),
            DocumentSizeLimit::Disabled => {
                let mut reader = reader;
                reader.read_to_end(&mut buffer)
            }
        };
        outcome.map_err(|source| ReadDocumentError { source })?;
        self.check_size(buffer.len())?;
        Ok(buffer)
    }

    fn check_size(&self, n_bytes: usize) -> Result<(), DocumentTooLarge> {
        let DocumentSizeLimit::Enabled { max_size } = self.config.max_document_size else {
            return Ok(());
        };
        if n_bytes as u64 > max_size.as_u64() {
            tracing::debug!(
                document.size = n_bytes,
                document.max_size = max_size.as_u64(),
                "The input document exceeds the size limit"
            );
            return Err(DocumentTooLarge { max_size });
        }
        Ok(())
    }

    fn decode_and_validate<T>(&self, bytes: &[u8]) -> Result<T, ParseError>
    where
        T: DeserializeOwned + Validate,
    {
        tracing::trace!(document.size = bytes.len(), "Decoding the input document");
        let value: T = decode(bytes).inspect_err(|e| {
            tracing::debug!(
                error.path = e.path(),
                error.message = %e.inner(),
                "Failed to decode the input document"
            );
        })?;
        validate(&value).inspect_err(|e| {
            tracing::debug!(
                missing_fields = e.len(),
                type_name = value.type_name(),
                "The input document is missing required fields"
            );
        })?;
        Ok(value)
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, JsonDeserializationError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(JsonDeserializationError::new)?;
    // Trailing characters, other than whitespace, are rejected.
    deserializer.end()?;
    Ok(value)
}

/// Read a full JSON document from `reader`, decode it into a `T` and validate it.
///
/// There is no limit on the size of the document: use a [`Parser`] with an explicit
/// [`DocumentSizeLimit`] to bound it.
/// Check out [`Parser::parse`] for more details.
///
/// # Example
///
/// ```rust
/// use required::{ParseError, Required, Validate};
///
/// #[derive(serde::Deserialize, Validate, Debug)]
/// pub struct Person {
///     #[serde(default)]
///     name: Required<String>,
///     #[serde(default)]
///     age: Required<u8>,
/// }
///
/// let err = required::parse::<Person, _>(r#"{"name":"Saoirse"}"#.as_bytes()).unwrap_err();
/// assert_eq!(err.to_string(), "field 'age' in 'Person' is required");
/// ```
pub fn parse<T, R>(reader: R) -> Result<T, ParseError>
where
    T: DeserializeOwned + Validate,
    R: Read,
{
    Parser::unbounded().parse(reader)
}

/// Decode the JSON document in `bytes` into a `T` and validate it.
///
/// There is no limit on the size of the document.
pub fn from_slice<T>(bytes: &[u8]) -> Result<T, ParseError>
where
    T: DeserializeOwned + Validate,
{
    Parser::unbounded().from_slice(bytes)
}

/// Decode the JSON document in `s` into a `T` and validate it.
///
/// There is no limit on the size of the document.
pub fn from_str<T>(s: &str) -> Result<T, ParseError>
where
    T: DeserializeOwned + Validate,
{
    Parser::unbounded().from_slice(s.as_bytes())
}
