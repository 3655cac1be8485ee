use ubyte::{ByteUnit, ToByteUnit};

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
/// Configuration for a [`Parser`](super::Parser).
///
/// It can be deserialized, so that you can embed it in your application's own configuration.
///
/// ```rust
/// use required::{DocumentSizeLimit, ParserConfig};
///
/// let config: ParserConfig = serde_json::from_str(
///     r#"{ "max_document_size": { "enabled": { "max_size": 1024 } } }"#,
/// ).unwrap();
/// assert!(matches!(
///     config.max_document_size,
///     DocumentSizeLimit::Enabled { max_size } if max_size.as_u64() == 1024
/// ));
/// ```
pub struct ParserConfig {
    /// An upper limit on the size of incoming documents.
    pub max_document_size: DocumentSizeLimit,
}

impl ParserConfig {
    /// Set the upper limit on the size of incoming documents.
    pub fn max_document_size(mut self, limit: DocumentSizeLimit) -> Self {
        self.max_document_size = limit;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// An upper limit on the size of incoming documents.
pub enum DocumentSizeLimit {
    /// There is an active limit on the size of incoming documents.
    Enabled {
        /// The maximum size of incoming documents, in bytes.
        max_size: ByteUnit,
    },
    /// There is no limit on the size of incoming documents.
    Disabled,
}

impl Default for DocumentSizeLimit {
    fn default() -> Self {
        Self::Enabled {
            max_size: 2.megabytes(),
        }
    }
}
