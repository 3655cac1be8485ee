//! Errors that can occur while validating a decoded value.
use std::fmt::{self, Display};

use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{field}' in '{type_name}' is required")]
#[non_exhaustive]
/// A required field was never populated.
pub struct MissingField {
    /// The name of the field, as declared in its struct.
    pub field: &'static str,
    /// The name of the type that was validated.
    ///
    /// For fields promoted from a flattened member, this is the outer type.
    pub type_name: &'static str,
}

/// A collection of [`MissingField`] errors, one for each required field that wasn't populated.
///
/// Validation never stops at the first missing field: all of them are reported **at once**.
///
/// The `Display` representation joins the message of each error with a newline.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    items: SmallVec<[MissingField; 4]>,
}

impl ValidationErrors {
    /// Create a new, empty collection.
    pub fn new() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }

    /// Returns `true` if there are no errors in the collection.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of errors that have been collected so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Add a new error to the collection.
    pub fn push(&mut self, e: MissingField) {
        self.items.push(e);
    }

    /// Returns an iterator over the collected errors, in the order they were added.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MissingField> {
        self.items.iter()
    }

    /// The names of the fields that are missing, in the order they were reported.
    pub fn missing_fields(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.items.iter().map(|e| e.field)
    }

    /// `Ok(())` if the collection is empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = self.items.iter();
        let Some(first) = items.next() else {
            return write!(f, "No missing required fields");
        };
        write!(f, "{first}")?;
        for e in items {
            write!(f, "\n{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.items
            .first()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl IntoIterator for ValidationErrors {
    type Item = MissingField;
    type IntoIter = smallvec::IntoIter<[MissingField; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a MissingField;
    type IntoIter = std::slice::Iter<'a, MissingField>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<MissingField> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = MissingField>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bad type: {type_name}")]
#[non_exhaustive]
/// [`validate_any`](crate::validate_any) was handed a value whose type doesn't
/// derive [`Validate`](crate::Validate).
pub struct BadType {
    /// The name of the offending type.
    pub type_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`validate_any`](crate::validate_any).
pub enum ValidateAnyError {
    #[error(transparent)]
    /// See [`BadType`] for details.
    BadType(#[from] BadType),
    #[error(transparent)]
    /// See [`ValidationErrors`] for details.
    Missing(#[from] ValidationErrors),
}
