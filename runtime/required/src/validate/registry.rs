use std::any::{Any, TypeId};

use super::errors::{BadType, ValidateAnyError, ValidationErrors};
use super::{Validate, validate};

#[doc(hidden)]
/// A type that derived [`Validate`], registered at link time so that it can be
/// looked up by [`validate_any`].
pub struct Registration {
    type_id: fn() -> TypeId,
    validate: fn(&dyn Any) -> Option<Result<(), ValidationErrors>>,
}

impl Registration {
    pub const fn of<T: Validate + Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>,
            validate: validate_erased::<T>,
        }
    }
}

inventory::collect!(Registration);

fn validate_erased<T: Validate + Any>(target: &dyn Any) -> Option<Result<(), ValidationErrors>> {
    target.downcast_ref::<T>().map(validate)
}

/// Validate a value whose type is only known at runtime.
///
/// This is the dynamic counterpart of [`validate`]: it accepts a value of any type,
/// and looks up its field walk among the types that `#[derive(Validate)]`.
///
/// It fails with [`BadType`] if `T` isn't one of them.
/// Generic types are never registered, and neither are types that implement
/// [`Validate`] by hand: use [`validate`] for those.
///
/// # Example
///
/// ```rust
/// use required::{Required, Validate, ValidateAnyError};
///
/// #[derive(serde::Deserialize, Validate)]
/// pub struct Person {
///     #[serde(default)]
///     name: Required<String>,
/// }
///
/// let person: Person = serde_json::from_str("{}").unwrap();
/// assert!(matches!(required::validate_any(&person), Err(ValidateAnyError::Missing(_))));
///
/// let err = required::validate_any(&42u8).unwrap_err();
/// assert_eq!(err.to_string(), "bad type: u8");
/// ```
pub fn validate_any<T: Any>(target: &T) -> Result<(), ValidateAnyError> {
    let type_id = TypeId::of::<T>();
    let bad_type = || BadType {
        type_name: std::any::type_name::<T>(),
    };
    let registration = inventory::iter::<Registration>
        .into_iter()
        .find(|r| (r.type_id)() == type_id)
        .ok_or_else(bad_type)?;
    match (registration.validate)(target) {
        Some(outcome) => Ok(outcome?),
        None => Err(bad_type().into()),
    }
}
