//! The capability contract that the validator checks fields against.
use std::any::{Any, TypeId};
use std::fmt;

/// A field that must be explicitly present in an incoming document.
///
/// [`validate`](crate::validate) doesn't look for [`Required`](crate::Required) by name:
/// any field whose type implements [`RequiredField`] is recognised and checked.
/// [`Required`](crate::Required) is the implementation you'll use most of the time,
/// but you're free to provide your own.
///
/// The trait is object safe: the validator works with `&dyn RequiredField`.
pub trait RequiredField {
    /// Returns `true` if a value has been assigned to the field.
    fn is_populated(&self) -> bool;

    /// The wrapped value, type-erased.
    ///
    /// It's returned whether or not the field has been populated.
    /// Check [`is_populated`](RequiredField::is_populated) first.
    fn value(&self) -> &dyn Any;

    /// A mutable reference to the wrapped value, type-erased.
    ///
    /// Writing through this reference does **not** mark the field as populated.
    fn value_mut(&mut self) -> &mut dyn Any;

    /// The untyped address of the storage backing the wrapped value.
    ///
    /// This is an escape hatch for low-level utilities that need to alias the storage
    /// across layout-compatible types.
    /// Obtaining the pointer is safe; dereferencing it is not. Callers must
    /// check [`declared_type`](RequiredField::declared_type) and uphold Rust's aliasing
    /// rules on their own.
    fn storage_ptr(&self) -> *const ();

    /// The declared type of the wrapped value.
    fn declared_type(&self) -> TypeDescriptor;

    /// Mark the field as populated.
    ///
    /// The argument is ignored: the field is **always** marked as populated.
    /// Treat this as a one-way "mark valid" latch, not as a general setter.
    fn set_populated(&mut self, populated: bool);

    /// A handle to assign a new value directly, bypassing deserialization.
    fn settable(&mut self) -> Settable<'_>;
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
/// A description of the type wrapped by a [`RequiredField`].
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// The descriptor for `T`.
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The [`TypeId`] of the described type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The name of the described type, as returned by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if `T` is the described type.
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeDescriptor").field(&self.name).finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A mutable handle to the storage of a [`RequiredField`].
///
/// Assignments go straight into the wrapped value.
/// They never change the populated flag: use [`RequiredField::set_populated`] if
/// the field should be considered present afterwards.
pub struct Settable<'a> {
    slot: &'a mut dyn Slot,
    declared: TypeDescriptor,
}

impl<'a> Settable<'a> {
    /// Build a handle for the given storage.
    pub fn new<T: Any>(slot: &'a mut T) -> Self {
        Self {
            slot,
            declared: TypeDescriptor::of::<T>(),
        }
    }

    /// The type of the values that can be assigned through this handle.
    pub fn declared_type(&self) -> TypeDescriptor {
        self.declared
    }

    /// Assign `value` to the underlying storage.
    ///
    /// Fails if `V` isn't the declared type.
    pub fn set<V: Any>(self, value: V) -> Result<(), TypeMismatch> {
        match self.slot.as_any_mut().downcast_mut::<V>() {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(TypeMismatch {
                expected: self.declared.name(),
                actual: std::any::type_name::<V>(),
            }),
        }
    }

    /// Assign a boxed, type-erased value to the underlying storage.
    ///
    /// If the boxed value isn't of the declared type, it's handed back unchanged.
    pub fn set_boxed(self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        self.slot.assign_boxed(value)
    }

    /// A type-erased mutable reference to the underlying storage.
    pub fn into_any(self) -> &'a mut dyn Any {
        self.slot.as_any_mut()
    }
}

impl fmt::Debug for Settable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settable")
            .field("declared", &self.declared)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("A value of type `{actual}` can't be assigned to a field of type `{expected}`")]
#[non_exhaustive]
/// The value passed to [`Settable::set`] doesn't match the declared type of the field.
pub struct TypeMismatch {
    /// The declared type of the field.
    pub expected: &'static str,
    /// The type of the value that was rejected.
    pub actual: &'static str,
}

trait Slot {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn assign_boxed(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;
}

impl<T: Any> Slot for T {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_boxed(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        *self = *value.downcast::<T>()?;
        Ok(())
    }
}
