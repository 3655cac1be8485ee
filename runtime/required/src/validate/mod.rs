//! Check that every required field of a decoded value has been populated.
//!
//! [`validate`] is the key function in this module.
pub use errors::{BadType, MissingField, ValidateAnyError, ValidationErrors};
pub use registry::validate_any;
#[doc(hidden)]
pub use registry::Registration;
pub use walker::{FieldWalker, VisibleField};

pub mod errors;
mod registry;
mod walker;

/// A type whose fields can be walked by [`validate`].
///
/// You'll rarely implement this trait by hand: use `#[derive(Validate)]` instead.
///
/// # Deriving
///
/// The derive macro supports structs with named fields.
/// Every field whose type implements [`RequiredField`](crate::RequiredField) is checked;
/// all other fields are ignored.
///
/// ```rust
/// use required::{Required, Validate};
///
/// #[derive(serde::Deserialize, Validate)]
/// pub struct Address {
///     #[serde(default)]
///     street: Required<String>,
///     // Not required, never reported.
///     notes: Option<String>,
/// }
///
/// #[derive(serde::Deserialize, Validate)]
/// pub struct Customer {
///     #[serde(default)]
///     name: Required<String>,
///     // The fields of `Address` are checked as if they were declared on `Customer`.
///     #[serde(flatten)]
///     address: Address,
/// }
///
/// let customer: Customer = serde_json::from_str(r#"{"name": "Aoife"}"#).unwrap();
/// let err = required::validate(&customer).unwrap_err();
/// assert_eq!(err.to_string(), "field 'street' in 'Customer' is required");
/// ```
///
/// The following attributes are available:
///
/// - `#[required(flatten)]` on a field: walk the field as an embedded member, even
///   without `#[serde(flatten)]`;
/// - `#[required(skip)]` on a field: leave the field out of the walk entirely;
/// - `#[required(rename = "Name")]` on the struct: the type name used in error messages.
///   It defaults to the struct identifier;
/// - `#[required(crate = "path")]` on the struct: the path to this crate, if it isn't
///   available as `::required`.
///
/// # Implementing by hand
///
/// ```rust
/// use required::{FieldWalker, Required, Validate};
///
/// pub struct Login {
///     user: Required<String>,
///     password: Required<String>,
///     remember_me: bool,
/// }
///
/// impl Validate for Login {
///     fn type_name(&self) -> &'static str {
///         "Login"
///     }
///
///     fn walk_fields<'a>(&'a self, walker: &mut FieldWalker<'a>) {
///         walker.field("user", Some(&self.user));
///         walker.field("password", Some(&self.password));
///         walker.field("remember_me", None);
///     }
/// }
/// ```
pub trait Validate {
    /// The name of the type, as it should appear in error messages.
    fn type_name(&self) -> &'static str;

    /// Report each field to the `walker`, in declaration order.
    fn walk_fields<'a>(&'a self, walker: &mut FieldWalker<'a>);
}

/// Check that every required field of `target` has been populated.
///
/// All visible fields are inspected, including those promoted from flattened members.
/// Each required field that hasn't been populated is reported as a [`MissingField`],
/// and they're all returned together in a single [`ValidationErrors`].
///
/// `target` is never modified.
pub fn validate<T: Validate + ?Sized>(target: &T) -> Result<(), ValidationErrors> {
    let type_name = target.type_name();
    visible_fields(target)
        .into_iter()
        .filter(|f| f.required().is_some_and(|r| !r.is_populated()))
        .map(|f| MissingField {
            field: f.name(),
            type_name,
        })
        .collect::<ValidationErrors>()
        .into_result()
}

/// The fields of `target` that are visible from the outermost type, in declaration order.
///
/// Fields of flattened members are included, one level deeper.
/// Shadowed fields, as well as same-depth fields that clash, are left out.
/// Check out [`FieldWalker`] for the exact rules.
pub fn visible_fields<T: Validate + ?Sized>(target: &T) -> Vec<VisibleField<'_>> {
    let mut walker = FieldWalker::new();
    target.walk_fields(&mut walker);
    walker.finish()
}
