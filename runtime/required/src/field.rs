use std::any::Any;
use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::capability::{RequiredField, Settable, TypeDescriptor};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
/// A field that must be explicitly present in the incoming document.
///
/// `Required<T>` wraps a value of type `T` and keeps track of whether it was
/// populated while deserializing.
/// A field that was omitted from the document stays in its default, unpopulated state,
/// even though its type has a perfectly valid default value.
/// That's the difference between "present, but zero" and "absent".
///
/// Call [`validate`](crate::validate) after deserializing to get a report of all the
/// required fields that were left unpopulated.
///
/// # Example
///
/// ```rust
/// use required::{Required, Validate};
///
/// #[derive(serde::Deserialize, Validate)]
/// pub struct Person {
///     #[serde(default)]
///     name: Required<String>,
///     #[serde(default)]
///     age: Required<u32>,
/// }
///
/// let person: Person = serde_json::from_str(r#"{"name": "Saoirse", "age": 0}"#).unwrap();
/// assert!(person.age.is_populated());
/// assert_eq!(person.age.value(), &0);
/// assert!(required::validate(&person).is_ok());
///
/// let person: Person = serde_json::from_str(r#"{"name": "Saoirse"}"#).unwrap();
/// let err = required::validate(&person).unwrap_err();
/// assert_eq!(err.to_string(), "field 'age' in 'Person' is required");
/// ```
///
/// # Absent and `null` values
///
/// Annotate every `Required` field with `#[serde(default)]`: serde then leaves
/// the field in its default, unpopulated state when the key is absent.
/// A key that is present is decoded with `T`'s own rules, and that includes `null`:
/// a `Required<Option<T>>` holding `null` is populated with `None`, while
/// `null` for a `Required<i64>` is a deserialization error.
///
/// ```rust
/// use required::{Required, Validate};
///
/// #[derive(serde::Deserialize, Validate)]
/// pub struct Profile {
///     #[serde(default)]
///     nickname: Required<Option<String>>,
/// }
///
/// let profile: Profile = serde_json::from_str(r#"{"nickname": null}"#).unwrap();
/// assert_eq!(profile.nickname.get(), Some(&None));
///
/// let profile: Profile = serde_json::from_str("{}").unwrap();
/// assert!(profile.nickname.is_absent());
/// ```
pub struct Required<T> {
    value: T,
    populated: bool,
}

impl<T> Required<T> {
    /// A populated field holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            populated: true,
        }
    }

    /// Returns `true` if a value has been assigned to the field.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Returns `true` if the field has never been populated.
    pub fn is_absent(&self) -> bool {
        !self.populated
    }

    /// The wrapped value, whether or not the field has been populated.
    ///
    /// An unpopulated field holds the default value for `T`.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The wrapped value, if the field has been populated.
    pub fn get(&self) -> Option<&T> {
        self.populated.then_some(&self.value)
    }

    /// Consume the field, returning the wrapped value if it has been populated.
    pub fn into_inner(self) -> Option<T> {
        self.populated.then_some(self.value)
    }

    /// Assign `value` to the field and mark it as populated.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.populated = true;
    }

    /// A raw pointer to the wrapped value.
    ///
    /// Obtaining the pointer doesn't change the populated flag.
    pub fn as_ptr(&self) -> *const T {
        &self.value
    }

    /// A raw mutable pointer to the wrapped value.
    ///
    /// Writing through the pointer doesn't change the populated flag.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        &mut self.value
    }

    /// Deserialize `bytes`, a complete JSON document, into the wrapped value.
    ///
    /// On success, the field is marked as populated, even if the decoded value is
    /// `T`'s default or an explicit `null`.
    /// On failure, the deserialization error is returned as is and the field is left
    /// untouched.
    pub fn decode_json(&mut self, bytes: &[u8]) -> Result<(), serde_json::Error>
    where
        T: DeserializeOwned,
    {
        self.value = serde_json::from_slice(bytes)?;
        self.populated = true;
        Ok(())
    }
}

impl<T> From<T> for Required<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Display> fmt::Display for Required<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.populated {
            self.value.fmt(f)
        } else {
            f.write_str("N/A")
        }
    }
}

impl<T: Any> RequiredField for Required<T> {
    fn is_populated(&self) -> bool {
        self.populated
    }

    fn value(&self) -> &dyn Any {
        &self.value
    }

    fn value_mut(&mut self) -> &mut dyn Any {
        &mut self.value
    }

    fn storage_ptr(&self) -> *const () {
        self.as_ptr().cast()
    }

    fn declared_type(&self) -> TypeDescriptor {
        TypeDescriptor::of::<T>()
    }

    fn set_populated(&mut self, _populated: bool) {
        self.populated = true;
    }

    fn settable(&mut self) -> Settable<'_> {
        Settable::new(&mut self.value)
    }
}

impl<'de, T> Deserialize<'de> for Required<T>
where
    T: Deserialize<'de>,
{
    /// Decode a value that is present in the document.
    ///
    /// Absent keys never reach this method: mark the field with `#[serde(default)]`
    /// so that they leave it unpopulated.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Required::new)
    }
}

impl<T: Serialize> Serialize for Required<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.populated {
            serializer.serialize_some(&self.value)
        } else {
            serializer.serialize_none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Required;
    use crate::RequiredField;

    #[derive(serde::Deserialize, serde::Serialize, Debug)]
    struct Person {
        #[serde(default)]
        name: Required<String>,
        #[serde(default)]
        age: Required<i64>,
    }

    #[derive(serde::Deserialize, Debug)]
    struct Profile {
        #[serde(default)]
        nickname: Required<Option<String>>,
        #[serde(default)]
        tags: Required<()>,
    }

    #[test]
    fn absent_keys_leave_the_field_unpopulated() {
        let person: Person = serde_json::from_str(r#"{"name":"Saoirse"}"#).unwrap();
        assert!(person.name.is_populated());
        assert_eq!(person.name.value(), "Saoirse");
        assert!(person.age.is_absent());
        assert_eq!(person.age.get(), None);
    }

    #[test]
    fn zero_values_count_as_present() {
        let person: Person = serde_json::from_str(r#"{"name":"","age":0}"#).unwrap();
        assert!(person.name.is_populated());
        assert!(person.age.is_populated());
        assert_eq!(person.age.get(), Some(&0));
    }

    #[test]
    fn null_populates_fields_that_accept_it() {
        let profile: Profile = serde_json::from_str(r#"{"nickname":null,"tags":null}"#).unwrap();
        assert!(profile.nickname.is_populated());
        assert_eq!(profile.nickname.get(), Some(&None));
        assert!(profile.tags.is_populated());

        let profile: Profile = serde_json::from_str("{}").unwrap();
        assert!(profile.nickname.is_absent());
        assert!(profile.tags.is_absent());
    }

    #[test]
    fn null_is_rejected_by_fields_that_do_not_accept_it() {
        let outcome = serde_json::from_str::<Person>(r#"{"name":null,"age":3}"#);
        assert!(outcome.unwrap_err().is_data());
    }

    #[test]
    fn type_mismatches_are_deserialization_errors() {
        let outcome = serde_json::from_str::<Person>(r#"{"name":"Saoirse","age":"old"}"#);
        assert!(outcome.is_err());
    }

    #[test]
    fn unpopulated_fields_serialize_as_null() {
        let person = Person {
            name: Required::new("Saoirse".into()),
            age: Required::default(),
        };
        let json = serde_json::to_string(&person).unwrap();
        assert_eq!(json, r#"{"name":"Saoirse","age":null}"#);
    }

    #[test]
    fn decode_json_marks_the_field_as_populated() {
        let mut field = Required::<i64>::default();
        field.decode_json(b"0").unwrap();
        assert!(field.is_populated());
        assert_eq!(field.value(), &0);

        let mut field = Required::<Option<String>>::default();
        field.decode_json(b"null").unwrap();
        assert!(field.is_populated());
        assert_eq!(field.into_inner(), Some(None));
    }

    #[test]
    fn decode_json_failures_leave_the_field_untouched() {
        let mut field = Required::<i64>::default();
        assert!(field.decode_json(br#""not a number""#).is_err());
        assert!(field.is_absent());

        let mut field = Required::new(7i64);
        assert!(field.decode_json(b"{").is_err());
        assert!(field.is_populated());
        assert_eq!(field.value(), &7);
    }

    #[test]
    fn display_uses_a_sentinel_for_absent_values() {
        assert_eq!(Required::new(25).to_string(), "25");
        assert_eq!(Required::<u8>::default().to_string(), "N/A");
    }

    #[test]
    fn set_populated_always_marks_the_field_as_populated() {
        let mut field = Required::<String>::default();
        field.set_populated(false);
        assert!(field.is_populated());

        let mut field = Required::new(String::from("x"));
        field.set_populated(false);
        assert!(field.is_populated());
    }

    #[test]
    fn pointers_alias_the_wrapped_value() {
        let person: Person = serde_json::from_str(r#"{"name":"Saoirse"}"#).unwrap();
        let field: &dyn RequiredField = &person.name;

        let typed = field.value().downcast_ref::<String>().unwrap() as *const String;
        assert_eq!(typed, person.name.as_ptr());
        assert_eq!(field.storage_ptr(), person.name.as_ptr().cast::<()>());
        assert!(field.declared_type().is::<String>());
    }

    #[test]
    fn settable_assigns_without_marking_the_field() {
        let mut field = Required::<u32>::default();
        field.settable().set(9u32).unwrap();
        assert_eq!(field.value(), &9);
        assert!(field.is_absent());

        let erased: &mut dyn RequiredField = &mut field;
        *erased.value_mut().downcast_mut::<u32>().unwrap() = 10;
        erased.set_populated(true);
        assert_eq!(field.get(), Some(&10));
    }
}
