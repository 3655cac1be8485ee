//! Items used by the code generated by `#[derive(Validate)]`.
//! They are not part of the public API.
use crate::capability::RequiredField;

pub use crate::validate::Registration;
pub use inventory;

/// Wraps a reference to a field to find out, at compile time, whether its type
/// implements [`RequiredField`].
///
/// The generated code calls `(&Probe(&field)).required_field()`:
/// method resolution picks [`RequiredProbe`] if the field type implements
/// [`RequiredField`], and falls back to [`PlainProbe`] otherwise.
pub struct Probe<'a, T>(pub &'a T);

pub trait RequiredProbe<'a> {
    fn required_field(&self) -> Option<&'a dyn RequiredField>;
}

impl<'a, T: RequiredField> RequiredProbe<'a> for Probe<'a, T> {
    fn required_field(&self) -> Option<&'a dyn RequiredField> {
        Some(self.0)
    }
}

pub trait PlainProbe<'a> {
    fn required_field(&self) -> Option<&'a dyn RequiredField>;
}

impl<'a, T> PlainProbe<'a> for &Probe<'a, T> {
    fn required_field(&self) -> Option<&'a dyn RequiredField> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{PlainProbe as _, Probe, RequiredProbe as _};
    use crate::Required;

    #[test]
    fn probe_recognises_required_fields() {
        let populated = Required::new(3u8);
        let plain = 3u8;
        let wrapped = Some(Required::new(3u8));

        assert!((&Probe(&populated)).required_field().is_some());
        assert!((&Probe(&plain)).required_field().is_none());
        assert!((&Probe(&wrapped)).required_field().is_none());
    }
}
