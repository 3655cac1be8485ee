use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::capability::RequiredField;

use super::Validate;

/// Collects the fields of a [`Validate`] implementor, in declaration order.
///
/// Implementations of [`Validate::walk_fields`] report each of their fields to the walker,
/// either via [`field`](FieldWalker::field) or, for flattened members, via
/// [`embedded`](FieldWalker::embedded).
///
/// The walker resolves which fields are visible:
///
/// - a field hides any field with the same name declared at a deeper level of embedding;
/// - two fields with the same name at the same depth cancel each other out, neither is visible;
/// - an embedded member is a field in its own right, and its fields are walked one
///   level deeper whether or not the member itself ends up visible.
pub struct FieldWalker<'a> {
    path: Vec<usize>,
    cursor: usize,
    by_name: HashMap<&'static str, usize>,
    candidates: Vec<Candidate<'a>>,
}

struct Candidate<'a> {
    field: VisibleField<'a>,
    hidden: bool,
}

impl<'a> FieldWalker<'a> {
    pub(crate) fn new() -> Self {
        Self {
            path: Vec::new(),
            cursor: 0,
            by_name: HashMap::new(),
            candidates: Vec::new(),
        }
    }

    /// Report a field.
    ///
    /// `required` is `Some` if the field's type implements [`RequiredField`].
    pub fn field(&mut self, name: &'static str, required: Option<&'a dyn RequiredField>) {
        self.enter();
        self.record(name, required);
        self.path.pop();
    }

    /// Report a flattened member, whose fields are promoted into the enclosing type.
    pub fn embedded(&mut self, name: &'static str, member: &'a dyn Validate) {
        self.enter();
        self.record(name, None);
        let resume = std::mem::replace(&mut self.cursor, 0);
        member.walk_fields(self);
        self.cursor = resume;
        self.path.pop();
    }

    pub(crate) fn finish(self) -> Vec<VisibleField<'a>> {
        self.candidates
            .into_iter()
            .filter(|c| !c.hidden)
            .map(|c| c.field)
            .collect()
    }

    fn enter(&mut self) {
        self.path.push(self.cursor);
        self.cursor += 1;
    }

    fn record(&mut self, name: &'static str, required: Option<&'a dyn RequiredField>) {
        let depth = self.path.len();
        let mut add = true;
        if let Some(&previous) = self.by_name.get(name) {
            let previous = &mut self.candidates[previous];
            match depth.cmp(&previous.field.depth()) {
                Ordering::Equal => {
                    previous.hidden = true;
                    add = false;
                }
                // The new field is shallower.
                Ordering::Less => previous.hidden = true,
                Ordering::Greater => add = false,
            }
        }
        if add {
            self.by_name.insert(name, self.candidates.len());
            self.candidates.push(Candidate {
                field: VisibleField {
                    name,
                    index: self.path.clone(),
                    required,
                },
                hidden: false,
            });
        }
    }
}

/// A field that survived visibility resolution.
///
/// Check out [`visible_fields`](crate::visible_fields) for more details.
pub struct VisibleField<'a> {
    name: &'static str,
    index: Vec<usize>,
    required: Option<&'a dyn RequiredField>,
}

impl<'a> VisibleField<'a> {
    /// The name of the field, as declared in its struct.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The position of the field at each level of embedding, starting from the outermost type.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// How deeply the field is embedded. Fields declared directly on the outermost type
    /// have depth 1.
    pub fn depth(&self) -> usize {
        self.index.len()
    }

    /// The field as a [`RequiredField`], if its type implements the trait.
    pub fn required(&self) -> Option<&'a dyn RequiredField> {
        self.required
    }
}

impl fmt::Debug for VisibleField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibleField")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("populated", &self.required.map(|r| r.is_populated()))
            .finish()
    }
}
