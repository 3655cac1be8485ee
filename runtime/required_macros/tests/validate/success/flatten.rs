use required::{Required, Validate};

#[derive(serde::Deserialize, Validate, Default)]
pub struct Audit {
    #[serde(default)]
    author: Required<String>,
}

#[derive(serde::Deserialize, Validate, Default)]
pub struct Document {
    #[serde(default)]
    title: Required<String>,
    #[serde(flatten)]
    audit: Audit,
}

#[derive(Validate, Default)]
pub struct Explicit {
    #[required(flatten)]
    audit: Audit,
}

#[derive(serde::Deserialize, Validate, Default)]
pub struct Nested {
    #[serde(flatten)]
    document: Document,
}

fn main() {
    let names: Vec<_> = required::visible_fields(&Nested::default())
        .iter()
        .map(|f| f.name())
        .collect();
    assert_eq!(names, ["document", "title", "audit", "author"]);

    let err = required::validate(&Explicit::default()).unwrap_err();
    assert_eq!(err.to_string(), "field 'author' in 'Explicit' is required");
}
