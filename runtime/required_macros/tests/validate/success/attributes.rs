use required::{Required, Validate};

#[derive(Validate, Default)]
#[required(rename = "api::Person")]
pub struct Person {
    name: Required<String>,
    #[required(skip)]
    internal_id: Required<u64>,
}

mod reexport {
    pub use required;
}

#[derive(Validate, Default)]
#[required(crate = "reexport::required")]
pub struct ThroughReexport {
    name: Required<String>,
}

fn main() {
    let err = required::validate(&Person::default()).unwrap_err();
    assert_eq!(err.to_string(), "field 'name' in 'api::Person' is required");

    let err = required::validate(&ThroughReexport::default()).unwrap_err();
    assert_eq!(err.len(), 1);
}
