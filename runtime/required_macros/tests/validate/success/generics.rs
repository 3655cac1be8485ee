use required::{Required, Validate};

#[derive(Validate, Default)]
pub struct Envelope<T> {
    id: Required<u64>,
    payload: Required<T>,
}

#[derive(Validate, Default)]
pub struct Page<M: Validate> {
    cursor: Option<String>,
    #[required(flatten)]
    meta: M,
}

#[derive(Validate)]
pub struct Borrowed<'a> {
    name: &'a str,
    id: Required<u64>,
}

#[derive(Validate, Default)]
pub struct Meta {
    total: Required<usize>,
}

fn main() {
    let envelope = Envelope::<String> {
        id: Required::new(1),
        payload: Required::default(),
    };
    let err = required::validate(&envelope).unwrap_err();
    assert_eq!(err.to_string(), "field 'payload' in 'Envelope' is required");

    let err = required::validate(&Page::<Meta>::default()).unwrap_err();
    assert_eq!(err.to_string(), "field 'total' in 'Page' is required");

    let borrowed = Borrowed {
        name: "Saoirse",
        id: Required::new(7),
    };
    assert!(required::validate(&borrowed).is_ok());
}
