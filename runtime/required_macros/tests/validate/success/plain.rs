use required::{Required, Validate};

#[derive(serde::Deserialize, Validate)]
pub struct Person {
    #[serde(default)]
    name: Required<String>,
    #[serde(default)]
    age: Required<u8>,
    nickname: Option<String>,
}

#[derive(Validate)]
struct NoRequiredFields {
    a: u64,
    b: Vec<String>,
}

#[derive(Validate)]
struct Empty {}

#[derive(Validate)]
struct FullyQualified {
    id: required::Required<u64>,
    r#type: Required<String>,
}

fn main() {
    let person = Person {
        name: Required::new("Saoirse".into()),
        age: Required::default(),
        nickname: None,
    };
    assert_eq!(person.type_name(), "Person");
    assert!(required::validate(&person).is_err());
    assert!(
        required::validate(&NoRequiredFields {
            a: 0,
            b: Vec::new()
        })
        .is_ok()
    );
    assert!(required::validate(&Empty {}).is_ok());

    let qualified = FullyQualified {
        id: Required::new(1),
        r#type: Required::default(),
    };
    let err = required::validate(&qualified).unwrap_err();
    assert_eq!(err.to_string(), "field 'type' in 'FullyQualified' is required");
}
