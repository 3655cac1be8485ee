use required::Validate;

#[derive(Validate)]
pub struct Point(pub u8, pub u8);

fn main() {
    let point = Point(1, 2);
    assert_eq!(point.0 + point.1, 3);
}
