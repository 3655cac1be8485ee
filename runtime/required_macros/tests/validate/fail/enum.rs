use required::Validate;

#[derive(Validate)]
pub enum Shape {
    Circle,
}

fn main() {
    let _ = Shape::Circle;
}
