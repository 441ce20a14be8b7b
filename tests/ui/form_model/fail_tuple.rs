#[derive(Clone, contact_form::form::FormModel)]
struct Point(f32, f32);

fn main() {}
