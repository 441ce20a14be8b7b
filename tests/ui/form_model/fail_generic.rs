#[derive(Clone, contact_form::form::FormModel)]
struct Wrapper<T> {
    value: T,
}

fn main() {}
