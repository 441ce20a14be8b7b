#[derive(Clone, contact_form::form::FormModel)]
enum Mode {
    Active,
}

fn main() {}
