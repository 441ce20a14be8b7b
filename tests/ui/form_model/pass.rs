use contact_form::form::{FieldLens, FormModel};

#[derive(Clone, contact_form::form::FormModel)]
struct DemoForm {
    #[form(name = "emailAddress")]
    email: String,
}

fn main() {
    let fields = DemoForm::fields();
    let lens = fields.email();
    let mut model = DemoForm {
        email: "a@example.com".to_string(),
    };
    lens.set(&mut model, "b@example.com".to_string());
    assert_eq!(lens.key().as_str(), "email");
    assert_eq!(lens.name(), "emailAddress");
    assert_eq!(lens.get(&model), "b@example.com");
}
