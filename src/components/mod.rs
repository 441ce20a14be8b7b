mod button;
mod edit;
mod layout;
mod text_input;
mod textarea;

pub use button::Button;
pub use edit::{EditOutcome, apply_keystroke};
pub use layout::Stack;
pub use text_input::TextInput;
pub use textarea::Textarea;
