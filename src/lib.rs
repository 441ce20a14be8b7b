pub mod components;
pub mod contact;
pub mod contracts;
pub mod form;
pub mod id;

pub use contact::{ContactForm, ContactFormModel, Submission};
