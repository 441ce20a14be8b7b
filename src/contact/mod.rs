mod model;
mod submission;
mod view;


pub use model::{
    ContactFormModel, ContactFormModelFields, FIRST_NAME_MIN_CHARS, contact_form_controller,
};
pub use submission::{Submission, SubmissionSlot, latest_submission, store_submission};
pub use view::{ContactForm, release_form_state};
