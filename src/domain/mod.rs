mod career_submission;
mod contact_submission;
mod form_fields;
mod outgoing_email;

pub use career_submission::{CareerSubmission, CvFile};
pub use contact_submission::ContactSubmission;
pub use form_fields::{FormFields, MissingField};
pub use outgoing_email::{EmailAttachment, OutgoingEmail};
