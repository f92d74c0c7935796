use crate::domain::{FormFields, MissingField};

/// A general contact inquiry from the website.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ContactSubmission {
    pub company_name: String,
    pub services: String,
    pub contact_name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub const REQUIRED_FIELDS: &'static [&'static str] =
        &["company_name", "services", "contact_name", "email", "message"];
}

impl TryFrom<FormFields> for ContactSubmission {
    type Error = MissingField;

    fn try_from(mut fields: FormFields) -> Result<Self, Self::Error> {
        if let Some(missing) = fields.first_missing(Self::REQUIRED_FIELDS) {
            return Err(MissingField(missing));
        }
        Ok(Self {
            company_name: fields.take("company_name")?,
            services: fields.take("services")?,
            contact_name: fields.take("contact_name")?,
            email: fields.take("email")?,
            message: fields.take("message")?,
        })
    }
}
