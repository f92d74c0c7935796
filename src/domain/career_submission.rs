use crate::domain::{FormFields, MissingField};

/// A file uploaded with a career application. Size and type are not checked.
#[derive(Debug, Clone)]
pub struct CvFile {
    pub filename: String,
    pub content: Vec<u8>,
}

/// A job application, with an optional CV attached.
#[derive(Debug, Clone)]
pub struct CareerSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub years_experience: String,
    pub about: Option<String>,
    pub cv: Option<CvFile>,
}

impl CareerSubmission {
    pub const REQUIRED_FIELDS: &'static [&'static str] =
        &["full_name", "email", "phone", "position", "years_experience"];

    pub fn parse(mut fields: FormFields, cv: Option<CvFile>) -> Result<Self, MissingField> {
        if let Some(missing) = fields.first_missing(Self::REQUIRED_FIELDS) {
            return Err(MissingField(missing));
        }
        Ok(Self {
            full_name: fields.take("full_name")?,
            email: fields.take("email")?,
            phone: fields.take("phone")?,
            position: fields.take("position")?,
            years_experience: fields.take("years_experience")?,
            about: fields.take_optional("message"),
            cv,
        })
    }
}

impl TryFrom<FormFields> for CareerSubmission {
    type Error = MissingField;

    fn try_from(fields: FormFields) -> Result<Self, Self::Error> {
        Self::parse(fields, None)
    }
}
