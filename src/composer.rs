use crate::configuration::CompanySettings;
use crate::domain::{CareerSubmission, ContactSubmission, EmailAttachment, OutgoingEmail};
use chrono::{DateTime, Local};
use tera::{Context, Tera};

const CONTACT_HTML: &str = "contact_email.html";
const CONTACT_TEXT: &str = "contact_email.txt";
const CAREER_TEXT: &str = "career_email.txt";

/// Renders submissions into emails for the staff mailbox.
///
/// Templates are compiled into the binary. The `.html` template is
/// autoescaped by Tera, the `.txt` ones are rendered verbatim.
pub struct EmailComposer {
    tera: Tera,
    company: CompanySettings,
}

impl EmailComposer {
    pub fn new(company: CompanySettings) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                CONTACT_HTML,
                include_str!("../templates/contact_email.html"),
            ),
            (CONTACT_TEXT, include_str!("../templates/contact_email.txt")),
            (CAREER_TEXT, include_str!("../templates/career_email.txt")),
        ])?;
        Ok(Self { tera, company })
    }

    pub fn contact_email(&self, submission: &ContactSubmission) -> Result<OutgoingEmail, tera::Error> {
        self.contact_email_at(submission, Local::now())
    }

    pub fn contact_email_at(
        &self,
        submission: &ContactSubmission,
        received_at: DateTime<Local>,
    ) -> Result<OutgoingEmail, tera::Error> {
        let mut context = self.context(received_at);
        context.insert("submission", submission);

        let subject = format!("New Contact Request from {}", submission.company_name);
        let plain_body = self.tera.render(CONTACT_TEXT, &context)?;
        let html_body = self.tera.render(CONTACT_HTML, &context)?;
        Ok(OutgoingEmail::new(subject, plain_body).with_html(html_body))
    }

    pub fn career_email(&self, submission: CareerSubmission) -> Result<OutgoingEmail, tera::Error> {
        self.career_email_at(submission, Local::now())
    }

    pub fn career_email_at(
        &self,
        submission: CareerSubmission,
        received_at: DateTime<Local>,
    ) -> Result<OutgoingEmail, tera::Error> {
        let mut context = self.context(received_at);
        context.insert("full_name", &submission.full_name);
        context.insert("email", &submission.email);
        context.insert("phone", &submission.phone);
        context.insert("position", &submission.position);
        context.insert("years_experience", &submission.years_experience);
        context.insert("about", submission.about.as_deref().unwrap_or_default());

        let subject = format!(
            "New Career Application: {} - {}",
            submission.full_name, submission.position
        );
        let plain_body = self.tera.render(CAREER_TEXT, &context)?;
        let email = OutgoingEmail::new(subject, plain_body);
        Ok(match submission.cv {
            Some(cv) => email.with_attachment(EmailAttachment {
                filename: cv.filename,
                content: cv.content,
            }),
            None => email,
        })
    }

    fn context(&self, received_at: DateTime<Local>) -> Context {
        let mut context = Context::new();
        context.insert("company", &self.company);
        context.insert(
            "received_at",
            &received_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        context
    }
}
