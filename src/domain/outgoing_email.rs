use crate::email_client::MailError;
use lettre::message::header::{ContentDisposition, ContentTransferEncoding, ContentType};
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::Message;

/// A binary file attached to an outgoing email.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
}

/// An email ready to be handed to the relay.
///
/// A plain-text body is mandatory; HTML and a single attachment are optional.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    subject: String,
    plain_body: String,
    html_body: Option<String>,
    attachment: Option<EmailAttachment>,
}

impl OutgoingEmail {
    pub fn new(subject: impl Into<String>, plain_body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            plain_body: plain_body.into(),
            html_body: None,
            attachment: None,
        }
    }

    pub fn with_html(mut self, html_body: impl Into<String>) -> Self {
        self.html_body = Some(html_body.into());
        self
    }

    pub fn with_attachment(mut self, attachment: EmailAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn plain_body(&self) -> &str {
        &self.plain_body
    }

    pub fn html_body(&self) -> Option<&str> {
        self.html_body.as_deref()
    }

    pub fn attachment(&self) -> Option<&EmailAttachment> {
        self.attachment.as_ref()
    }

    /// Assemble the MIME message.
    ///
    /// With an HTML body the text parts form a `multipart/alternative`;
    /// otherwise the plain part goes straight into a `multipart/mixed`
    /// next to the attachment, if there is one.
    pub fn into_message(self, from: Mailbox, to: Mailbox) -> Result<Message, MailError> {
        let builder = Message::builder().from(from).to(to).subject(self.subject);
        let body = match (self.html_body, self.attachment) {
            (Some(html), None) => MultiPart::alternative_plain_html(self.plain_body, html),
            (Some(html), Some(attachment)) => MultiPart::mixed()
                .multipart(MultiPart::alternative_plain_html(self.plain_body, html))
                .singlepart(attachment_part(attachment)?),
            (None, attachment) => {
                let mixed = MultiPart::mixed().singlepart(SinglePart::plain(self.plain_body));
                match attachment {
                    Some(attachment) => mixed.singlepart(attachment_part(attachment)?),
                    None => mixed,
                }
            }
        };
        builder
            .multipart(body)
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

// Always octet-stream and base64, whatever the file really is
fn attachment_part(attachment: EmailAttachment) -> Result<SinglePart, MailError> {
    let content_type = ContentType::parse("application/octet-stream")
        .map_err(|e| MailError::Build(e.to_string()))?;
    Ok(SinglePart::builder()
        .header(content_type)
        .header(ContentDisposition::attachment(&attachment.filename))
        .header(ContentTransferEncoding::Base64)
        .body(attachment.content))
}
