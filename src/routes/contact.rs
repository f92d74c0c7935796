use crate::composer::EmailComposer;
use crate::domain::ContactSubmission;
use crate::email_client::EmailClient;
use crate::routes::{iso_timestamp, parse_json_fields, read_body, SubmissionError};
use crate::startup::BodyLimit;
use actix_web::{web, HttpResponse};
use anyhow::Context;

//region Structs & implementations
#[derive(serde::Serialize)]
struct ContactAccepted {
    status: &'static str,
    message: &'static str,
    email_sent: bool,
    data: ContactSummary,
}

#[derive(serde::Serialize)]
struct ContactSummary {
    company_name: String,
    contact_name: String,
    email: String,
    timestamp: String,
}
//endregion

//region HTTP handlers
#[tracing::instrument(
    name = "Handling a contact request",
    skip(payload, body_limit, composer, email_client),
    fields(company_name = tracing::field::Empty, email_sent = tracing::field::Empty)
)]
pub async fn contact(
    payload: web::Payload,
    body_limit: web::Data<BodyLimit>,
    composer: web::Data<EmailComposer>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, SubmissionError> {
    let body = read_body(payload, body_limit.0).await?;
    let submission = ContactSubmission::try_from(parse_json_fields(&body)?)?;
    let span = tracing::Span::current();
    span.record("company_name", &tracing::field::display(&submission.company_name));

    let email = composer
        .contact_email(&submission)
        .context("Failed to render the contact request email")?;
    let outcome = email_client.send_email(email).await;
    span.record("email_sent", &outcome.email_sent());

    let ContactSubmission {
        company_name,
        contact_name,
        email,
        ..
    } = submission;
    Ok(HttpResponse::Ok().json(ContactAccepted {
        status: "success",
        message: "Contact form submitted successfully",
        email_sent: outcome.email_sent(),
        data: ContactSummary {
            company_name,
            contact_name,
            email,
            timestamp: iso_timestamp(),
        },
    }))
}
//endregion
