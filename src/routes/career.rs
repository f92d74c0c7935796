use crate::composer::EmailComposer;
use crate::domain::{CareerSubmission, CvFile, FormFields};
use crate::email_client::EmailClient;
use crate::routes::{parse_urlencoded_fields, read_body, SubmissionError};
use crate::startup::BodyLimit;
use actix_multipart::Multipart;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use anyhow::Context;
use futures_util::TryStreamExt;

//region Structs & implementations
#[derive(serde::Serialize)]
struct CareerAccepted {
    status: &'static str,
    message: &'static str,
    email_sent: bool,
}
//endregion

//region HTTP handlers
#[tracing::instrument(
    name = "Handling a career application",
    skip(request, payload, body_limit, composer, email_client),
    fields(position = tracing::field::Empty, email_sent = tracing::field::Empty)
)]
pub async fn career(
    request: HttpRequest,
    payload: web::Payload,
    body_limit: web::Data<BodyLimit>,
    composer: web::Data<EmailComposer>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, SubmissionError> {
    // Plain forms carry no files, so they never have a CV
    let (fields, cv) = if request.content_type() == "application/x-www-form-urlencoded" {
        let body = read_body(payload, body_limit.0).await?;
        (parse_urlencoded_fields(&body)?, None)
    } else {
        read_career_form(Multipart::new(request.headers(), payload))
            .await
            .map_err(SubmissionError::MalformedPayload)?
    };
    let submission = CareerSubmission::parse(fields, cv)?;
    let span = tracing::Span::current();
    span.record("position", &tracing::field::display(&submission.position));

    let email = composer
        .career_email(submission)
        .context("Failed to render the career application email")?;
    let outcome = email_client.send_email(email).await;
    span.record("email_sent", &outcome.email_sent());

    Ok(HttpResponse::Ok().json(CareerAccepted {
        status: "success",
        message: "Career form submitted",
        email_sent: outcome.email_sent(),
    }))
}
//endregion

//region Helper functions
/// Drain the multipart stream into text fields and the uploaded CV.
///
/// Parts carrying a filename are uploads and never satisfy a text field.
/// Only the first non-empty `cv` upload is kept.
#[tracing::instrument(name = "Reading career form", skip(payload))]
async fn read_career_form(
    mut payload: Multipart,
) -> Result<(FormFields, Option<CvFile>), anyhow::Error> {
    let mut fields = FormFields::default();
    let mut cv = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?
    {
        let disposition = field.content_disposition().clone();
        let name = disposition.get_name().unwrap_or_default().to_owned();

        let mut content = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to read form part `{}`", name))?
        {
            content.extend_from_slice(&chunk);
        }

        match disposition.get_filename() {
            Some(filename) => {
                if name == "cv" && cv.is_none() && !filename.is_empty() {
                    cv = Some(CvFile {
                        filename: filename.to_owned(),
                        content,
                    });
                }
            }
            None => fields.insert(name, String::from_utf8_lossy(&content)),
        }
    }
    Ok((fields, cv))
}
//endregion
