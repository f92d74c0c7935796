mod career;
mod contact;
mod health_check;
mod home;

pub use career::*;
pub use contact::*;
pub use health_check::*;
pub use home::*;

use crate::domain::{FormFields, MissingField};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use futures_util::TryStreamExt;
use std::fmt::Formatter;

//region SubmissionError & Implementations
#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    ValidationError(#[from] MissingField),
    #[error("Malformed request payload")]
    MalformedPayload(#[source] anyhow::Error),
    #[error("Request payload exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(serde::Serialize)]
struct ErrorBody {
    status: &'static str,
    error: String,
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::ValidationError(_)
            | SubmissionError::MalformedPayload(_)
            | SubmissionError::PayloadTooLarge(_) => StatusCode::BAD_REQUEST,
            SubmissionError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal failure details stay in the logs
        let error = match self {
            SubmissionError::UnexpectedError(_) => {
                "An unexpected error occurred while processing the submission".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            status: "error",
            error,
        })
    }
}
//endregion

//region Helper functions
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Local time with microseconds, e.g. `2024-03-09T14:05:07.123456`.
pub fn iso_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Buffer a whole request body, refusing anything past `limit` bytes.
async fn read_body(
    mut payload: web::Payload,
    limit: usize,
) -> Result<web::BytesMut, SubmissionError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload
        .try_next()
        .await
        .map_err(|e| SubmissionError::MalformedPayload(anyhow::anyhow!("{}", e)))?
    {
        if body.len() + chunk.len() > limit {
            return Err(SubmissionError::PayloadTooLarge(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn parse_json_fields(body: &[u8]) -> Result<FormFields, SubmissionError> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(body)
        .context("The request body is not a JSON object")
        .map_err(SubmissionError::MalformedPayload)?;
    Ok(object.into())
}

fn parse_urlencoded_fields(body: &[u8]) -> Result<FormFields, SubmissionError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .context("The request body is not a urlencoded form")
        .map_err(SubmissionError::MalformedPayload)?;
    let mut fields = FormFields::default();
    for (name, value) in pairs {
        fields.insert(name, value);
    }
    Ok(fields)
}
//endregion
