use crate::email_client::EmailClient;
use crate::routes::iso_timestamp;
use actix_web::{web, HttpResponse};

#[derive(serde::Serialize)]
struct HealthReport {
    status: &'static str,
    timestamp: String,
    smtp_configured: bool,
}

pub async fn health_check(email_client: web::Data<EmailClient>) -> HttpResponse {
    HttpResponse::Ok().json(HealthReport {
        status: "healthy",
        timestamp: iso_timestamp(),
        smtp_configured: email_client.is_configured(),
    })
}
