use crate::configuration::CompanySettings;
use actix_web::web::Data;
use actix_web::HttpResponse;

pub async fn home(company: Data<CompanySettings>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": format!("{} API", company.name),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/api/contact": "POST - Send contact form",
            "/api/career": "POST - Submit career form with CV attachment"
        }
    }))
}
