use crate::composer::EmailComposer;
use crate::configuration::{CompanySettings, Settings};
use crate::email_client::{EmailClient, MailRelay, SmtpRelay};
use crate::routes::{career, contact, health_check, home};
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let relay = SmtpRelay::new(&configuration.smtp)?;
        Self::build_with_relay(configuration, Arc::new(relay)).await
    }

    /// Same as [`Application::build`], delivering mail through `relay`.
    pub async fn build_with_relay(
        configuration: Settings,
        relay: Arc<dyn MailRelay>,
    ) -> Result<Self, anyhow::Error> {
        let email_client = EmailClient::new(configuration.smtp.clone(), relay)?;
        let composer = EmailComposer::new(configuration.company.clone())?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        tracing::info!(
            %address,
            smtp_configured = email_client.is_configured(),
            "Starting form relay"
        );

        let server = run(
            listener,
            email_client,
            composer,
            configuration.company,
            configuration.application.max_body_bytes,
        )?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Largest request body a handler will buffer in memory.
#[derive(Debug, Clone, Copy)]
pub struct BodyLimit(pub usize);

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    composer: EmailComposer,
    company: CompanySettings,
    max_body_bytes: usize,
) -> Result<Server, anyhow::Error> {
    let email_client = Data::new(email_client);
    let composer = Data::new(composer);
    let company = Data::new(company);
    let body_limit = Data::new(BodyLimit(max_body_bytes));
    let server = HttpServer::new(move || {
        App::new()
            // Middleware
            .wrap(TracingLogger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .route("/", web::get().to(home))
            .route("/api/health", web::get().to(health_check))
            .route("/api/contact", web::post().to(contact))
            .route("/api/career", web::post().to(career))
            .app_data(email_client.clone())
            .app_data(composer.clone())
            .app_data(company.clone())
            .app_data(body_limit.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
