use crate::configuration::SmtpSettings;
use crate::domain::OutgoingEmail;
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("SMTP error")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Something that can push a finished message to a mail server.
#[async_trait]
pub trait MailRelay: Send + Sync + 'static {
    async fn deliver(&self, message: Message) -> Result<(), MailError>;
}

/// Delivers through an SMTP relay.
///
/// No connection pooling: every message opens its own connection, upgrades
/// it with STARTTLS when the server offers it, authenticates, sends and quits.
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let tls = TlsParameters::new(settings.host.clone())?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(Tls::Opportunistic(tls))
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.expose_secret().clone(),
            ))
            .build();
        Ok(Self { transport })
    }
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn deliver(&self, message: Message) -> Result<(), MailError> {
        self.transport.send(message).await?;
        Ok(())
    }
}

/// How an attempt to email a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// No SMTP credentials configured, nothing was attempted.
    Skipped,
    Sent,
    Failed,
}

impl DeliveryOutcome {
    pub fn email_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent)
    }
}

pub struct EmailClient {
    settings: SmtpSettings,
    recipient: Mailbox,
    relay: Arc<dyn MailRelay>,
}

impl EmailClient {
    pub fn new(settings: SmtpSettings, relay: Arc<dyn MailRelay>) -> Result<Self, MailError> {
        let recipient = settings.recipient()?;
        Ok(Self {
            settings,
            recipient,
            relay,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    /// Make a single delivery attempt. Failures are logged and folded into
    /// the outcome, they never reach the caller as errors.
    #[tracing::instrument(
        name = "Sending an email",
        skip(self, email),
        fields(subject = %email.subject(), outcome = tracing::field::Empty)
    )]
    pub async fn send_email(&self, email: OutgoingEmail) -> DeliveryOutcome {
        let outcome = if !self.is_configured() {
            tracing::warn!("SMTP credentials not configured. Email not sent.");
            DeliveryOutcome::Skipped
        } else {
            match self.try_send(email).await {
                Ok(()) => DeliveryOutcome::Sent,
                Err(e) => {
                    tracing::error!(error.cause_chain = ?e, error.message = %e, "Error sending email");
                    DeliveryOutcome::Failed
                }
            }
        };
        tracing::Span::current().record("outcome", &tracing::field::debug(outcome));
        outcome
    }

    async fn try_send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let sender = self.settings.sender()?;
        let message = email.into_message(sender, self.recipient.clone())?;
        self.relay.deliver(message).await
    }
}
