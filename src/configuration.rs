use crate::email_client::MailError;
use lettre::message::Mailbox;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

/// Variables injected by the hosting platform, mapped onto their settings keys.
/// They take precedence over the configuration files and `APP_*` overrides.
const PLATFORM_VARIABLES: &[(&str, &str)] = &[
    ("smtp.host", "SMTP_SERVER"),
    ("smtp.port", "SMTP_PORT"),
    ("smtp.username", "SMTP_USERNAME"),
    ("smtp.password", "SMTP_PASSWORD"),
    ("smtp.recipient", "RECIPIENT_EMAIL"),
    ("smtp.sender", "SMTP_SENDER"),
];

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub company: CompanySettings,
    pub smtp: SmtpSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Cap on bodies buffered whole (JSON and urlencoded forms).
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_body_bytes: usize,
}

/// Business identity shown by the service descriptor and in email templates.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug)]
pub struct CompanySettings {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub website: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub recipient: String,
    pub sender: Option<String>,
}

impl SmtpSettings {
    /// Sending is enabled only when both credentials are non-empty.
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.expose_secret().is_empty()
    }

    pub fn recipient(&self) -> Result<Mailbox, MailError> {
        parse_mailbox(&self.recipient)
    }

    /// Explicit sender if one is set, the SMTP login otherwise.
    pub fn sender(&self) -> Result<Mailbox, MailError> {
        match self.sender.as_deref() {
            Some(sender) if !sender.is_empty() => parse_mailbox(sender),
            _ => parse_mailbox(&self.username),
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|_| MailError::InvalidAddress(address.to_owned()))
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let mut builder = config::Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 5000)?
        .set_default("application.max_body_bytes", 32 * 1024 * 1024)?
        .set_default("smtp.host", "smtp.gmail.com")?
        .set_default("smtp.port", 587)?
        .set_default("smtp.username", "")?
        .set_default("smtp.password", "")?
        .set_default("smtp.recipient", "info@rak.com.sa")?
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        // E.g. `APP_SMTP__PORT=2525` sets `Settings.smtp.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

    for (key, variable) in PLATFORM_VARIABLES {
        if let Ok(value) = std::env::var(variable) {
            builder = builder.set_override(*key, value)?;
        }
    }

    builder.build()?.try_deserialize::<Settings>()
}
