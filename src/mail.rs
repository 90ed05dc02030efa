//! Emailing a rendered report as a PDF attachment.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, Transport};

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerConfig {
    pub host: String,
    pub port: u16,
    pub credentials: Option<SmtpCredentials>,
    /// Sender address; falls back to the SMTP user.
    pub from: Option<String>,
}

impl MailerConfig {
    /// Reads `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASSWORD` and
    /// `SMTP_FROM`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let credentials = match (get("SMTP_USER"), get("SMTP_PASSWORD")) {
            (Some(user), Some(password)) => Some(SmtpCredentials { user, password }),
            _ => None,
        };
        Self {
            host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port: get("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            credentials,
            from: get("SMTP_FROM"),
        }
    }

    pub fn sender(&self) -> Option<&str> {
        self.from
            .as_deref()
            .or(self.credentials.as_ref().map(|c| c.user.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment_name: String,
    pub attachment: Vec<u8>,
}

impl OutgoingMail {
    pub fn report(to: impl Into<String>, client_name: &str, file_name: String, pdf: Vec<u8>) -> Self {
        Self {
            to: to.into(),
            subject: format!("Chakra and Crystal Healing Report for {client_name}"),
            body: format!(
                "Hello,\n\nPlease find attached the chakra and crystal healing report for {client_name}.\n\nWith light,\nSoulful Academy"
            ),
            attachment_name: file_name,
            attachment: pdf,
        }
    }
}

pub trait MailTransport {
    fn send(&self, mail: &OutgoingMail) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    SkippedMissingCredentials,
    Failed(String),
}

/// STARTTLS SMTP relay.
pub struct SmtpMailer {
    config: MailerConfig,
}

impl SmtpMailer {
    pub fn new(config: &MailerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, String> {
        let sender = self
            .config
            .sender()
            .ok_or_else(|| "no sender address configured".to_string())?;
        let from: Mailbox = sender.parse().map_err(|err| format!("sender: {err}"))?;
        let to: Mailbox = mail.to.parse().map_err(|err| format!("recipient: {err}"))?;
        let pdf = ContentType::parse("application/pdf").map_err(|err| err.to_string())?;
        Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(mail.body.clone()))
                    .singlepart(
                        Attachment::new(mail.attachment_name.clone())
                            .body(mail.attachment.clone(), pdf),
                    ),
            )
            .map_err(|err| err.to_string())
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), String> {
        let credentials = self
            .config
            .credentials
            .as_ref()
            .ok_or_else(|| "missing smtp credentials".to_string())?;
        let message = self.build_message(mail)?;
        let transport = lettre::SmtpTransport::starttls_relay(&self.config.host)
            .map_err(|err| err.to_string())?
            .port(self.config.port)
            .credentials(Credentials::new(
                credentials.user.clone(),
                credentials.password.clone(),
            ))
            .build();
        transport.send(&message).map(|_| ()).map_err(|err| err.to_string())
    }
}

/// Sends `mail` unless credentials are missing. The transport is only built
/// once credentials are known to exist.
pub fn dispatch_report<T, F>(config: &MailerConfig, make_transport: F, mail: &OutgoingMail) -> DispatchOutcome
where
    T: MailTransport,
    F: FnOnce(&MailerConfig) -> T,
{
    if config.credentials.is_none() {
        return DispatchOutcome::SkippedMissingCredentials;
    }
    match make_transport(config).send(mail) {
        Ok(()) => DispatchOutcome::Sent,
        Err(reason) => DispatchOutcome::Failed(reason),
    }
}
