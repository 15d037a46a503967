use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, info};

use crate::config::{DEFAULT_SMTP_PORT, MailConfig};
use crate::error::MailError;

/// Outbound mail delivery. Implementations block until the message is
/// handed off or rejected.
pub trait MailSender: Send + Sync {
    fn send(&self, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Authenticated SMTP delivery. Port 465 uses implicit TLS, any other port
/// negotiates STARTTLS. A new connection is opened per message.
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        SmtpMailer { config }
    }

    fn build_message(&self, subject: &str, body: &str) -> Result<Message, MailError> {
        let sender: Mailbox = required(&self.config.sender, "sender")?.parse()?;
        let receiver: Mailbox = required(&self.config.receiver, "receiver")?.parse()?;

        let message = Message::builder()
            .from(sender)
            .to(receiver)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;
        Ok(message)
    }

    fn transport(&self) -> Result<SmtpTransport, MailError> {
        let host = required(&self.config.smtp_server, "smtp_server")?;
        let user = required(&self.config.sender, "sender")?;
        let password = required(&self.config.password, "password")?;

        let builder = if self.config.smtp_port == DEFAULT_SMTP_PORT {
            SmtpTransport::relay(host)?
        } else {
            SmtpTransport::starttls_relay(host)?
        };

        Ok(builder
            .port(self.config.smtp_port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build())
    }
}

impl MailSender for SmtpMailer {
    fn send(&self, subject: &str, body: &str) -> Result<(), MailError> {
        let message = self.build_message(subject, body)?;
        let transport = self.transport()?;
        debug!(
            host = self.config.smtp_server.as_deref().unwrap_or_default(),
            port = self.config.smtp_port,
            "sending mail"
        );
        transport.send(&message)?;
        info!(subject, "email sent");
        Ok(())
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, MailError> {
    value.as_deref().ok_or(MailError::MissingSetting(name))
}
