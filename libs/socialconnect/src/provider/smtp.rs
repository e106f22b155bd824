//! SMTP mail transport using lettre.

use eyre::{eyre, Result, WrapErr};
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{authentication::Credentials, PoolConfig},
    Message, SmtpTransport, Transport,
};

use super::MailTransport;
use crate::config::EmailConfig;
use crate::error::{SocialConnectError, SocialConnectResult};
use crate::models::OutboundEmail;

/// Mail transport over SMTPS (implicit TLS, the Gmail submission setup).
///
/// A single-connection pool keeps the session opened by
/// [`MailTransport::open`] authenticated and alive across the whole batch.
#[derive(Debug)]
pub struct SmtpMailTransport {
    transport: SmtpTransport,
}

impl SmtpMailTransport {
    /// Build a transport from the resolved email settings.
    ///
    /// Missing credentials surface here as an authentication error; the
    /// server is not contacted until [`MailTransport::open`].
    pub fn new(config: &EmailConfig) -> SocialConnectResult<Self> {
        let (sender, password) = config.credentials()?;
        let creds = Credentials::new(sender.to_string(), password.to_string());

        let transport = SmtpTransport::relay(&config.smtp_server)
            .map_err(|e| {
                SocialConnectError::Configuration(format!(
                    "invalid SMTP relay {}: {}",
                    config.smtp_server, e
                ))
            })?
            .port(config.smtp_port)
            .credentials(creds)
            // One connection, dialed and authenticated once per batch.
            .pool_config(PoolConfig::new().max_size(1))
            .build();

        Ok(Self { transport })
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message> {
        let from: Mailbox = email.from.parse().wrap_err("Invalid from address")?;
        let to: Mailbox = email.to.parse().wrap_err("Invalid to address")?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .wrap_err("Failed to build multipart message")
    }
}

impl MailTransport for SmtpMailTransport {
    fn open(&self) -> Result<()> {
        let accepted = self
            .transport
            .test_connection()
            .wrap_err("Failed to open SMTP session")?;
        if !accepted {
            return Err(eyre!("SMTP server rejected the connection"));
        }
        Ok(())
    }

    fn send(&self, email: &OutboundEmail) -> Result<()> {
        let message = self.build_message(email)?;

        self.transport
            .send(&message)
            .wrap_err_with(|| format!("Failed to send email to {}", email.to))?;

        tracing::info!(
            email_id = %email.id,
            to = %email.to,
            subject = %email.subject,
            "Email sent successfully"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
