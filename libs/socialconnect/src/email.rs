//! Email dispatcher: fans one rendered client-inquiry email out to a batch
//! of addresses over a single SMTP session.

use std::sync::Arc;

use crate::config::EmailConfig;
use crate::error::{SocialConnectError, SocialConnectResult};
use crate::models::{ClientInquiry, DispatchResult, OutboundEmail};
use crate::provider::{MailTransport, SmtpMailTransport};
use crate::templates::TemplateEngine;
use crate::validation::is_valid_email;

/// Sends client-inquiry emails to individuals or groups of addresses.
pub struct EmailMessenger {
    config: EmailConfig,
    templates: TemplateEngine,
    transport: Option<Arc<dyn MailTransport>>,
}

impl EmailMessenger {
    /// Create a messenger that opens an SMTP session per dispatch batch.
    ///
    /// Credential presence is not checked here; it is checked at the first
    /// `send_message` call.
    pub fn new(config: EmailConfig) -> SocialConnectResult<Self> {
        Ok(Self {
            config,
            templates: TemplateEngine::new()?,
            transport: None,
        })
    }

    /// Create a messenger configured from the environment.
    pub fn from_env() -> SocialConnectResult<Self> {
        Self::new(EmailConfig::from_env())
    }

    /// Create a messenger with an injected transport (used in tests).
    pub fn with_transport(
        config: EmailConfig,
        transport: Arc<dyn MailTransport>,
    ) -> SocialConnectResult<Self> {
        Ok(Self {
            config,
            templates: TemplateEngine::new()?,
            transport: Some(transport),
        })
    }

    /// Send the rendered inquiry to every address in the batch.
    ///
    /// The bodies are rendered once and one transport session is opened and
    /// authenticated for the whole batch; an authentication failure raises
    /// before any per-address outcome exists. Malformed addresses and
    /// per-message transport failures are recorded in the result and never
    /// abort the remaining addresses.
    pub fn send_message<S: AsRef<str>>(
        &self,
        inquiry: &ClientInquiry,
        addresses: &[S],
    ) -> SocialConnectResult<DispatchResult> {
        if addresses.is_empty() {
            return Err(SocialConnectError::Validation(
                "at least one email address must be provided".into(),
            ));
        }

        // First use of the credentials.
        let (sender, _) = self.config.credentials()?;
        let sender = sender.to_string();

        let rendered = self.templates.render_inquiry_email(inquiry)?;

        let transport: Arc<dyn MailTransport> = match &self.transport {
            Some(transport) => Arc::clone(transport),
            None => Arc::new(SmtpMailTransport::new(&self.config)?),
        };

        transport
            .open()
            .map_err(|e| SocialConnectError::Authentication(e.to_string()))?;

        tracing::debug!(
            transport = transport.name(),
            total = addresses.len(),
            subject = %rendered.subject,
            "Email dispatch started"
        );

        let mut result = DispatchResult::new();

        for address in addresses {
            let address = address.as_ref();

            if !is_valid_email(address) {
                tracing::warn!(to = %address, "Skipping address with invalid format");
                result.record_failure(address, format!("invalid email address format: {address}"));
                continue;
            }

            let email = OutboundEmail::new(
                sender.as_str(),
                address,
                rendered.subject.as_str(),
                rendered.text_body.as_str(),
                rendered.html_body.as_str(),
            );

            match transport.send(&email) {
                Ok(()) => result.record_success(address),
                Err(e) => {
                    tracing::error!(to = %address, error = %e, "Failed to send email");
                    result.record_failure(address, e.to_string());
                }
            }
        }

        let stats = result.statistics();
        tracing::info!(
            successful = stats.successful,
            total = stats.total,
            "Email sending complete"
        );

        Ok(result)
    }
}
