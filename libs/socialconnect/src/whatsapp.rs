//! WhatsApp dispatcher: fans one rendered customer-interest message out to
//! a group or a list of individual phone numbers through the injected chat
//! gateway, pausing between sends.

use std::sync::Arc;
use std::thread;

use crate::config::WhatsAppConfig;
use crate::error::{SocialConnectError, SocialConnectResult};
use crate::gateway::{ChatGateway, ChatTarget};
use crate::models::{ClientInquiry, DispatchResult};
use crate::templates::TemplateEngine;
use crate::validation::is_valid_phone_number;

/// Discriminates the destination type of a WhatsApp dispatch batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientKind {
    /// Destinations are group identifiers (not phone-validated).
    Group,
    /// Destinations are individual phone numbers.
    Individual,
}

/// Sends customer-interest messages via an injected chat automation gateway.
pub struct WhatsAppMessenger {
    config: WhatsAppConfig,
    templates: TemplateEngine,
    gateway: Arc<dyn ChatGateway>,
}

impl WhatsAppMessenger {
    pub fn new(config: WhatsAppConfig, gateway: Arc<dyn ChatGateway>) -> SocialConnectResult<Self> {
        Ok(Self {
            config,
            templates: TemplateEngine::new()?,
            gateway,
        })
    }

    /// Create a messenger configured from the environment.
    pub fn from_env(gateway: Arc<dyn ChatGateway>) -> SocialConnectResult<Self> {
        Self::new(WhatsAppConfig::from_env(), gateway)
    }

    /// Send the rendered interest message to every recipient in the batch.
    ///
    /// The message is rendered once. Each destination gets one blocking
    /// gateway call; a gateway failure is recorded against that destination
    /// and the remaining destinations are still attempted. The configured
    /// delay is slept between consecutive sends to avoid overwhelming the
    /// automated browser session.
    pub fn send_message<S: AsRef<str>>(
        &self,
        inquiry: &ClientInquiry,
        recipients: &[S],
        kind: RecipientKind,
    ) -> SocialConnectResult<DispatchResult> {
        if recipients.is_empty() {
            return Err(SocialConnectError::Validation(
                "at least one recipient must be provided".into(),
            ));
        }

        let message = self.templates.render_interest_message(inquiry)?;

        tracing::debug!(
            gateway = self.gateway.name(),
            total = recipients.len(),
            "WhatsApp dispatch started"
        );

        let mut result = DispatchResult::new();

        for (i, recipient) in recipients.iter().enumerate() {
            let recipient = recipient.as_ref();

            tracing::debug!(
                recipient = %recipient,
                position = i + 1,
                total = recipients.len(),
                "Sending WhatsApp message"
            );

            if recipient.trim().is_empty() {
                result.record_failure(recipient, "recipient cannot be empty");
            } else if kind == RecipientKind::Individual && !is_valid_phone_number(recipient) {
                tracing::warn!(recipient = %recipient, "Skipping recipient with invalid phone format");
                result.record_failure(
                    recipient,
                    format!("invalid phone number format: {recipient}"),
                );
            } else {
                let target = match kind {
                    RecipientKind::Group => ChatTarget::Group(recipient.to_string()),
                    RecipientKind::Individual => ChatTarget::Individual(recipient.to_string()),
                };

                match self.gateway.send_text(&target, &message) {
                    Ok(()) => {
                        tracing::info!(
                            recipient = %recipient,
                            kind = target.kind(),
                            "WhatsApp message sent successfully"
                        );
                        result.record_success(recipient);
                    }
                    Err(e) => {
                        tracing::error!(
                            recipient = %recipient,
                            error = %e,
                            "Failed to send WhatsApp message"
                        );
                        result.record_failure(recipient, e.to_string());
                    }
                }
            }

            // Rate-limit the automated browser session.
            if i + 1 < recipients.len() {
                thread::sleep(self.config.delay);
            }
        }

        let stats = result.statistics();
        tracing::info!(
            successful = stats.successful,
            total = stats.total,
            "WhatsApp sending complete"
        );

        Ok(result)
    }

    /// Send the interest message to the configured default group.
    pub fn send_to_default_group(
        &self,
        inquiry: &ClientInquiry,
    ) -> SocialConnectResult<DispatchResult> {
        let group_id = self.config.default_group_id.clone().ok_or_else(|| {
            SocialConnectError::Validation(
                "no default group configured (set WHATSAPP_GROUP_ID)".into(),
            )
        })?;

        self.send_message(inquiry, &[group_id], RecipientKind::Group)
    }
}
