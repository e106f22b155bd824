//! Mock mail transport for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use eyre::{eyre, Result};

use super::MailTransport;
use crate::models::OutboundEmail;

/// Mock transport that captures sent emails.
///
/// Failure modes can be configured after the transport has been handed to a
/// messenger, so tests keep an `Arc` clone and drive it from outside.
#[derive(Default)]
pub struct MockMailTransport {
    sent: Mutex<Vec<OutboundEmail>>,
    auth_failure: Option<String>,
    failing_recipients: Mutex<HashMap<String, String>>,
}

impl MockMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose session open always fails.
    pub fn failing_auth(message: impl Into<String>) -> Self {
        Self {
            auth_failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Make sends to `recipient` fail with `message`.
    pub fn fail_recipient(&self, recipient: impl Into<String>, message: impl Into<String>) {
        self.failing_recipients
            .lock()
            .unwrap()
            .insert(recipient.into(), message.into());
    }

    /// All captured emails, in send order.
    pub fn sent_emails(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn was_sent_to(&self, recipient: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|e| e.to == recipient)
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl MailTransport for MockMailTransport {
    fn open(&self) -> Result<()> {
        if let Some(message) = &self.auth_failure {
            return Err(eyre!(message.clone()));
        }
        Ok(())
    }

    fn send(&self, email: &OutboundEmail) -> Result<()> {
        if let Some(message) = self.failing_recipients.lock().unwrap().get(&email.to) {
            return Err(eyre!(message.clone()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
