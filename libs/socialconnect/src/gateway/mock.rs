//! Mock chat gateway for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use eyre::{eyre, Result};

use super::{ChatGateway, ChatTarget};

/// Mock gateway that captures sent messages.
#[derive(Default)]
pub struct MockChatGateway {
    sent: Mutex<Vec<(ChatTarget, String)>>,
    failing_targets: Mutex<HashMap<String, String>>,
}

impl MockChatGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sends to the destination with `id` fail with `message`.
    pub fn fail_target(&self, id: impl Into<String>, message: impl Into<String>) {
        self.failing_targets
            .lock()
            .unwrap()
            .insert(id.into(), message.into());
    }

    /// All captured (target, text) pairs, in send order.
    pub fn sent_messages(&self) -> Vec<(ChatTarget, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn was_sent_to(&self, id: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|(t, _)| t.id() == id)
    }
}

impl ChatGateway for MockChatGateway {
    fn send_text(&self, target: &ChatTarget, text: &str) -> Result<()> {
        if let Some(message) = self.failing_targets.lock().unwrap().get(target.id()) {
            return Err(eyre!(message.clone()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((target.clone(), text.to_string()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_gateway_captures_sends() {
        let gateway = MockChatGateway::new();
        gateway
            .send_text(&ChatTarget::Group("sales".into()), "hello group")
            .unwrap();
        gateway
            .send_text(&ChatTarget::Individual("+1234567890".into()), "hello you")
            .unwrap();

        assert_eq!(gateway.sent_count(), 2);
        assert!(gateway.was_sent_to("sales"));
        assert!(gateway.was_sent_to("+1234567890"));
        assert_eq!(gateway.name(), "mock");

        let sent = gateway.sent_messages();
        assert_eq!(sent[0].0.kind(), "group");
        assert_eq!(sent[1].1, "hello you");
    }

    #[test]
    fn test_mock_gateway_failure() {
        let gateway = MockChatGateway::new();
        gateway.fail_target("+1234567890", "chat never loaded");

        let err = gateway
            .send_text(&ChatTarget::Individual("+1234567890".into()), "hi")
            .unwrap_err();
        assert!(err.to_string().contains("chat never loaded"));
        assert_eq!(gateway.sent_count(), 0);
    }
}
