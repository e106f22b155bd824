//! WhatsApp chat gateway boundary.
//!
//! Sending a WhatsApp message is delegated to external browser automation.
//! The library owns only this seam: render text, hand off destination plus
//! text, get back success or failure. Production users inject their own
//! implementation; tests use [`MockChatGateway`].

pub mod mock;

pub use mock::MockChatGateway;

use eyre::Result;

/// One chat destination: a group id or an individual phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    Group(String),
    Individual(String),
}

impl ChatTarget {
    /// The raw destination identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Group(id) => id,
            Self::Individual(phone) => phone,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Group(_) => "group",
            Self::Individual(_) => "individual",
        }
    }
}

/// Blocking chat automation capability with a single operation.
pub trait ChatGateway: Send + Sync {
    /// Open or target the chat for `target` and transmit `text` immediately.
    fn send_text(&self, target: &ChatTarget, text: &str) -> Result<()>;

    /// Gateway name for logs.
    fn name(&self) -> &'static str;
}
