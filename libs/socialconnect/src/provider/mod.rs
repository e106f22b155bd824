//! Mail transport implementations.

pub mod mock;
pub mod smtp;

pub use mock::MockMailTransport;
pub use smtp::SmtpMailTransport;

use eyre::Result;

use crate::models::OutboundEmail;

/// Blocking mail transport used by the email dispatcher.
///
/// One session covers one dispatch batch: the dispatcher calls [`open`]
/// once, then [`send`] once per valid address.
///
/// [`open`]: MailTransport::open
/// [`send`]: MailTransport::send
pub trait MailTransport: Send + Sync {
    /// Open the session and authenticate. A failure here is batch-fatal.
    fn open(&self) -> Result<()>;

    /// Submit one message over the session.
    fn send(&self, email: &OutboundEmail) -> Result<()>;

    /// Transport name for logs.
    fn name(&self) -> &'static str;
}
