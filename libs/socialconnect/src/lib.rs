//! Client-inquiry notification library.
//!
//! Formats client-inquiry records into HTML/text email bodies and WhatsApp
//! text messages, then dispatches them via SMTP and an injected WhatsApp
//! chat-automation gateway. Each dispatch call processes its destinations
//! sequentially and returns a [`DispatchResult`] with one outcome per
//! destination plus aggregate statistics; only batch-fatal conditions
//! (authentication, unusable arguments) are raised as errors.
//!
//! ## Components
//!
//! - **Config**: [`SocialConnectConfig`] resolved from environment
//!   variables with explicit-override precedence
//! - **Models**: [`ClientInquiry`], [`UnitDetails`], [`DispatchResult`]
//! - **Templates**: Handlebars-based [`TemplateEngine`] with fixed layouts
//! - **Dispatchers**: [`EmailMessenger`] (SMTP via lettre) and
//!   [`WhatsAppMessenger`] (injected [`ChatGateway`])
//! - **Validation**: [`is_valid_email`], [`is_valid_phone_number`]
//!
//! ## Usage
//!
//! ```ignore
//! use socialconnect::{ClientInquiry, EmailMessenger, UnitDetails};
//!
//! let inquiry = ClientInquiry::new(
//!     "Ahmed Hassan",
//!     "+20 12 3456 7890",
//!     UnitDetails::new("New Capital Heights", "2-Bedroom Apartment", "2,800,000 EGP"),
//! );
//!
//! let messenger = EmailMessenger::from_env()?;
//! let result = messenger.send_message(&inquiry, &["sales@example.com"])?;
//! println!("{:?}", result.statistics());
//! ```

pub mod config;
pub mod email;
pub mod error;
pub mod gateway;
pub mod models;
pub mod provider;
pub mod templates;
pub mod validation;
pub mod whatsapp;

// Re-export main types
pub use config::{EmailConfig, SocialConnectConfig, WhatsAppConfig};
pub use email::EmailMessenger;
pub use error::{SocialConnectError, SocialConnectResult};
pub use gateway::{ChatGateway, ChatTarget, MockChatGateway};
pub use models::{
    ClientInquiry, DispatchResult, DispatchStats, OutboundEmail, SendOutcome, UnitDetails,
};
pub use provider::{MailTransport, MockMailTransport, SmtpMailTransport};
pub use templates::{RenderedEmail, TemplateEngine};
pub use validation::{is_valid_email, is_valid_phone_number};
pub use whatsapp::{RecipientKind, WhatsAppMessenger};
