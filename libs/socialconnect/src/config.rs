//! Configuration loaded from environment variables with explicit-override
//! precedence: constructor arguments > environment > built-in defaults.

use std::env;
use std::time::Duration;

use crate::error::{SocialConnectError, SocialConnectResult};

/// Default SMTP host (Gmail submission over implicit TLS).
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
/// Default SMTP port (SMTPS).
pub const DEFAULT_SMTP_PORT: u16 = 465;
/// Default delay between consecutive WhatsApp sends, in seconds.
pub const DEFAULT_WHATSAPP_DELAY_SECS: u64 = 5;

/// Load an environment variable with a default value.
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Email (SMTP) configuration.
///
/// Credentials are presence-checked at first use, not at construction, so a
/// messenger can be built in environments where sending never happens.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub sender_email: Option<String>,
    pub app_password: Option<String>,
    pub smtp_server: String,
    pub smtp_port: u16,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender_email: None,
            app_password: None,
            smtp_server: DEFAULT_SMTP_SERVER.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
        }
    }
}

impl EmailConfig {
    /// Load configuration from `GMAIL_ADDRESS`, `GMAIL_APP_PASSWORD`,
    /// `SMTP_SERVER` and `SMTP_PORT`.
    pub fn from_env() -> Self {
        Self {
            sender_email: env::var("GMAIL_ADDRESS").ok(),
            app_password: env::var("GMAIL_APP_PASSWORD").ok(),
            smtp_server: env_or_default("SMTP_SERVER", DEFAULT_SMTP_SERVER),
            smtp_port: env_or_default("SMTP_PORT", &DEFAULT_SMTP_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_SMTP_PORT),
        }
    }

    /// Override the sender credentials, leaving host settings untouched.
    pub fn with_credentials(
        mut self,
        sender_email: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Self {
        self.sender_email = Some(sender_email.into());
        self.app_password = Some(app_password.into());
        self
    }

    /// Override the SMTP host and port, leaving credentials untouched.
    pub fn with_smtp(mut self, server: impl Into<String>, port: u16) -> Self {
        self.smtp_server = server.into();
        self.smtp_port = port;
        self
    }

    pub fn set_credentials(
        &mut self,
        sender_email: impl Into<String>,
        app_password: impl Into<String>,
    ) {
        self.sender_email = Some(sender_email.into());
        self.app_password = Some(app_password.into());
    }

    pub fn set_smtp(&mut self, server: impl Into<String>, port: u16) {
        self.smtp_server = server.into();
        self.smtp_port = port;
    }

    /// Presence check for the sender credentials.
    ///
    /// This is the "first use" boundary: dispatchers call it right before
    /// opening a transport session.
    pub fn credentials(&self) -> SocialConnectResult<(&str, &str)> {
        match (self.sender_email.as_deref(), self.app_password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => Err(SocialConnectError::Authentication(
                "email credentials not provided (set GMAIL_ADDRESS and GMAIL_APP_PASSWORD)".into(),
            )),
        }
    }
}

/// WhatsApp dispatch configuration.
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    /// Delay between consecutive sends, to avoid overwhelming the
    /// automated browser session.
    pub delay: Duration,
    /// Group targeted by [`send_to_default_group`](crate::whatsapp::WhatsAppMessenger::send_to_default_group).
    pub default_group_id: Option<String>,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(DEFAULT_WHATSAPP_DELAY_SECS),
            default_group_id: None,
        }
    }
}

impl WhatsAppConfig {
    /// Load configuration from `WHATSAPP_DELAY` (seconds) and
    /// `WHATSAPP_GROUP_ID`.
    pub fn from_env() -> Self {
        let delay_secs = env_or_default("WHATSAPP_DELAY", &DEFAULT_WHATSAPP_DELAY_SECS.to_string())
            .parse()
            .unwrap_or(DEFAULT_WHATSAPP_DELAY_SECS);
        Self {
            delay: Duration::from_secs(delay_secs),
            default_group_id: env::var("WHATSAPP_GROUP_ID").ok(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_default_group(mut self, group_id: impl Into<String>) -> Self {
        self.default_group_id = Some(group_id.into());
        self
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn set_default_group(&mut self, group_id: impl Into<String>) {
        self.default_group_id = Some(group_id.into());
    }
}

/// Combined configuration for both messengers.
#[derive(Debug, Clone, Default)]
pub struct SocialConnectConfig {
    pub email: EmailConfig,
    pub whatsapp: WhatsAppConfig,
}

impl SocialConnectConfig {
    pub fn from_env() -> Self {
        Self {
            email: EmailConfig::from_env(),
            whatsapp: WhatsAppConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.smtp_server, "smtp.gmail.com");
        assert_eq!(config.smtp_port, 465);
        assert!(config.sender_email.is_none());

        let whatsapp = WhatsAppConfig::default();
        assert_eq!(whatsapp.delay, Duration::from_secs(5));
        assert!(whatsapp.default_group_id.is_none());
    }

    #[test]
    fn test_email_from_env() {
        temp_env::with_vars(
            [
                ("GMAIL_ADDRESS", Some("agent@gmail.com")),
                ("GMAIL_APP_PASSWORD", Some("app-pass")),
                ("SMTP_SERVER", Some("smtp.example.com")),
                ("SMTP_PORT", Some("2465")),
            ],
            || {
                let config = EmailConfig::from_env();
                assert_eq!(config.sender_email.as_deref(), Some("agent@gmail.com"));
                assert_eq!(config.app_password.as_deref(), Some("app-pass"));
                assert_eq!(config.smtp_server, "smtp.example.com");
                assert_eq!(config.smtp_port, 2465);
            },
        );
    }

    #[test]
    fn test_email_env_defaults_when_unset() {
        temp_env::with_vars_unset(
            ["GMAIL_ADDRESS", "GMAIL_APP_PASSWORD", "SMTP_SERVER", "SMTP_PORT"],
            || {
                let config = EmailConfig::from_env();
                assert!(config.sender_email.is_none());
                assert_eq!(config.smtp_server, "smtp.gmail.com");
                assert_eq!(config.smtp_port, 465);
            },
        );
    }

    #[test]
    fn test_unparseable_port_falls_back_to_default() {
        temp_env::with_var("SMTP_PORT", Some("not-a-port"), || {
            let config = EmailConfig::from_env();
            assert_eq!(config.smtp_port, 465);
        });
    }

    #[test]
    fn test_explicit_credentials_override_env() {
        temp_env::with_vars(
            [
                ("GMAIL_ADDRESS", Some("env@gmail.com")),
                ("GMAIL_APP_PASSWORD", Some("env-pass")),
            ],
            || {
                let config = EmailConfig::from_env().with_credentials("explicit@gmail.com", "pw");
                assert_eq!(config.sender_email.as_deref(), Some("explicit@gmail.com"));
                assert_eq!(config.app_password.as_deref(), Some("pw"));
            },
        );
    }

    #[test]
    fn test_setters_do_not_disturb_other_fields() {
        let mut config = EmailConfig::default().with_credentials("a@b.com", "pw");
        config.set_smtp("mail.example.com", 587);
        assert_eq!(config.sender_email.as_deref(), Some("a@b.com"));
        assert_eq!(config.smtp_server, "mail.example.com");
        assert_eq!(config.smtp_port, 587);

        let mut whatsapp = WhatsAppConfig::default().with_default_group("sales-group");
        whatsapp.set_delay(Duration::from_secs(2));
        assert_eq!(whatsapp.default_group_id.as_deref(), Some("sales-group"));
        assert_eq!(whatsapp.delay, Duration::from_secs(2));
    }

    #[test]
    fn test_missing_credentials_is_authentication_error() {
        let config = EmailConfig::default();
        let err = config.credentials().unwrap_err();
        assert!(matches!(err, SocialConnectError::Authentication(_)));
    }

    #[test]
    fn test_whatsapp_from_env() {
        temp_env::with_vars(
            [
                ("WHATSAPP_DELAY", Some("9")),
                ("WHATSAPP_GROUP_ID", Some("ABC123")),
            ],
            || {
                let config = WhatsAppConfig::from_env();
                assert_eq!(config.delay, Duration::from_secs(9));
                assert_eq!(config.default_group_id.as_deref(), Some("ABC123"));
            },
        );
    }
}
