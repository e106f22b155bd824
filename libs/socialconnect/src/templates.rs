//! Fixed message templates rendered with Handlebars.
//!
//! All templates are registered at construction; rendering is a pure
//! function of the inquiry record, so identical input yields byte-identical
//! output. Values are HTML-escaped in the HTML body and inserted raw in the
//! plain-text bodies and the subject line.

use handlebars::Handlebars;

use crate::error::{SocialConnectError, SocialConnectResult};
use crate::models::ClientInquiry;

const CLIENT_INQUIRY_SUBJECT: &str = "New Client Inquiry - {{{client_name}}} - {{{project_name}}}";

const CLIENT_INQUIRY_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <style>
        body {
            font-family: Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 600px;
            margin: 0 auto;
            padding: 20px;
        }
        .header {
            background-color: #2c5aa0;
            color: white;
            padding: 20px;
            text-align: center;
            border-radius: 8px 8px 0 0;
        }
        .content {
            background-color: #f9f9f9;
            padding: 20px;
            border: 1px solid #ddd;
        }
        .section {
            margin-bottom: 20px;
            padding: 15px;
            background-color: white;
            border-radius: 5px;
            border-left: 4px solid #2c5aa0;
        }
        .section h3 {
            margin-top: 0;
            color: #2c5aa0;
            border-bottom: 1px solid #eee;
            padding-bottom: 5px;
        }
        .info-row {
            margin: 8px 0;
        }
        .label {
            font-weight: bold;
            color: #555;
            display: inline-block;
            width: 120px;
        }
        .value {
            color: #333;
        }
        .footer {
            background-color: #f0f0f0;
            padding: 15px;
            text-align: center;
            border-radius: 0 0 8px 8px;
            font-size: 12px;
            color: #666;
        }
        .urgent {
            background-color: #fff3cd;
            border-left-color: #ffc107;
        }
    </style>
</head>
<body>
    <div class="header">
        <h1>🏠 New Client Inquiry</h1>
        <p>Property Interest Notification</p>
    </div>

    <div class="content">
        <div class="section">
            <h3>👤 Client Information</h3>
            <div class="info-row">
                <span class="label">Name:</span>
                <span class="value">{{client_name}}</span>
            </div>
            <div class="info-row">
                <span class="label">Phone:</span>
                <span class="value">{{phone_number}}</span>
            </div>
            <div class="info-row">
                <span class="label">Inquiry Time:</span>
                <span class="value">{{inquiry_time}}</span>
            </div>
        </div>

        <div class="section">
            <h3>🏢 Unit Details</h3>
            <div class="info-row">
                <span class="label">Project:</span>
                <span class="value">{{project_name}}</span>
            </div>
            <div class="info-row">
                <span class="label">Unit Type:</span>
                <span class="value">{{unit_type}}</span>
            </div>
            <div class="info-row">
                <span class="label">Unit Number:</span>
                <span class="value">{{unit_number}}</span>
            </div>
            <div class="info-row">
                <span class="label">Size:</span>
                <span class="value">{{size}}</span>
            </div>
            <div class="info-row">
                <span class="label">Price:</span>
                <span class="value">{{price}}</span>
            </div>
            <div class="info-row">
                <span class="label">Floor:</span>
                <span class="value">{{floor}}</span>
            </div>
        </div>

        <div class="section">
            <h3>💬 Chat Description</h3>
            <p style="background-color: #f8f9fa; padding: 10px; border-radius: 4px; margin: 0;">
                {{chat_description}}
            </p>
        </div>

        <div class="section urgent">
            <h3>📋 Client Request/Needs</h3>
            <p style="background-color: #fff; padding: 10px; border-radius: 4px; margin: 0;">
                {{client_request}}
            </p>
        </div>
    </div>

    <div class="footer">
        <p>This is an automated notification from your property inquiry system.</p>
        <p>Please follow up with the client promptly for the best service experience.</p>
    </div>
</body>
</html>
"#;

const CLIENT_INQUIRY_TEXT: &str = r#"NEW CLIENT INQUIRY - PROPERTY INTEREST
=====================================

CLIENT INFORMATION:
------------------
Name: {{{client_name}}}
Phone: {{{phone_number}}}
Inquiry Time: {{{inquiry_time}}}

UNIT DETAILS:
------------
Project: {{{project_name}}}
Unit Type: {{{unit_type}}}
Unit Number: {{{unit_number}}}
Size: {{{size}}}
Price: {{{price}}}
Floor: {{{floor}}}

CHAT DESCRIPTION:
----------------
{{{chat_description}}}

CLIENT REQUEST/NEEDS:
--------------------
{{{client_request}}}

=====================================
This is an automated notification from your property inquiry system.
Please follow up with the client promptly for the best service experience.
"#;

const CUSTOMER_INTEREST_TEXT: &str = r#"🎯 *NEW CUSTOMER INTEREST* 🎯

👤 *Customer Details:*
• Name: {{{client_name}}}
• Phone: {{{phone_number}}}
• Summary: {{{chat_summary}}}

🏠 *Unit Information:*
• Unit ID: {{{unit_number}}}
• Type: {{{unit_type}}}
• Project: {{{project_name}}}
• Price: {{{price}}}
• Availability: {{{availability}}}

⏰ *Time:* {{{timestamp}}}

💼 *Action Required:* Please follow up with the customer within 2 hours!"#;

/// A rendered client-inquiry email: subject plus both body parts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Handlebars engine with the fixed socialconnect templates registered.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> SocialConnectResult<Self> {
        let mut handlebars = Handlebars::new();
        for (name, template) in [
            ("client_inquiry_subject", CLIENT_INQUIRY_SUBJECT),
            ("client_inquiry_html", CLIENT_INQUIRY_HTML),
            ("client_inquiry_text", CLIENT_INQUIRY_TEXT),
            ("customer_interest", CUSTOMER_INTEREST_TEXT),
        ] {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| {
                    SocialConnectError::Configuration(format!(
                        "failed to register template {name}: {e}"
                    ))
                })?;
        }
        Ok(Self { handlebars })
    }

    /// Render the client-inquiry email subject, HTML body and text body.
    pub fn render_inquiry_email(&self, inquiry: &ClientInquiry) -> SocialConnectResult<RenderedEmail> {
        let data = inquiry.email_template_data();
        Ok(RenderedEmail {
            subject: self.render("client_inquiry_subject", &data)?,
            html_body: self.render("client_inquiry_html", &data)?,
            text_body: self.render("client_inquiry_text", &data)?,
        })
    }

    /// Render the WhatsApp customer-interest text message.
    pub fn render_interest_message(&self, inquiry: &ClientInquiry) -> SocialConnectResult<String> {
        self.render("customer_interest", &inquiry.interest_template_data())
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> SocialConnectResult<String> {
        self.handlebars
            .render(name, data)
            .map_err(|e| SocialConnectError::Messaging(format!("failed to render {name}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UnitDetails;
    use chrono::TimeZone;

    fn sample_inquiry() -> ClientInquiry {
        ClientInquiry::new(
            "Ahmed Hassan",
            "+20 12 3456 7890",
            UnitDetails::new("New Capital Heights", "2-Bedroom Apartment", "2,800,000 EGP")
                .with_unit_number("A-205")
                .with_size("120 sqm")
                .with_floor("2nd Floor"),
        )
        .with_chat_description("Client contacted via WhatsApp expressing interest.")
        .with_client_request("Interested in flexible payment plan.")
        .with_inquiry_time(chrono::Utc.with_ymd_and_hms(2024, 12, 15, 14, 30, 0).unwrap())
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let engine = TemplateEngine::new().unwrap();
        let inquiry = sample_inquiry();

        let first = engine.render_inquiry_email(&inquiry).unwrap();
        let second = engine.render_inquiry_email(&inquiry).unwrap();
        assert_eq!(first, second);

        let msg1 = engine.render_interest_message(&inquiry).unwrap();
        let msg2 = engine.render_interest_message(&inquiry).unwrap();
        assert_eq!(msg1, msg2);
    }

    #[test]
    fn test_inquiry_email_contains_fields() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine.render_inquiry_email(&sample_inquiry()).unwrap();

        assert_eq!(
            rendered.subject,
            "New Client Inquiry - Ahmed Hassan - New Capital Heights"
        );
        for body in [&rendered.html_body, &rendered.text_body] {
            assert!(body.contains("Ahmed Hassan"));
            assert!(body.contains("+20 12 3456 7890"));
            assert!(body.contains("A-205"));
            assert!(body.contains("2,800,000 EGP"));
            assert!(body.contains("2024-12-15 14:30:00"));
        }
    }

    #[test]
    fn test_missing_optional_fields_render_placeholders() {
        let engine = TemplateEngine::new().unwrap();
        let inquiry = ClientInquiry::new(
            "Jane Doe",
            "+1000000000",
            UnitDetails::new("Test Towers", "Studio", "100,000 USD"),
        );

        let rendered = engine.render_inquiry_email(&inquiry).unwrap();
        assert!(rendered.text_body.contains("Unit Number: Not specified"));
        assert!(rendered.text_body.contains("No chat description provided"));
        assert!(rendered.text_body.contains("No specific request mentioned"));
        assert!(rendered.html_body.contains("Not specified"));
    }

    #[test]
    fn test_html_body_escapes_markup_in_values() {
        let engine = TemplateEngine::new().unwrap();
        let inquiry = ClientInquiry::new(
            "<b>Jane</b>",
            "+1000000000",
            UnitDetails::new("Test Towers", "Studio", "100,000 USD"),
        );

        let rendered = engine.render_inquiry_email(&inquiry).unwrap();
        assert!(rendered.html_body.contains("&lt;b&gt;Jane&lt;/b&gt;"));
        assert!(!rendered.html_body.contains("<b>Jane</b>"));
        // Plain text keeps the value verbatim.
        assert!(rendered.text_body.contains("<b>Jane</b>"));
    }

    #[test]
    fn test_interest_message_layout() {
        let engine = TemplateEngine::new().unwrap();
        let message = engine.render_interest_message(&sample_inquiry()).unwrap();

        assert!(message.starts_with("🎯 *NEW CUSTOMER INTEREST* 🎯"));
        assert!(message.contains("• Name: Ahmed Hassan"));
        assert!(message.contains("• Project: New Capital Heights"));
        assert!(message.contains("• Availability: N/A"));
        assert!(message.contains("*Time:* 2024-12-15 14:30:00"));
    }
}
