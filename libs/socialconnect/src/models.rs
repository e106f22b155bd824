//! Data records exchanged with the messengers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Details of the unit a client inquired about.
///
/// Optional fields render as placeholder segments instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitDetails {
    pub project_name: String,
    pub unit_type: String,
    pub price: String,
    pub unit_number: Option<String>,
    pub size: Option<String>,
    pub floor: Option<String>,
    pub availability: Option<String>,
}

impl UnitDetails {
    pub fn new(
        project_name: impl Into<String>,
        unit_type: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            unit_type: unit_type.into(),
            price: price.into(),
            unit_number: None,
            size: None,
            floor: None,
            availability: None,
        }
    }

    pub fn with_unit_number(mut self, unit_number: impl Into<String>) -> Self {
        self.unit_number = Some(unit_number.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_floor(mut self, floor: impl Into<String>) -> Self {
        self.floor = Some(floor.into());
        self
    }

    pub fn with_availability(mut self, availability: impl Into<String>) -> Self {
        self.availability = Some(availability.into());
        self
    }
}

/// A client inquiry to be fanned out to the sales team.
///
/// Immutable once handed to the renderer; `inquiry_time` is part of the
/// value, so rendering is a pure function of the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInquiry {
    pub client_name: String,
    pub phone_number: String,
    pub unit_details: UnitDetails,
    pub chat_description: Option<String>,
    pub client_request: Option<String>,
    pub inquiry_time: DateTime<Utc>,
}

impl ClientInquiry {
    /// Create an inquiry timestamped now.
    pub fn new(
        client_name: impl Into<String>,
        phone_number: impl Into<String>,
        unit_details: UnitDetails,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            phone_number: phone_number.into(),
            unit_details,
            chat_description: None,
            client_request: None,
            inquiry_time: Utc::now(),
        }
    }

    pub fn with_chat_description(mut self, description: impl Into<String>) -> Self {
        self.chat_description = Some(description.into());
        self
    }

    pub fn with_client_request(mut self, request: impl Into<String>) -> Self {
        self.client_request = Some(request.into());
        self
    }

    pub fn with_inquiry_time(mut self, inquiry_time: DateTime<Utc>) -> Self {
        self.inquiry_time = inquiry_time;
        self
    }

    fn formatted_time(&self) -> String {
        self.inquiry_time.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Template data for the client-inquiry email, with placeholder text
    /// filled in for absent optional fields.
    pub fn email_template_data(&self) -> serde_json::Value {
        let unit = &self.unit_details;
        json!({
            "client_name": self.client_name,
            "phone_number": self.phone_number,
            "inquiry_time": self.formatted_time(),
            "project_name": unit.project_name,
            "unit_type": unit.unit_type,
            "price": unit.price,
            "unit_number": unit.unit_number.as_deref().unwrap_or("Not specified"),
            "size": unit.size.as_deref().unwrap_or("Not specified"),
            "floor": unit.floor.as_deref().unwrap_or("Not specified"),
            "chat_description": self
                .chat_description
                .as_deref()
                .unwrap_or("No chat description provided"),
            "client_request": self
                .client_request
                .as_deref()
                .unwrap_or("No specific request mentioned"),
        })
    }

    /// Template data for the WhatsApp customer-interest message.
    pub fn interest_template_data(&self) -> serde_json::Value {
        let unit = &self.unit_details;
        json!({
            "client_name": self.client_name,
            "phone_number": self.phone_number,
            "chat_summary": self.chat_description.as_deref().unwrap_or("N/A"),
            "unit_number": unit.unit_number.as_deref().unwrap_or("N/A"),
            "unit_type": unit.unit_type,
            "project_name": unit.project_name,
            "price": unit.price,
            "availability": unit.availability.as_deref().unwrap_or("N/A"),
            "timestamp": self.formatted_time(),
        })
    }
}

/// Outcome of one send attempt.
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub destination: String,
    pub success: bool,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate statistics for a dispatch batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// `successful / total * 100`; 0 when the batch is empty.
    pub success_rate: f64,
}

/// Per-destination outcomes of one dispatch batch, in input order.
///
/// Every destination supplied to a dispatch call appears exactly once:
/// recording the same destination again overwrites the earlier entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchResult {
    outcomes: Vec<SendOutcome>,
}

impl DispatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, destination: impl Into<String>) {
        self.record(destination.into(), true, None);
    }

    pub fn record_failure(&mut self, destination: impl Into<String>, error: impl Into<String>) {
        self.record(destination.into(), false, Some(error.into()));
    }

    fn record(&mut self, destination: String, success: bool, error: Option<String>) {
        let outcome = SendOutcome {
            destination,
            success,
            error,
            timestamp: Utc::now(),
        };
        match self
            .outcomes
            .iter_mut()
            .find(|o| o.destination == outcome.destination)
        {
            Some(existing) => *existing = outcome,
            None => self.outcomes.push(outcome),
        }
    }

    /// Outcome for a destination, if it was part of the batch.
    pub fn outcome(&self, destination: &str) -> Option<&SendOutcome> {
        self.outcomes.iter().find(|o| o.destination == destination)
    }

    pub fn succeeded(&self, destination: &str) -> bool {
        self.outcome(destination).map(|o| o.success).unwrap_or(false)
    }

    /// All outcomes, in input order.
    pub fn outcomes(&self) -> &[SendOutcome] {
        &self.outcomes
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }

    pub fn statistics(&self) -> DispatchStats {
        let total = self.outcomes.len();
        let successful = self.outcomes.iter().filter(|o| o.success).count();
        let success_rate = if total > 0 {
            successful as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        DispatchStats {
            total,
            successful,
            failed: total - successful,
            success_rate,
        }
    }
}

/// An assembled email handed to a [`MailTransport`](crate::provider::MailTransport).
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub id: String,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

impl OutboundEmail {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        text_body: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            text_body: text_body.into(),
            html_body: html_body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    }

    #[test]
    fn test_inquiry_builder() {
        let inquiry = sample_inquiry();
        assert_eq!(inquiry.client_name, "Ahmed Hassan");
        assert_eq!(inquiry.unit_details.project_name, "New Capital Heights");
        assert_eq!(inquiry.unit_details.floor.as_deref(), Some("2nd Floor"));
        assert!(inquiry.unit_details.availability.is_none());
    }

    #[test]
    fn test_email_template_data_placeholders() {
        let inquiry = ClientInquiry::new(
            "Jane Doe",
            "+1000000000",
            UnitDetails::new("Test Towers", "Studio", "100,000 USD"),
        );
        let data = inquiry.email_template_data();
        assert_eq!(data["unit_number"], "Not specified");
        assert_eq!(data["chat_description"], "No chat description provided");
        assert_eq!(data["client_request"], "No specific request mentioned");
    }

    #[test]
    fn test_interest_template_data_placeholders() {
        let inquiry = ClientInquiry::new(
            "Jane Doe",
            "+1000000000",
            UnitDetails::new("Test Towers", "Studio", "100,000 USD"),
        );
        let data = inquiry.interest_template_data();
        assert_eq!(data["chat_summary"], "N/A");
        assert_eq!(data["availability"], "N/A");
        assert_eq!(data["project_name"], "Test Towers");
    }

    #[test]
    fn test_dispatch_result_statistics() {
        let mut result = DispatchResult::new();
        result.record_success("a@x.com");
        result.record_failure("not-an-email", "invalid email address format");

        let stats = result.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.successful, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.success_rate, 50.0);
        assert!(result.succeeded("a@x.com"));
        assert!(!result.succeeded("not-an-email"));
        assert!(!result.all_succeeded());
    }

    #[test]
    fn test_empty_dispatch_result_rate_is_zero() {
        let result = DispatchResult::new();
        let stats = result.statistics();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.success_rate, 0.0);
    }

    #[test]
    fn test_duplicate_destination_overwrites() {
        let mut result = DispatchResult::new();
        result.record_failure("a@x.com", "first attempt");
        result.record_success("a@x.com");

        assert_eq!(result.outcomes().len(), 1);
        assert!(result.succeeded("a@x.com"));
        assert_eq!(result.statistics().total, 1);
    }

    #[test]
    fn test_outcomes_preserve_input_order() {
        let mut result = DispatchResult::new();
        result.record_success("c@x.com");
        result.record_failure("a@x.com", "boom");
        result.record_success("b@x.com");

        let order: Vec<&str> = result.outcomes().iter().map(|o| o.destination.as_str()).collect();
        assert_eq!(order, vec!["c@x.com", "a@x.com", "b@x.com"]);
    }
}
