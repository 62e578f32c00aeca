//! Contact form delivery through the `sendContactEmail` function.

use crate::callable::CallableClient;
use crate::FetchError;
use serde::{Deserialize, Serialize};

pub const SEND_CONTACT_EMAIL: &str = "sendContactEmail";

const MAX_MESSAGE_LEN: usize = 5000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Check the form before sending. Returns the first problem found.
    pub fn validate(&self) -> Result<(), FetchError> {
        let required = [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Subject", &self.subject),
            ("Message", &self.message),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(FetchError::Validation(format!("{} is required", field)));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(FetchError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        if self.message.chars().count() > MAX_MESSAGE_LEN {
            return Err(FetchError::Validation(format!(
                "Message must be at most {} characters",
                MAX_MESSAGE_LEN
            )));
        }
        Ok(())
    }

    fn trimmed(&self) -> Self {
        Self::new(
            self.name.trim(),
            self.email.trim(),
            self.subject.trim(),
            self.message.trim(),
        )
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ContactClient {
    callable: CallableClient,
}

impl ContactClient {
    pub fn new(callable: CallableClient) -> Self {
        Self { callable }
    }

    /// Validate and send a contact message.
    pub async fn send_contact_email(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactResponse, FetchError> {
        request.validate()?;
        let response: ContactResponse = self
            .callable
            .call(SEND_CONTACT_EMAIL, &request.trimmed())
            .await?;
        tracing::info!(success = response.success, "Contact message sent");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firestore::FirebaseSettings;
    use crate::transport::mock::MockTransport;
    use crate::FetchClient;
    use serde_json::json;
    use std::sync::Arc;

    fn request() -> ContactRequest {
        ContactRequest::new(
            " Dr. Patel ",
            "office@smiles.example",
            "Chair quote",
            "Please send a quote for two chairs.",
        )
    }

    #[test]
    fn test_validation() {
        assert!(request().validate().is_ok());

        let mut missing = request();
        missing.subject = "  ".into();
        assert_eq!(
            missing.validate(),
            Err(FetchError::Validation("Subject is required".into()))
        );

        for bad in ["office", "a@b", "@b.com", "a@b.", "a b@c.com", "a@b@c.com"] {
            let mut r = request();
            r.email = bad.into();
            assert!(r.validate().is_err(), "{}", bad);
        }

        let mut long = request();
        long.message = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert!(long.validate().is_err());
    }

    #[tokio::test]
    async fn test_send_trims_fields() {
        let mock = Arc::new(MockTransport::new().respond_json(
            200,
            json!({"result": {"success": true, "message": "Thanks, we'll be in touch."}}),
        ));
        let client = ContactClient::new(CallableClient::new(
            FetchClient::with_transport(mock.clone()),
            &FirebaseSettings::new("dental-demo"),
        ));

        let response = client.send_contact_email(&request()).await.unwrap();
        assert!(response.success);
        assert_eq!(mock.requests()[0].json_body().unwrap()["data"]["name"], "Dr. Patel");
    }

    #[tokio::test]
    async fn test_invalid_request_not_sent() {
        let mock = Arc::new(MockTransport::new());
        let client = ContactClient::new(CallableClient::new(
            FetchClient::with_transport(mock.clone()),
            &FirebaseSettings::new("dental-demo"),
        ));
        let result = client.send_contact_email(&ContactRequest::default()).await;
        assert!(matches!(result, Err(FetchError::Validation(_))));
        assert!(mock.requests().is_empty());
    }
}
