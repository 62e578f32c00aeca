//! Firebase callable functions.
//!
//! A call is `POST {origin}/{name}` with body `{"data": ...}`. The function
//! answers `{"result": ...}` on success or `{"error": {"status", "message"}}`.

use crate::firestore::FirebaseSettings;
use crate::{FetchClient, FetchError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct CallableError {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// Client for callable functions in one Firebase project.
#[derive(Debug, Clone)]
pub struct CallableClient {
    client: FetchClient,
    origin: String,
    id_token: Option<String>,
}

impl CallableClient {
    pub fn new(client: FetchClient, settings: &FirebaseSettings) -> Self {
        Self {
            client,
            origin: settings.functions_origin(),
            id_token: None,
        }
    }

    /// Send a signed-in user's ID token with every call.
    pub fn with_id_token(mut self, token: impl Into<String>) -> Self {
        self.id_token = Some(token.into());
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Invoke `name` with `data` and decode its result.
    pub async fn call<Req, Res>(&self, name: &str, data: &Req) -> Result<Res, FetchError>
    where
        Req: Serialize + ?Sized + Sync,
        Res: DeserializeOwned,
    {
        let envelope = serde_json::json!({ "data": serde_json::to_value(data)? });
        let mut request = self
            .client
            .post(format!("{}/{}", self.origin, name))
            .json(&envelope)?;
        if let Some(token) = &self.id_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body: Value = match response.json() {
            Ok(body) => body,
            Err(e) if response.is_success() => return Err(e),
            Err(_) => {
                return Err(FetchError::HttpError {
                    status: response.status,
                    message: response.text().unwrap_or_default(),
                })
            }
        };

        if let Some(error) = body.get("error") {
            let error: CallableError =
                serde_json::from_value(error.clone()).unwrap_or_else(|_| CallableError {
                    status: "UNKNOWN".to_string(),
                    message: error.to_string(),
                });
            tracing::warn!(
                function = name,
                status = %error.status,
                message = %error.message,
                "Callable returned an error"
            );
            return Err(FetchError::Callable {
                function: name.to_string(),
                status: error.status,
                message: error.message,
            });
        }

        if !response.is_success() {
            return Err(FetchError::HttpError {
                status: response.status,
                message: body.to_string(),
            });
        }

        match body.get("result") {
            Some(result) => serde_json::from_value(result.clone())
                .map_err(|e| FetchError::ParseError(format!("{}: {}", name, e))),
            None => Err(FetchError::ParseError(format!(
                "{}: response has no result",
                name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn client(mock: Arc<MockTransport>) -> CallableClient {
        CallableClient::new(
            FetchClient::with_transport(mock),
            &FirebaseSettings::new("dental-demo"),
        )
    }

    #[tokio::test]
    async fn test_call_wraps_data_and_reads_result() {
        let mock = Arc::new(MockTransport::new().respond_json(200, json!({"result": {"n": 2}})));
        let result: Value = client(mock.clone())
            .with_id_token("tok")
            .call("double", &json!({"n": 1}))
            .await
            .unwrap();
        assert_eq!(result["n"], 2);

        let sent = &mock.requests()[0];
        assert_eq!(sent.url, "https://us-central1-dental-demo.cloudfunctions.net/double");
        assert_eq!(sent.json_body().unwrap(), json!({"data": {"n": 1}}));
        assert_eq!(sent.headers["Authorization"], "Bearer tok");
    }

    #[tokio::test]
    async fn test_error_payload() {
        let mock = Arc::new(MockTransport::new().respond_json(
            400,
            json!({"error": {"status": "INVALID_ARGUMENT", "message": "cart is empty"}}),
        ));
        let err = client(mock)
            .call::<_, Value>("createCheckoutSession", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Callable {
                function: "createCheckoutSession".into(),
                status: "INVALID_ARGUMENT".into(),
                message: "cart is empty".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_result() {
        let mock = Arc::new(MockTransport::new().respond_json(200, json!({"data": 1})));
        let err = client(mock).call::<_, Value>("f", &json!({})).await.unwrap_err();
        assert!(matches!(err, FetchError::ParseError(_)));
    }

    #[test]
    fn test_emulator_origin() {
        let mut settings = FirebaseSettings::new("p");
        settings.functions_url = Some("http://127.0.0.1:5001/p/us-central1/".into());
        let client = CallableClient::new(FetchClient::with_transport(Arc::new(MockTransport::new())), &settings);
        assert_eq!(client.origin(), "http://127.0.0.1:5001/p/us-central1");
    }
}
