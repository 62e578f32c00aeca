//! Server-side wiring from Spin variables to the data adapters.

use std::future::Future;
use std::sync::Arc;

use dental_data::{
    CallableClient, CheckoutClient, ContactClient, FetchClient, FetchError, FirebaseSettings,
    FirestoreCatalog, ProductCatalog, RetryPolicy, StripeSettings,
};
use dental_observability::{LogFormat, LogLevel, LoggingConfig};
use leptos::server_fn::error::ServerFnError;
use send_wrapper::SendWrapper;

const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Message shown when the category load gives up.
pub const CATEGORY_LOAD_FAILED: &str = "We couldn't load categories. Please refresh the page.";

fn variable(name: &str) -> Option<String> {
    spin_sdk::variables::get(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Install the JSON subscriber once per component instance.
pub fn init_logging() {
    let level = variable("log_level")
        .and_then(|v| v.parse::<LogLevel>().ok())
        .unwrap_or_default();
    let config = LoggingConfig::default()
        .with_level(level)
        .with_format(LogFormat::Json);
    if let Err(e) = dental_observability::init_logging(&config) {
        eprintln!("Logging disabled: {e}");
    }
}

/// Storefront settings read from Spin variables on each request.
#[derive(Debug, Clone)]
pub struct Settings {
    pub origin: String,
    pub firebase: FirebaseSettings,
    pub stripe: StripeSettings,
    pub retry_attempts: u32,
}

impl Settings {
    pub fn from_variables() -> Result<Self, ServerFnError> {
        let project_id = variable("firebase_project_id")
            .ok_or_else(|| ServerFnError::new("firebase_project_id is not configured"))?;

        let mut firebase = FirebaseSettings::new(project_id);
        firebase.api_key = variable("firebase_api_key");
        firebase.functions_url = variable("firebase_functions_url");
        if let Some(region) = variable("firebase_functions_region") {
            firebase.functions_region = region;
        }

        let mut stripe = StripeSettings::default();
        stripe.publishable_key = variable("stripe_publishable_key");
        stripe.portal_login_url = variable("stripe_portal_login_url");

        Ok(Self {
            origin: variable("site_origin")
                .unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
                .trim_end_matches('/')
                .to_string(),
            firebase,
            stripe,
            retry_attempts: variable("catalog_retry_attempts")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        })
    }

    pub fn catalog(&self) -> Result<Arc<dyn ProductCatalog>, ServerFnError> {
        let catalog =
            FirestoreCatalog::new(FetchClient::new(), self.firebase.clone()).map_err(fetch_error)?;
        Ok(Arc::new(catalog))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts)
    }

    fn callable(&self) -> CallableClient {
        CallableClient::new(FetchClient::new(), &self.firebase)
    }

    pub fn checkout_client(&self) -> CheckoutClient {
        CheckoutClient::new(self.callable(), self.stripe.clone())
    }

    pub fn contact_client(&self) -> ContactClient {
        ContactClient::new(self.callable())
    }
}

/// Adapter futures are not `Send` on wasm32; the WASI executor is single
/// threaded, so wrapping them is sound.
pub fn local<F: Future>(future: F) -> SendWrapper<F> {
    SendWrapper::new(future)
}

pub fn fetch_error(e: FetchError) -> ServerFnError {
    tracing::warn!(error = %e, "Adapter call failed");
    match e {
        FetchError::Validation(message) => ServerFnError::new(message),
        FetchError::RetriesExhausted { .. } => ServerFnError::new(CATEGORY_LOAD_FAILED),
        other => ServerFnError::new(other.to_string()),
    }
}
