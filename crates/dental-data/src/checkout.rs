//! Hosted checkout and billing portal.
//!
//! Payment happens entirely on the hosted checkout page. The storefront only
//! asks the `createCheckoutSession` function for a session and redirects to
//! its URL; the page sends the customer back to `/cart?success=true` or
//! `/cart?canceled=true`.

use crate::callable::CallableClient;
use crate::FetchError;
use dental_commerce::cart::{Cart, CartItem};
use dental_commerce::CheckoutSessionId;
use dental_router::{view_to_url, CheckoutOutcome, View};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CREATE_CHECKOUT_SESSION: &str = "createCheckoutSession";
pub const CREATE_PORTAL_LINK: &str = "createPortalLink";

/// Hosted checkout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StripeSettings {
    /// Publishable key, for pages that load the payment script.
    pub publishable_key: Option<String>,
    /// Static billing portal login link.
    pub portal_login_url: Option<String>,
}

/// Where the checkout page returns the customer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutUrls {
    /// Cart return URLs under a site origin such as `https://shop.example`.
    pub fn for_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        let url = |outcome| {
            format!(
                "{}{}",
                origin,
                view_to_url(&View::Cart {
                    checkout: Some(outcome)
                })
            )
        };
        Self {
            success_url: url(CheckoutOutcome::Succeeded),
            cancel_url: url(CheckoutOutcome::Canceled),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductData {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceData {
    pub currency: String,
    /// Unit price in cents.
    pub unit_amount: i64,
    pub product_data: ProductData,
}

/// One checkout line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineItem {
    pub price_data: PriceData,
    pub quantity: i64,
}

impl LineItem {
    pub fn from_cart_item(item: &CartItem) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert("productId".to_string(), item.id.to_string());
        if !item.item_number.is_empty() {
            metadata.insert("itemNumber".to_string(), item.item_number.to_string());
        }
        Self {
            price_data: PriceData {
                currency: item.price.currency.checkout_code(),
                unit_amount: item.price.amount_cents,
                product_data: ProductData {
                    name: item.name.clone(),
                    images: item.image.iter().cloned().collect(),
                    metadata,
                },
            },
            quantity: item.quantity,
        }
    }
}

/// Payload of `createCheckoutSession`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
    pub mode: &'static str,
}

impl CheckoutSessionRequest {
    /// Build the request, rejecting an empty cart.
    pub fn from_cart(cart: &Cart, urls: &CheckoutUrls) -> Result<Self, FetchError> {
        if cart.is_empty() {
            return Err(FetchError::Validation("Your cart is empty".to_string()));
        }
        Ok(Self {
            line_items: cart.items.iter().map(LineItem::from_cart_item).collect(),
            success_url: urls.success_url.clone(),
            cancel_url: urls.cancel_url.clone(),
            mode: "payment",
        })
    }
}

/// A created checkout session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSession {
    #[serde(alias = "sessionId")]
    pub id: CheckoutSessionId,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortalLink {
    pub url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PortalLinkRequest<'a> {
    return_url: &'a str,
}

/// Checkout and billing portal functions.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    callable: CallableClient,
    settings: StripeSettings,
}

impl CheckoutClient {
    pub fn new(callable: CallableClient, settings: StripeSettings) -> Self {
        Self { callable, settings }
    }

    /// Create a hosted checkout session for the cart.
    pub async fn create_checkout_session(
        &self,
        cart: &Cart,
        urls: &CheckoutUrls,
    ) -> Result<CheckoutSession, FetchError> {
        let request = CheckoutSessionRequest::from_cart(cart, urls)?;
        tracing::info!(
            lines = request.line_items.len(),
            items = cart.item_count(),
            "Creating checkout session"
        );
        let session: CheckoutSession = self
            .callable
            .call(CREATE_CHECKOUT_SESSION, &request)
            .await?;
        if session.url.is_empty() {
            return Err(FetchError::ParseError(
                "checkout session has no redirect URL".to_string(),
            ));
        }
        tracing::info!(session_id = %session.id, "Checkout session created");
        Ok(session)
    }

    /// Create a billing portal link that returns to `return_url`.
    pub async fn create_portal_link(&self, return_url: &str) -> Result<PortalLink, FetchError> {
        self.callable
            .call(CREATE_PORTAL_LINK, &PortalLinkRequest { return_url })
            .await
    }

    /// The static billing portal login link, when configured.
    pub fn portal_login_url(&self) -> Option<&str> {
        self.settings.portal_login_url.as_deref()
    }
}
