//! Server functions.
//!
//! Products and categories are read from Firestore; checkout, the billing
//! portal and the contact form go through Firebase callable functions.
//! Filtering, sorting and pagination happen in the browser.

use dental_commerce::catalog::{Category, Product};
use leptos::server_fn::error::ServerFnError;

#[cfg(feature = "ssr")]
use crate::backend::{fetch_error, local, Settings};

// ============================================================================
// Catalog
// ============================================================================

/// Every product in the catalog.
#[leptos::server(prefix = "/api")]
pub async fn get_all_products() -> Result<Vec<Product>, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        let settings = Settings::from_variables()?;
        local(async move {
            let catalog = settings.catalog()?;
            catalog.get_all_products().await.map_err(fetch_error)
        })
        .await
    }

    #[cfg(not(feature = "ssr"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Products in a leaf or parent category.
#[leptos::server(prefix = "/api")]
pub async fn get_category_products(category: String) -> Result<Vec<Product>, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        let settings = Settings::from_variables()?;
        local(async move {
            let catalog = settings.catalog()?;
            catalog
                .get_products_by_category(&category)
                .await
                .map_err(fetch_error)
        })
        .await
    }

    #[cfg(not(feature = "ssr"))]
    {
        let _ = category;
        Err(ServerFnError::new("Server-only function"))
    }
}

#[leptos::server(prefix = "/api")]
pub async fn search_products(query: String) -> Result<Vec<Product>, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        let settings = Settings::from_variables()?;
        local(async move {
            let catalog = settings.catalog()?;
            catalog.search_products(&query).await.map_err(fetch_error)
        })
        .await
    }

    #[cfg(not(feature = "ssr"))]
    {
        let _ = query;
        Err(ServerFnError::new("Server-only function"))
    }
}

/// A single product by item number.
#[leptos::server(prefix = "/api")]
pub async fn get_product(item_number: String) -> Result<Option<Product>, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        let settings = Settings::from_variables()?;
        local(async move {
            let catalog = settings.catalog()?;
            catalog.get_product(&item_number).await.map_err(fetch_error)
        })
        .await
    }

    #[cfg(not(feature = "ssr"))]
    {
        let _ = item_number;
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Category records for the mega menu, retried on transient failures.
#[leptos::server(prefix = "/api")]
pub async fn get_categories() -> Result<Vec<Category>, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        let settings = Settings::from_variables()?;
        local(async move {
            let catalog = settings.catalog()?;
            dental_data::load_categories(catalog.as_ref(), &settings.retry_policy())
                .await
                .map_err(fetch_error)
        })
        .await
    }

    #[cfg(not(feature = "ssr"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

// ============================================================================
// Checkout
// ============================================================================

/// Start a hosted checkout for a cart snapshot. Returns the redirect URL.
#[leptos::server(prefix = "/api")]
pub async fn create_checkout_session(cart_json: String) -> Result<String, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        use dental_commerce::cart::Cart;
        use dental_data::CheckoutUrls;

        let settings = Settings::from_variables()?;
        let cart = Cart::from_json(&cart_json).map_err(|e| ServerFnError::new(e.to_string()))?;
        let urls = CheckoutUrls::for_origin(&settings.origin);

        let session = local(async move {
            settings
                .checkout_client()
                .create_checkout_session(&cart, &urls)
                .await
        })
        .await
        .map_err(fetch_error)?;
        Ok(session.url)
    }

    #[cfg(not(feature = "ssr"))]
    {
        let _ = cart_json;
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Billing portal link that returns to the account page.
///
/// Falls back to the static login link when the function call fails.
#[leptos::server(prefix = "/api")]
pub async fn create_portal_link() -> Result<String, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        use dental_router::{view_to_url, View};

        let settings = Settings::from_variables()?;
        let return_url = format!("{}{}", settings.origin, view_to_url(&View::Account));
        let client = settings.checkout_client();

        local(async move {
            match client.create_portal_link(&return_url).await {
                Ok(link) => Ok(link.url),
                Err(e) => match client.portal_login_url() {
                    Some(login) => {
                        tracing::warn!(error = %e, "Portal link failed; using login link");
                        Ok(login.to_string())
                    }
                    None => Err(fetch_error(e)),
                },
            }
        })
        .await
    }

    #[cfg(not(feature = "ssr"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

// ============================================================================
// Contact
// ============================================================================

/// Send the contact form. Returns the confirmation to show.
#[leptos::server(prefix = "/api")]
pub async fn send_contact_email(
    name: String,
    email: String,
    subject: String,
    message: String,
) -> Result<String, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        use dental_data::ContactRequest;

        let settings = Settings::from_variables()?;
        let request = ContactRequest::new(name, email, subject, message);

        let response = local(async move {
            settings.contact_client().send_contact_email(&request).await
        })
        .await
        .map_err(fetch_error)?;

        if !response.success {
            return Err(ServerFnError::new(format!(
                "Your message could not be sent: {}",
                response.message
            )));
        }
        if response.message.is_empty() {
            Ok("Thanks for reaching out. We'll get back to you shortly.".to_string())
        } else {
            Ok(response.message)
        }
    }

    #[cfg(not(feature = "ssr"))]
    {
        let _ = (name, email, subject, message);
        Err(ServerFnError::new("Server-only function"))
    }
}
