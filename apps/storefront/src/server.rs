//! Server-side rendering for Spin/WASI.

use leptos::{config::get_configuration, task::Executor as LeptosExecutor};
use leptos_wasi::{
    handler::HandlerError,
    prelude::{IncomingRequest, ResponseOutparam, WasiExecutor},
};
use wasi::exports::http::incoming_handler::Guest;
use wasi::http::proxy::export;

use crate::api::{
    CreateCheckoutSession, CreatePortalLink, GetAllProducts, GetCategories,
    GetCategoryProducts, GetProduct, SearchProducts, SendContactEmail,
};
use crate::app::{shell, App};

struct StorefrontServer;

impl Guest for StorefrontServer {
    fn handle(request: IncomingRequest, response_out: ResponseOutparam) {
        crate::backend::init_logging();

        let executor = WasiExecutor::new(leptos_wasi::executor::Mode::Stalled);
        if let Err(e) = LeptosExecutor::init_local_custom_executor(executor.clone()) {
            tracing::error!(error = ?e, "Executor init failed");
            return;
        }
        executor.run_until(async {
            if let Err(e) = handle_request(request, response_out).await {
                tracing::error!(error = ?e, "Request failed");
            }
        })
    }
}

async fn handle_request(
    request: IncomingRequest,
    response_out: ResponseOutparam,
) -> Result<(), HandlerError> {
    use leptos_wasi::prelude::Handler;

    let conf = match get_configuration(None) {
        Ok(conf) => conf,
        Err(e) => {
            tracing::error!(error = %e, "Invalid Leptos configuration");
            return Ok(());
        }
    };
    let leptos_options = conf.leptos_options;

    Handler::build(request, response_out)?
        // Catalog
        .with_server_fn::<GetAllProducts>()
        .with_server_fn::<GetCategoryProducts>()
        .with_server_fn::<SearchProducts>()
        .with_server_fn::<GetProduct>()
        .with_server_fn::<GetCategories>()
        // Checkout and contact
        .with_server_fn::<CreateCheckoutSession>()
        .with_server_fn::<CreatePortalLink>()
        .with_server_fn::<SendContactEmail>()
        .generate_routes(App)
        .handle_with_context(move || shell(leptos_options.clone()), || {})
        .await?;

    Ok(())
}

export!(StorefrontServer with_types_in wasi);
