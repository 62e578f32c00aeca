//! Cart, checkout and account pages.

use dental_commerce::cart::{Cart, CartTotals};
use dental_router::{view_to_url, CheckoutOutcome, View};
use leptos::prelude::*;

use super::error_message;
use crate::api::{CreateCheckoutSession, CreatePortalLink};
use crate::state::{redirect_to, use_cart, CartState};

/// Shopping cart page
#[component]
pub fn CartPage(checkout: Option<CheckoutOutcome>) -> impl IntoView {
    let cart = use_cart();

    view! {
        <h2>"Shopping Cart"</h2>
        {checkout.map(|outcome| view! { <CheckoutNotice outcome=outcome/> })}
        {move || if cart.is_empty() {
            view! {
                <p>"Your cart is empty."</p>
                <a href=view_to_url(&View::AllProducts)>"Continue shopping"</a>
            }.into_any()
        } else {
            view! { <CartView cart=cart.snapshot()/> }.into_any()
        }}
    }
}

#[component]
fn CheckoutNotice(outcome: CheckoutOutcome) -> impl IntoView {
    match outcome {
        CheckoutOutcome::Succeeded => view! {
            <p class="notice success">
                "Thank you for your order! A confirmation email is on its way."
            </p>
        }
        .into_any(),
        CheckoutOutcome::Canceled => view! {
            <p class="notice">"Checkout was canceled. Your cart has been saved."</p>
        }
        .into_any(),
    }
}

#[component]
fn CartView(cart: Cart) -> impl IntoView {
    let state = use_cart();
    let totals = match cart.totals() {
        Ok(totals) => totals,
        Err(e) => {
            return view! { <p style="color: red;">"Error pricing cart: " {e.to_string()}</p> }
                .into_any()
        }
    };

    view! {
        <div style="max-width: 720px;">
            <p style="margin-bottom: 1rem;">{totals.item_count.to_string()} " item(s) in your cart"</p>
            {cart.items.into_iter().zip(totals.lines.clone()).map(|(item, line)| {
                let href = view_to_url(&View::product(item.item_number.as_str()));
                let id = item.id.clone();
                let remove_id = item.id.clone();
                view! {
                    <div class="cart-line">
                        <div>
                            <a href=href><strong>{item.name}</strong></a>
                            <p style="color: #666;">{item.manufacturer}</p>
                            <p style="color: #666;">{line.unit_price.display()} " each"</p>
                        </div>
                        <div class="cart-line-actions">
                            <input
                                type="number"
                                min="0"
                                value=line.quantity.to_string()
                                on:change=move |ev| {
                                    if let Ok(qty) = event_target_value(&ev).parse::<i64>() {
                                        if let Err(e) = state.set_quantity(&id, qty) {
                                            tracing::warn!(error = %e, "Quantity rejected");
                                        }
                                    }
                                }
                            />
                            <button type="button" class="link" on:click=move |_| state.remove(&remove_id)>
                                "Remove"
                            </button>
                            <strong>{line.total.display()}</strong>
                        </div>
                    </div>
                }
            }).collect::<Vec<_>>()}
            <CartSummary totals=totals/>
            <div style="margin-top: 1rem; display: flex; gap: 1rem; align-items: center;">
                <a href=view_to_url(&View::AllProducts) style="color: #666;">"Continue Shopping"</a>
                <CheckoutButton cart=state/>
                <button type="button" class="link" on:click=move |_| state.clear()>"Clear Cart"</button>
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn CartSummary(totals: CartTotals) -> impl IntoView {
    let shipping = if totals.has_free_shipping() {
        "FREE".to_string()
    } else {
        totals.shipping.display()
    };

    view! {
        <dl class="cart-summary">
            <dt>"Subtotal"</dt>
            <dd>{totals.subtotal.display()}</dd>
            <dt>"Shipping"</dt>
            <dd>{shipping}</dd>
            <dt>"Tax"</dt>
            <dd>{totals.tax.label()}</dd>
            <dt><strong>"Total"</strong></dt>
            <dd><strong>{totals.total.display()}</strong></dd>
        </dl>
    }
}

/// Starts hosted checkout and redirects once the session is created.
#[component]
fn CheckoutButton(cart: CartState) -> impl IntoView {
    let checkout_action = ServerAction::<CreateCheckoutSession>::new();
    let pending = checkout_action.pending();
    let value = checkout_action.value();
    let local_error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        if let Some(Ok(url)) = value.get() {
            redirect_to(&url);
        }
    });

    let on_checkout = move |_| match cart.snapshot().to_json() {
        Ok(cart_json) => {
            local_error.set(None);
            checkout_action.dispatch(CreateCheckoutSession { cart_json });
        }
        Err(e) => local_error.set(Some(e.to_string())),
    };

    view! {
        <button
            type="button"
            class="btn"
            disabled=move || pending.get()
            on:click=on_checkout
        >
            {move || if pending.get() { "Redirecting..." } else { "Proceed to Checkout" }}
        </button>
        {move || local_error.get().map(|e| view! {
            <p style="color: red; margin-top: 0.5rem;">"Error: " {e}</p>
        })}
        {move || value.get().and_then(|result| result.err()).map(|e| view! {
            <p style="color: red; margin-top: 0.5rem;">"Checkout failed: " {error_message(&e)}</p>
        })}
    }
}

/// Account page with the billing portal link.
#[component]
pub fn AccountPage() -> impl IntoView {
    let portal_action = ServerAction::<CreatePortalLink>::new();
    let pending = portal_action.pending();
    let value = portal_action.value();

    Effect::new(move |_| {
        if let Some(Ok(url)) = value.get() {
            redirect_to(&url);
        }
    });

    view! {
        <h2>{View::Account.title()}</h2>
        <p>"Review orders, download invoices and update payment methods in the billing portal."</p>
        <button
            type="button"
            class="btn"
            disabled=move || pending.get()
            on:click=move |_| {
                portal_action.dispatch(CreatePortalLink {});
            }
        >
            {move || if pending.get() { "Opening..." } else { "Open Billing Portal" }}
        </button>
        {move || value.get().and_then(|result| result.err()).map(|e| view! {
            <p style="color: red; margin-top: 0.5rem;">"Error: " {error_message(&e)}</p>
        })}
    }
}
