//! Cart pricing and checkout commands.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use dental_commerce::cart::{Cart, CartTotals};
use dental_data::{CheckoutSessionRequest, CheckoutUrls};
use dental_router::{view_to_url, View};
use dialoguer::Confirm;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Totals { file } => {
            let cart = load_cart(&ctx.resolve_path(&file))?;
            show_totals(ctx, &cart)
        }
        CartCommand::Checkout { file, yes, dry_run } => {
            let cart = load_cart(&ctx.resolve_path(&file))?;
            checkout(ctx, &cart, yes, dry_run).await
        }
        CartCommand::Portal { return_url } => portal(ctx, return_url).await,
    }
}

fn load_cart(path: &Path) -> Result<Cart> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cart file: {}", path.display()))?;
    Cart::from_json(&text).with_context(|| format!("Invalid cart file: {}", path.display()))
}

fn show_totals(ctx: &Context, cart: &Cart) -> Result<()> {
    let totals = cart.totals().context("Failed to price cart")?;

    if ctx.output.is_json() {
        ctx.output.json(&totals);
        return Ok(());
    }

    ctx.output.header(&View::cart().title());
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    for (item, line) in cart.items.iter().zip(&totals.lines) {
        ctx.output.list_item(&format!(
            "{} x {} @ {} = {}",
            line.quantity,
            item.name,
            line.unit_price.display(),
            line.total.display()
        ));
    }
    print_summary(ctx, &totals);
    Ok(())
}

fn print_summary(ctx: &Context, totals: &CartTotals) {
    ctx.output.info("");
    ctx.output.kv("items", &totals.item_count.to_string());
    ctx.output.kv("subtotal", &totals.subtotal.display());
    let shipping = if totals.has_free_shipping() {
        "FREE".to_string()
    } else {
        totals.shipping.display()
    };
    ctx.output.kv("shipping", &shipping);
    ctx.output.kv("tax", totals.tax.label());
    ctx.output.kv("total", &totals.total.display());
}

async fn checkout(ctx: &Context, cart: &Cart, yes: bool, dry_run: bool) -> Result<()> {
    let urls = CheckoutUrls::for_origin(&ctx.config.site.origin);
    // validates the cart before any prompt
    let request = CheckoutSessionRequest::from_cart(cart, &urls)?;

    if dry_run {
        ctx.output.json(&request);
        return Ok(());
    }

    let totals = cart.totals().context("Failed to price cart")?;
    if !ctx.output.is_json() {
        print_summary(ctx, &totals);
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Create a checkout session for {}?",
                totals.total.display()
            ))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Checkout cancelled.");
            return Ok(());
        }
    }

    let client = ctx.checkout_client()?;
    let spinner = ctx.output.spinner("Creating checkout session...");
    let session = client.create_checkout_session(cart, &urls).await;
    spinner.finish_and_clear();
    let session = session.context("Failed to create checkout session")?;

    if ctx.output.is_json() {
        ctx.output.json(&session);
        return Ok(());
    }

    ctx.output.success(&format!("Checkout session {} created", session.id));
    ctx.output.kv("redirect", &session.url);
    ctx.output.kv("success", &urls.success_url);
    ctx.output.kv("cancel", &urls.cancel_url);
    Ok(())
}

async fn portal(ctx: &Context, return_url: Option<String>) -> Result<()> {
    let return_url = return_url.unwrap_or_else(|| {
        format!(
            "{}{}",
            ctx.config.site.origin.trim_end_matches('/'),
            view_to_url(&View::Account)
        )
    });
    if !return_url.starts_with("http") {
        bail!("Return URL must be absolute: {}", return_url);
    }

    let client = ctx.checkout_client()?;
    let spinner = ctx.output.spinner("Creating portal link...");
    let link = client.create_portal_link(&return_url).await;
    spinner.finish_and_clear();

    match link {
        Ok(link) => {
            if ctx.output.is_json() {
                ctx.output.json(&link);
            } else {
                ctx.output.success("Billing portal link created");
                ctx.output.kv("url", &link.url);
            }
            Ok(())
        }
        // the static login link still works when the function is unavailable
        Err(e) => match client.portal_login_url() {
            Some(login) => {
                ctx.output
                    .warn(&format!("Portal link failed ({}); use the login link instead", e));
                ctx.output.kv("url", login);
                Ok(())
            }
            None => Err(anyhow::Error::new(e).context("Failed to create portal link")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_cart_normalizes() {
        let dir = std::env::temp_dir().join(format!("dental-cli-cart-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cart.json");
        std::fs::write(
            &path,
            r#"{"currency": "USD", "items": [
                {"id": "a", "name": "Gloves", "price": {"amount_cents": 1000, "currency": "USD"}, "quantity": 2},
                {"id": "b", "name": "Masks", "price": {"amount_cents": 500, "currency": "USD"}, "quantity": 1},
                {"id": "c", "name": "Bibs", "price": {"amount_cents": 300, "currency": "USD"}, "quantity": 0}
            ]}"#,
        )
        .unwrap();

        let cart = load_cart(&path).unwrap();
        assert_eq!(cart.items.len(), 2);
        let totals = cart.totals().unwrap();
        assert_eq!(totals.subtotal.amount_cents, 2500);
        assert_eq!(totals.total.amount_cents, 2500);
        assert!(totals.has_free_shipping());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_cart_file() {
        assert!(load_cart(Path::new("/definitely/not/here.json")).is_err());
    }
}
