//! Dental CLI - operator tool for the dental supply storefront.
//!
//! Commands:
//! - `dental route` - Resolve a URL to its view, or a view to its URL
//! - `dental catalog` - Browse products, categories and brands
//! - `dental blog` - List and read blog posts
//! - `dental cart` - Price a saved cart and start a hosted checkout
//! - `dental contact` - Send a contact message
//! - `dental config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dental_observability::{init_logging, LogLevel};

use commands::{BlogArgs, CartArgs, CatalogArgs, ConfigArgs, ContactArgs, RouteArgs};

/// Dental CLI - Inspect and operate the dental supply storefront
#[derive(Parser)]
#[command(name = "dental")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve storefront URLs and views
    Route(RouteArgs),

    /// Browse the product catalog
    Catalog(CatalogArgs),

    /// Read blog posts
    Blog(BlogArgs),

    /// Price carts and start checkout
    Cart(CartArgs),

    /// Send a contact message
    Contact(ContactArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let mut logging = ctx.config.logging.clone();
    if ctx.output.is_verbose() {
        logging.level = logging.level.min(LogLevel::Debug);
    }
    if let Err(e) = init_logging(&logging) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }

    let result = match cli.command {
        Commands::Route(args) => commands::route::run(args, &ctx).await,
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Blog(args) => commands::blog::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Contact(args) => commands::contact::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
