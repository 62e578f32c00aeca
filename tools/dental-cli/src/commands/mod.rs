//! CLI command implementations.

pub mod blog;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod route;

use clap::{Args, Subcommand};

/// Arguments for the route command.
#[derive(Args)]
pub struct RouteArgs {
    /// URL or path to resolve (e.g. `/category/equipment/dental-chairs`).
    #[arg(required_unless_present = "view")]
    pub url: Option<String>,

    /// Build the URL for a view given as JSON instead.
    #[arg(long, conflicts_with = "url")]
    pub view: Option<String>,

    /// Resolve category slugs against the live category list.
    #[arg(long)]
    pub live: bool,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,

    /// Sort order (featured, price-asc, price-desc, name-asc, name-desc, brand).
    #[arg(short, long, global = true, default_value = "featured")]
    pub sort: String,

    /// Page number.
    #[arg(short, long, global = true, default_value = "1")]
    pub page: i64,

    /// Items per page (default: catalog.per_page).
    #[arg(long, global = true)]
    pub per_page: Option<i64>,

    /// Only products from this manufacturer.
    #[arg(short, long, global = true)]
    pub brand: Option<String>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List all products.
    List,
    /// List the category tree.
    Categories,
    /// Products in a department or leaf category.
    Category {
        /// Category name or slug.
        name: String,
    },
    /// Free-text product search.
    Search {
        /// Search terms.
        query: String,
    },
    /// Show one product.
    Show {
        /// Item number.
        item_number: String,
    },
    /// Everyday Essentials products.
    Essentials,
    /// Products on promotion.
    Promotions,
    /// Brand directory.
    Brands,
}

/// Arguments for the blog command.
#[derive(Args)]
pub struct BlogArgs {
    #[command(subcommand)]
    pub command: BlogCommand,

    /// Read posts from this JSON file instead of the bundled posts.
    #[arg(long, global = true)]
    pub posts: Option<String>,
}

#[derive(Subcommand)]
pub enum BlogCommand {
    /// List posts, newest first.
    List {
        /// Only posts with this tag.
        #[arg(short, long)]
        tag: Option<String>,

        /// Only posts on or after this date (YYYY-MM-DD).
        #[arg(long)]
        since: Option<String>,

        /// Show at most N posts.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show a post.
    Show {
        /// Post id.
        id: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Price a saved cart.
    Totals {
        /// Cart JSON file.
        file: String,
    },
    /// Start a hosted checkout for a saved cart.
    Checkout {
        /// Cart JSON file.
        file: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,

        /// Build the checkout request without calling the function.
        #[arg(long)]
        dry_run: bool,
    },
    /// Create a billing portal link.
    Portal {
        /// Where the portal returns to (default: the account page).
        #[arg(long)]
        return_url: Option<String>,
    },
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    #[command(subcommand)]
    pub command: ContactCommand,
}

#[derive(Subcommand)]
pub enum ContactCommand {
    /// Send a contact message. Missing fields are prompted for.
    Send {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        message: Option<String>,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Firebase project id.
        #[arg(long)]
        project: Option<String>,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
