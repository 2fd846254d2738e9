//! Frituur CLI - browse, order and manage the shop from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List snacks
//! frituur products --category 1
//!
//! # Order two portions of fries and a frikandel for customer 3
//! frituur order --customer 3 --product 1 --product 1 --product 4
//!
//! # Add a product
//! frituur product add --name Bitterballen --price 4.50 --category 1
//!
//! # Delete a category, skipping the prompt
//! frituur category delete --id 2 --yes
//! ```
//!
//! # Environment Variables
//!
//! - `FRITUUR_API_URL` - Base URL of the order/product service
//! - `FRITUUR_API_TOKEN` - Bearer token for catalog changes
//! - `FRITUUR_CACHE_TTL_SECS` - Query cache lifetime
//! - `SENTRY_DSN` - Report warnings and errors to Sentry
//! - `RUST_LOG` - Log filter (default `frituur=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use frituur_client::{ApiClient, ApiConfig, QueryCache};

mod commands;
mod output;
mod telemetry;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "frituur")]
#[command(author, version, about = "Frituur ordering and catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show this category
        #[arg(short, long)]
        category: Option<i32>,
    },
    /// List categories
    Categories,
    /// List orders
    Orders {
        /// Only show this customer's orders
        #[arg(short, long)]
        customer: Option<i32>,
    },
    /// Place a pickup order
    Order {
        #[arg(short, long)]
        customer: i32,

        /// Product to add; repeat for more units
        #[arg(short, long = "product", required = true)]
        products: Vec<i32>,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
}

#[derive(Args)]
struct ProductFields {
    #[arg(short, long)]
    name: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    #[arg(short, long)]
    price: Option<String>,

    /// Image file name
    #[arg(short, long)]
    url: Option<String>,

    #[arg(short, long)]
    category: Option<String>,
}

#[derive(Subcommand)]
enum ProductAction {
    /// Create a product
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Change fields of an existing product
    Edit {
        #[arg(long)]
        id: i32,

        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete {
        #[arg(long)]
        id: i32,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Create a category
    Add {
        #[arg(short, long)]
        name: String,
    },
    /// Rename a category
    Edit {
        #[arg(long)]
        id: i32,

        #[arg(short, long)]
        name: String,
    },
    /// Delete a category
    Delete {
        #[arg(long)]
        id: i32,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Sentry must be initialized before the subscriber
    let _sentry_guard = telemetry::init_sentry();
    telemetry::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let config = ApiConfig::from_env()?;
    let client = ApiClient::new(&config)?;
    let cache = QueryCache::new(&config);
    let ctx = commands::Context {
        client: &client,
        cache: &cache,
    };

    match cli.command {
        Commands::Products { category } => commands::catalog::list_products(&ctx, category).await?,
        Commands::Categories => commands::catalog::list_categories(&ctx).await?,
        Commands::Orders { customer } => commands::orders::list(&ctx, customer).await?,
        Commands::Order { customer, products } => {
            commands::orders::place(&ctx, customer, &products).await?;
        }
        Commands::Product { action } => match action {
            ProductAction::Add { fields } => {
                commands::catalog::add_product(&ctx, fields.into_pairs()).await?;
            }
            ProductAction::Edit { id, fields } => {
                commands::catalog::edit_product(&ctx, id, fields.into_pairs()).await?;
            }
            ProductAction::Delete { id, yes } => {
                commands::catalog::delete_product(&ctx, id, yes).await?;
            }
        },
        Commands::Category { action } => match action {
            CategoryAction::Add { name } => commands::catalog::add_category(&ctx, name).await?,
            CategoryAction::Edit { id, name } => {
                commands::catalog::edit_category(&ctx, id, name).await?;
            }
            CategoryAction::Delete { id, yes } => {
                commands::catalog::delete_category(&ctx, id, yes).await?;
            }
        },
    }
    Ok(())
}

impl ProductFields {
    /// Form inputs the user actually passed.
    fn into_pairs(self) -> Vec<(&'static str, String)> {
        [
            ("name", self.name),
            ("description", self.description),
            ("price", self.price),
            ("url", self.url),
            ("categoryId", self.category),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}
