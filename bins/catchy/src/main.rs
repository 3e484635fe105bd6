//! Catchy storefront CLI
//!
//! Runs one storefront action per invocation against the configured server.
//! Exit codes: 0 completed, 1 rejected or failed, 2 declined, 3 login
//! required, 4 configuration error.

use anyhow::Result;
use catchy_cli::output::Status;
use catchy_core::error::exit_codes;
use catchy_storefront::endpoints::{NewProduct, ProductUpdate};
use catchy_storefront::{
    ActionOutcome, ApiError, ClientConfig, HttpTransport, StaticToken, Storefront,
    StorefrontClient,
};
use catchy_telemetry::{metrics, TelemetryConfig};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

mod page;

use page::TerminalPage;

/// Command-line client for the Catchy storefront
#[derive(Parser)]
#[command(name = "catchy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to catchy.toml (searched in standard locations if omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Server origin, overrides the config file
    #[arg(long, global = true, env = "CATCHY_BASE_URL")]
    base_url: Option<String>,

    /// File holding the session cookie
    #[arg(long, global = true)]
    cookie_file: Option<PathBuf>,

    /// Bearer token to send instead of reading the cookie
    #[arg(long, global = true)]
    token: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Mirror logs into a file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Output format for listings (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add {
        /// Product to add
        product_id: u64,

        /// How many
        #[arg(short, long, default_value = "1")]
        quantity: i32,
    },

    /// Change the quantity of a cart item
    Update {
        /// Cart item to change
        cart_item_id: u64,

        /// New quantity
        quantity: i32,
    },

    /// Remove an item from the cart
    Remove {
        /// Cart item to remove
        cart_item_id: u64,
    },

    /// Show how many items are in the cart
    Cart,

    /// Place an order for the current cart
    Checkout,

    /// List your orders
    Orders,

    /// Manage products (admin)
    Product {
        #[command(subcommand)]
        action: ProductCommand,
    },

    /// Move an order to another status (admin)
    OrderStatus {
        /// Order to change
        order_id: u64,

        /// New status, e.g. SHIPPED
        status: String,
    },
}

#[derive(Subcommand)]
enum ProductCommand {
    /// Create a product
    Create(ProductFields),

    /// Change some fields of a product
    Update {
        /// Product to change
        product_id: u64,

        #[command(flatten)]
        fields: OptionalProductFields,
    },

    /// Delete a product
    Delete {
        /// Product to delete
        product_id: u64,
    },
}

#[derive(Args, Clone)]
struct ProductFields {
    /// Product name
    #[arg(long)]
    name: String,
    /// Longer description
    #[arg(long, default_value = "")]
    description: String,
    /// Category label
    #[arg(long, default_value = "")]
    category: String,
    /// Price as entered, e.g. 9.50
    #[arg(long)]
    price: String,
    /// Image URL
    #[arg(long, default_value = "")]
    image_url: String,
    /// Units in stock
    #[arg(long, default_value = "0")]
    stock: String,
}

#[derive(Args)]
struct OptionalProductFields {
    /// Product name
    #[arg(long)]
    name: Option<String>,
    /// Longer description
    #[arg(long)]
    description: Option<String>,
    /// Category label
    #[arg(long)]
    category: Option<String>,
    /// Price as entered, e.g. 9.50
    #[arg(long)]
    price: Option<String>,
    /// Image URL
    #[arg(long)]
    image_url: Option<String>,
    /// Units in stock
    #[arg(long)]
    stock: Option<String>,
}

impl From<ProductFields> for NewProduct {
    fn from(fields: ProductFields) -> Self {
        Self {
            name: fields.name,
            description: fields.description,
            category: fields.category,
            price: fields.price,
            image_url: fields.image_url,
            stock: fields.stock,
        }
    }
}

impl From<OptionalProductFields> for ProductUpdate {
    fn from(fields: OptionalProductFields) -> Self {
        Self {
            name: fields.name,
            description: fields.description,
            category: fields.category,
            price: fields.price,
            image_url: fields.image_url,
            stock: fields.stock,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig {
        log_file: cli.log_file.clone(),
        ..if cli.verbose {
            TelemetryConfig::verbose()
        } else {
            TelemetryConfig::default()
        }
    };
    if let Err(e) = catchy_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let code = match runtime.block_on(run(cli)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            match e.downcast_ref::<ApiError>() {
                Some(ApiError::Config(_) | ApiError::ConfigFile(_)) => exit_codes::CONFIG_ERROR,
                _ => exit_codes::FAILURE,
            }
        }
    };

    debug!(metrics = %metrics().export_json(), "Session metrics");
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

async fn run(cli: Cli) -> Result<i32> {
    let client = build_client(&cli)?;
    let format = cli.format;

    let mut page = TerminalPage::new(cli.yes);
    if let Commands::Product {
        action: ProductCommand::Create(ref fields),
    } = cli.command
    {
        page = page.with_product_form(NewProduct::from(fields.clone()));
    }
    let storefront = Storefront::new(client, Arc::new(page));

    let outcome = match cli.command {
        Commands::Add {
            product_id,
            quantity,
        } => storefront.add_to_cart(product_id, quantity).await,
        Commands::Update {
            cart_item_id,
            quantity,
        } => storefront.update_cart_quantity(cart_item_id, quantity).await,
        Commands::Remove { cart_item_id } => storefront.remove_from_cart(cart_item_id).await,
        Commands::Checkout => storefront.place_order().await,
        Commands::Cart => {
            return Ok(match storefront.refresh_cart_count().await {
                Some(_) => exit_codes::SUCCESS,
                None => exit_codes::FAILURE,
            });
        }
        Commands::Orders => return list_orders(&storefront, &format).await,
        Commands::Product { action } => match action {
            ProductCommand::Create(_) => storefront.create_product().await,
            ProductCommand::Update { product_id, fields } => {
                let update = ProductUpdate::from(fields);
                if update.is_empty() {
                    anyhow::bail!("nothing to update; pass at least one field");
                }
                storefront.update_product(product_id, &update).await
            }
            ProductCommand::Delete { product_id } => storefront.delete_product(product_id).await,
        },
        Commands::OrderStatus { order_id, status } => {
            storefront.update_order_status(order_id, &status).await
        }
    };

    if outcome == ActionOutcome::LoginRequired {
        Status::warning(&catchy_core::Error::login_required().to_string());
    }
    Ok(exit_code(&outcome))
}

fn build_client(cli: &Cli) -> Result<StorefrontClient> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(ref url) = cli.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(ref path) = cli.cookie_file {
        config = config.with_cookie_file(path.clone());
    }

    let client = match cli.token {
        Some(ref token) => {
            let transport = Arc::new(HttpTransport::new(&config)?);
            StorefrontClient::from_parts(config, transport, Arc::new(StaticToken::new(token.clone())))
        }
        None => StorefrontClient::with_config(config)?,
    };
    Ok(client)
}

async fn list_orders(storefront: &Storefront, format: &str) -> Result<i32> {
    let orders = match storefront.client().orders().mine().await {
        Ok(orders) => orders,
        Err(e) => {
            Status::error("Error loading orders");
            debug!(error = %e, "Order list failed");
            return Ok(exit_codes::FAILURE);
        }
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&orders)?);
        return Ok(exit_codes::SUCCESS);
    }

    Status::header("Orders");
    if orders.is_empty() {
        println!("  {}", "No orders yet".dimmed());
    }
    for order in &orders {
        println!(
            "  #{:<6} {:<12} {:>10} {}",
            order.id.map(|id| id.to_string()).unwrap_or_default(),
            order.status.as_deref().unwrap_or("-"),
            order
                .total_price
                .map(|p| format!("{p:.2}"))
                .unwrap_or_default(),
            order.order_date.as_deref().unwrap_or("").dimmed()
        );
    }
    Ok(exit_codes::SUCCESS)
}

fn exit_code(outcome: &ActionOutcome) -> i32 {
    match outcome {
        ActionOutcome::Completed => exit_codes::SUCCESS,
        ActionOutcome::Rejected { .. } | ActionOutcome::Failed => exit_codes::FAILURE,
        ActionOutcome::Declined => exit_codes::DECLINED,
        ActionOutcome::LoginRequired => exit_codes::LOGIN_REQUIRED,
    }
}
