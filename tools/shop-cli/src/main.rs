//! Shop CLI - Command line client for the shop backend.
//!
//! Commands:
//! - `shop cart` - Show and change the session cart, follow the count badge
//! - `shop products` - Product grid and product admin
//! - `shop categories` - Category grid and category admin
//! - `shop customers` - Customer admin
//! - `shop orders` - Order admin
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shop_observability::{init_logging, LogLevel};

use commands::{CartArgs, CategoriesArgs, ConfigArgs, CustomersArgs, OrdersArgs, ProductsArgs};

/// Shop CLI - Browse the catalog and manage the cart
#[derive(Parser)]
#[command(name = "shop")]
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

    /// Deployment variant from the config file
    #[arg(long, global = true)]
    variant: Option<String>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and change the cart
    Cart(CartArgs),

    /// Browse and manage products
    Products(ProductsArgs),

    /// Browse and manage categories
    Categories(CategoriesArgs),

    /// Manage customers
    Customers(CustomersArgs),

    /// Manage orders
    Orders(OrdersArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let loaded =
        context::Context::load(cli.config.as_deref(), cli.variant, cli.yes, output.clone());
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let mut log = ctx.config.log;
    if cli.verbose {
        log = log.with_level(LogLevel::Debug);
    }
    if let Err(e) = init_logging(log) {
        ctx.output.warn(&e.to_string());
    }

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Customers(args) => commands::customers::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        if ctx.output.is_verbose() {
            ctx.output.error(&format!("{:#}", e));
        } else {
            ctx.output.error(&e.to_string());
        }
        std::process::exit(1);
    }

    Ok(())
}
