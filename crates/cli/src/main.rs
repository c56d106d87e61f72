//! Shopping Mall CLI - Catalog administration and shopping from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a product as the administrator
//! mall-cli -u admin -p admin4321 product add --name Lamp --category general --price 19.99 --stock 5
//!
//! # Browse and buy as the customer
//! mall-cli -u customer -p 1234 browse --search lamp
//! mall-cli -u customer -p 1234 cart add <ID> --quantity 2
//! mall-cli -u customer -p 1234 checkout
//! ```
//!
//! # Commands
//!
//! - `product` - Add, edit, delete and list products (administrator)
//! - `browse` - Search the catalog (customer)
//! - `cart` - Change and show the cart (customer)
//! - `checkout` - Buy the cart (customer)
//!
//! Files come from `--data-dir` when given, otherwise from the `MALL_*`
//! environment variables. Logs are written to stderr, as JSON when
//! `MALL_LOG_FORMAT=json`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopping_mall_core::{Category, NewProduct, Price, ProductId, ProductUpdate, Role};
use shopping_mall_storefront::services::AuthService;
use shopping_mall_storefront::{StoreConfig, Storefront};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "mall-cli")]
#[command(author, version, about = "Shopping Mall CLI")]
struct Cli {
    /// Directory holding products.csv, cart.csv and images/
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Account name (`admin` or `customer`)
    #[arg(short, long)]
    username: String,

    /// Account password
    #[arg(short, long)]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the catalog
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Search the catalog
    Browse {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only this category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Change or show the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Buy everything in the cart
    Checkout,
}

impl Commands {
    const fn required_role(&self) -> Role {
        match self {
            Self::Product { .. } => Role::Administrator,
            Self::Browse { .. } | Self::Cart { .. } | Self::Checkout => Role::Customer,
        }
    }
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a new product
    Add {
        #[arg(short, long)]
        name: String,

        /// ELECTRONICS, CLOTHING, FOOD, BOOKS or GENERAL (any case)
        #[arg(short, long, value_parser = parse_category)]
        category: Category,

        #[arg(long)]
        price: Price,

        #[arg(short, long)]
        stock: u32,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Change fields of a product
    Edit {
        id: ProductId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,

        #[arg(long)]
        price: Option<Price>,

        #[arg(short, long)]
        stock: Option<u32>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a product
    Delete { id: ProductId },
    /// Attach an image file to a product
    Image { id: ProductId, file: PathBuf },
    /// List every product
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add units of a product
    Add {
        id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Take one unit off a cart line
    Remove { id: ProductId },
    /// Remove a whole cart line
    Drop { id: ProductId },
    /// Show the cart and its total
    Show,
}

fn parse_category(input: &str) -> Result<Category, String> {
    Category::parse_lenient(input)
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopping_mall_storefront=info,shopping_mall_cli=info".into());

    // Logs go to stderr; stdout carries command output
    let json = std::env::var("MALL_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &mut std::io::stdout().lock());

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    AuthService::new().login_as(&cli.username, &cli.password, cli.command.required_role())?;

    let config = match &cli.data_dir {
        Some(dir) => StoreConfig::in_dir(dir),
        None => StoreConfig::from_env()?,
    };
    let mut store = Storefront::open(&config)?;

    match cli.command {
        Commands::Product { action } => match action {
            ProductAction::Add {
                name,
                category,
                price,
                stock,
                description,
            } => commands::admin::add(
                &mut store,
                out,
                NewProduct {
                    name,
                    category,
                    price,
                    stock,
                    description,
                },
            )?,
            ProductAction::Edit {
                id,
                name,
                category,
                price,
                stock,
                description,
            } => commands::admin::edit(
                &mut store,
                out,
                &id,
                ProductUpdate {
                    name,
                    category,
                    price,
                    stock,
                    description,
                    image_path: None,
                },
            )?,
            ProductAction::Delete { id } => commands::admin::delete(&mut store, out, &id)?,
            ProductAction::Image { id, file } => {
                commands::admin::image(&mut store, out, &id, &file)?;
            }
            ProductAction::List { json } => commands::admin::list(&store, out, json)?,
        },
        Commands::Browse {
            search,
            category,
            json,
        } => commands::customer::browse(&store, out, search.as_deref(), category, json)?,
        Commands::Cart { action } => match action {
            CartAction::Add { id, quantity } => {
                commands::customer::add_to_cart(&mut store, out, &id, quantity)?;
            }
            CartAction::Remove { id } => commands::customer::remove_one(&mut store, out, &id)?,
            CartAction::Drop { id } => commands::customer::drop_line(&mut store, out, &id)?,
            CartAction::Show => commands::customer::show_cart(&store, out)?,
        },
        Commands::Checkout => commands::customer::checkout(&mut store, out)?,
    }

    store.shutdown();
    Ok(())
}
