//! Model Store CLI - Drive the session store from a shell.
//!
//! State is kept in a file side-store directory (`MODEL_STORE_DATA_DIR`,
//! default `.model-store`), so a session started by `login` is still signed
//! in for the next command.
//!
//! # Usage
//!
//! ```bash
//! # Sign in as the demo shopper and buy two models
//! ms-cli login -e user@store.com -p user123
//! ms-cli checkout -i 1 -i 4 --name "Ivan Petrov" --email user@store.com \
//!     --phone "+7 999 123 45 67" --address "Moscow"
//! ms-cli orders mine
//!
//! # Sign in as the demo administrator and ship it
//! ms-cli login -e admin@store.com -p admin123 --admin
//! ms-cli orders all
//! ms-cli orders set-status 1733047200000 shipped
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` / `register` - Session management
//! - `catalog` - Browse and search models
//! - `checkout` - Place an order for the signed-in identity
//! - `orders` - List, summarize and update orders

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use model_store_core::{ItemId, OrderId, OrderStatus};
use model_store_storefront::error::AppError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "ms-cli")]
#[command(author, version, about = "Model Store CLI tools")]
struct Cli {
    /// Side-store directory (overrides `MODEL_STORE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Require an administrator account
        #[arg(long)]
        admin: bool,
    },
    /// Sign out
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Create a shopper account and sign in
    Register {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short, long)]
        confirm: String,
    },
    /// Browse the catalog
    Catalog {
        /// Match against model names and tags
        #[arg(short, long, default_value = "")]
        query: String,

        /// Restrict to one category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Place an order for the signed-in identity
    Checkout {
        /// Catalog item IDs (repeat to buy several)
        #[arg(short, long = "item", required = true)]
        items: Vec<ItemId>,

        /// Recipient name
        #[arg(long)]
        name: String,

        /// Recipient email
        #[arg(long)]
        email: String,

        /// Recipient phone
        #[arg(long)]
        phone: String,

        /// Delivery address
        #[arg(long)]
        address: String,
    },
    /// Inspect and manage orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Orders of the signed-in identity
    Mine,
    /// Every order (administrators only)
    All,
    /// Per-status counts for the signed-in identity
    Summary,
    /// Change an order's status (administrators only)
    SetStatus {
        /// Order ID
        order_id: OrderId,

        /// New status (pending, processing, shipped, delivered, cancelled)
        status: OrderStatus,
    },
}

fn main() {
    // Initialize tracing
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ms_cli=info,model_store_storefront=info".into());

    // JSON lines when MODEL_STORE_LOG_FORMAT=json, plain text otherwise
    let is_json = std::env::var("MODEL_STORE_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {}", e.user_message());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut store = commands::open_store(cli.data_dir)?;

    match cli.command {
        Commands::Login {
            email,
            password,
            admin,
        } => commands::session::login(&mut store, &email, &password, admin),
        Commands::Logout => {
            commands::session::logout(&mut store);
            Ok(())
        }
        Commands::Whoami => commands::session::whoami(&store),
        Commands::Register {
            email,
            name,
            password,
            confirm,
        } => commands::session::register(&mut store, &email, &name, &password, &confirm),
        Commands::Catalog { query, category } => {
            commands::catalog::list(&query, category.as_deref());
            Ok(())
        }
        Commands::Checkout {
            items,
            name,
            email,
            phone,
            address,
        } => {
            let contact = model_store_storefront::models::ShippingContact {
                name,
                email,
                phone,
                address,
            };
            commands::orders::checkout(&mut store, &items, contact).map(|_| ())
        }
        Commands::Orders { action } => match action {
            OrdersAction::Mine => commands::orders::mine(&store),
            OrdersAction::All => commands::orders::all(&store),
            OrdersAction::Summary => commands::orders::summary(&store),
            OrdersAction::SetStatus { order_id, status } => {
                commands::orders::set_status(&mut store, order_id, status)
            }
        },
    }
}
