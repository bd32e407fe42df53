//! Mercantile CLI - Database migrations, accounts and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! mc-cli migrate
//!
//! # Register a user
//! mc-cli user create -e jane@example.com -p 'correct horse' -f Jane -l Doe
//!
//! # Check a pair of credentials
//! mc-cli user authenticate -e ' JANE@example.com ' -p 'correct horse'
//!
//! # Catalog
//! mc-cli catalog category "Example Category"
//! mc-cli catalog product -n "Example Product" -p 10.99 -q 5 -c 1
//! mc-cli catalog list 1
//! ```
//!
//! # Environment Variables
//!
//! See `mercantile_storefront::config` (`STOREFRONT_DATABASE_URL`,
//! `ARGON2_*`, `SENTRY_DSN`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use mercantile_storefront::config::StorefrontConfig;
use mercantile_storefront::telemetry;

mod commands;

#[derive(Parser)]
#[command(name = "mc-cli")]
#[command(author, version, about = "Mercantile CLI tools")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage categories and products
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Password confirmation (checked when given)
        #[arg(long)]
        password_confirmation: Option<String>,

        /// Given name
        #[arg(short, long)]
        first_name: String,

        /// Family name
        #[arg(short, long)]
        last_name: String,
    },
    /// Check an email/password pair
    Authenticate {
        /// Email address (case and surrounding whitespace are ignored)
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Create a category
    Category {
        /// Category name
        name: String,
    },
    /// Create a product
    Product {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price, e.g. 10.99
        #[arg(short, long)]
        price: String,

        /// Units in stock
        #[arg(short, long)]
        quantity: u32,

        /// Category ID
        #[arg(short, long)]
        category: i32,
    },
    /// List the products of a category
    List {
        /// Category ID
        category: i32,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init_tracing("mercantile_cli=info", cli.log_json);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = telemetry::init_sentry(&config);
    telemetry::init_tracing(
        "mercantile_cli=info,mercantile_storefront=info",
        cli.log_json,
    );

    let result: Result<(), Box<dyn std::error::Error>> = run(cli.command, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(
    command: Commands,
    config: &StorefrontConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Migrate => commands::migrate::storefront(config).await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                password_confirmation,
                first_name,
                last_name,
            } => {
                let form = commands::user::form(
                    &email,
                    &password,
                    password_confirmation.as_deref(),
                    &first_name,
                    &last_name,
                );
                commands::user::create(config, &form).await?;
            }
            UserAction::Authenticate { email, password } => {
                commands::user::authenticate(config, &email, &password).await?;
            }
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Category { name } => {
                commands::catalog::create_category(config, &name).await?;
            }
            CatalogAction::Product {
                name,
                price,
                quantity,
                category,
            } => {
                commands::catalog::create_product(config, &name, &price, quantity, category)
                    .await?;
            }
            CatalogAction::List { category } => {
                commands::catalog::list(config, category).await?;
            }
        },
    }
    Ok(())
}
