//! Food Delivery CLI - accounts, restaurant browsing and checkout.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! fd-cli register -e diner@example.com -p hunter22 -c hunter22
//!
//! # Browse restaurants
//! fd-cli restaurants list
//! fd-cli restaurants search --cuisine italian
//!
//! # Place an order
//! fd-cli order -e diner@example.com -p hunter22 -r "Burger Barn" \
//!     --item Burger:2 --card 1234567812345678
//! ```
//!
//! # Commands
//!
//! - `register` - Create an account in the credential store
//! - `restaurants list|search` - Browse the restaurant directory
//! - `order` - Log in, fill a cart, check out and pay
//!
//! Configuration is read from the environment (see [`config`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use secrecy::SecretString;

use food_delivery_core::RestaurantFilter;

mod commands;
mod config;
mod store;

use commands::order::{DishSpec, OrderRequest, PaymentChoice};
use config::CliConfig;
use store::JsonUserStore;

#[derive(Parser)]
#[command(name = "fd-cli")]
#[command(author, version, about = "Food Delivery command-line ordering")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short, long)]
        confirm: String,
    },
    /// Browse restaurants
    Restaurants {
        #[command(subcommand)]
        action: RestaurantsAction,
    },
    /// Place an order
    Order {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Restaurant to order from
        #[arg(short, long)]
        restaurant: String,

        /// Dish to add, as DISH or DISH:QTY (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<DishSpec>,

        /// Dish to remove after adding (repeatable)
        #[arg(long)]
        remove: Vec<String>,

        /// Delivery address (defaults to `FD_DELIVERY_ADDRESS`)
        #[arg(short, long)]
        address: Option<String>,

        /// Payment method
        #[arg(long, value_enum, default_value_t = PaymentChoice::CreditCard)]
        payment: PaymentChoice,

        /// 16-digit card number (credit card payments)
        #[arg(long)]
        card: Option<String>,
    },
}

#[derive(Subcommand)]
enum RestaurantsAction {
    /// List all restaurants
    List,
    /// Search restaurants by filters
    Search {
        /// Cuisine type
        #[arg(long)]
        cuisine: Option<String>,

        /// Location (substring match)
        #[arg(long)]
        location: Option<String>,

        /// Minimum rating
        #[arg(long)]
        min_rating: Option<f64>,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "food_delivery_cli=info,food_delivery_core=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;

    match cli.command {
        Commands::Register {
            email,
            password,
            confirm,
        } => {
            let mut store = JsonUserStore::load(&config.users_file)?;
            commands::register::register(
                &mut store,
                &email,
                &SecretString::from(password),
                &SecretString::from(confirm),
            )?;
        }
        Commands::Restaurants { action } => {
            let directory = config.load_directory()?;
            match action {
                RestaurantsAction::List => commands::restaurants::list(&directory),
                RestaurantsAction::Search {
                    cuisine,
                    location,
                    min_rating,
                } => {
                    let filter = RestaurantFilter {
                        cuisine,
                        location,
                        min_rating,
                    };
                    commands::restaurants::search(&directory, &filter);
                }
            }
        }
        Commands::Order {
            email,
            password,
            restaurant,
            items,
            remove,
            address,
            payment,
            card,
        } => {
            let store = JsonUserStore::load(&config.users_file)?;
            let directory = config.load_directory()?;
            let request = OrderRequest {
                email,
                password: SecretString::from(password),
                restaurant,
                items,
                remove,
                delivery_address: address.unwrap_or_else(|| config.delivery_address.clone()),
                dish_price: config.dish_price,
                payment,
                card_number: card,
            };
            commands::order::place_order(&store, &directory, &request)?;
        }
    }
    Ok(())
}
