//! Trolley storefront CLI
//!
//! A thin command-line front over the cart library: browse the menu, mutate
//! the locally-persisted cart, reconcile it with the remote cart, check out,
//! and read order history.

use std::{process::ExitCode, sync::Arc};

use clap::{Args, Parser, Subcommand};
use trolley::{
    api::{HttpStorefrontClient, StorefrontApi},
    auth::{AuthSession, BearerToken},
    cart::{CartStore, ItemId},
    checkout::{PaymentMethod, ShippingInfo},
    money::Price,
    storage::JsonFileStorage,
};

#[derive(Debug, Parser)]
#[command(name = "trolley", about = "Storefront cart CLI", long_about = None)]
struct Cli {
    /// Storefront API base URL
    #[arg(long, env = "TROLLEY_API_URL")]
    api_url: String,

    /// Path of the durable local cart file
    #[arg(long, env = "TROLLEY_CART_FILE", default_value = "trolley-cart.json")]
    cart_file: String,

    /// Bearer token for authenticated operations
    #[arg(long, env = "TROLLEY_API_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the menu catalog
    Menu,

    /// Inspect or mutate the cart
    Cart(CartCommand),

    /// Read order history
    Orders(OrdersCommand),

    /// Place an order from the current cart
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart lines, count, and subtotal
    List,

    /// Add one of a menu item by product id
    Add {
        /// Product id from the menu
        id: String,
    },

    /// Remove a line by product id
    Remove {
        /// Product id of the line
        id: String,
    },

    /// Set a line's quantity (0 removes the line)
    Set {
        /// Product id of the line
        id: String,

        /// New absolute quantity
        quantity: u32,
    },

    /// Empty the cart
    Clear,

    /// Merge the local cart with the remote cart
    Sync,
}

#[derive(Debug, Args)]
struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List your orders
    List,

    /// Show one order
    Show {
        /// Order id
        id: String,
    },
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Recipient full name
    #[arg(long)]
    name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Street address
    #[arg(long)]
    address: String,

    /// City
    #[arg(long)]
    city: String,

    /// Delivery fee in cents; delivery is free by default
    #[arg(long, default_value_t = 0)]
    delivery_fee: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    if let Err(error) = run(Cli::parse()).await {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<(), String> {
    let api = Arc::new(HttpStorefrontClient::new(&cli.api_url));
    let mut store = CartStore::new(Box::new(JsonFileStorage::new(&cli.cart_file)), api.clone());

    if let Some(token) = &cli.token {
        store.restore_session(AuthSession::LoggedIn(BearerToken::new(token.clone())));
    }

    match cli.command {
        Commands::Menu => menu(api.as_ref()).await,
        Commands::Cart(CartCommand { command }) => cart(command, &mut store, api.as_ref()).await,
        Commands::Orders(OrdersCommand { command }) => {
            orders(command, api.as_ref(), cli.token.as_deref()).await
        }
        Commands::Checkout(args) => checkout(args, &mut store).await,
    }
}

async fn menu(api: &HttpStorefrontClient) -> Result<(), String> {
    let items = api
        .menu_items()
        .await
        .map_err(|error| format!("failed to fetch menu: {error}"))?;

    for item in items {
        println!("{}\t{}\t{}\t{}", item.id, item.name, item.price, item.category);
    }

    Ok(())
}

async fn cart(
    command: CartSubcommand,
    store: &mut CartStore,
    api: &HttpStorefrontClient,
) -> Result<(), String> {
    match command {
        CartSubcommand::List => {
            for line in store.lines() {
                println!(
                    "{}\t{} x{}\t{}",
                    line.id,
                    line.name,
                    line.quantity,
                    line.line_total()
                );
            }

            println!("items: {}", store.item_count());
            println!("subtotal: {}", store.subtotal());
        }
        CartSubcommand::Add { id } => {
            let wanted = ItemId::new(id);
            let items = api
                .menu_items()
                .await
                .map_err(|error| format!("failed to fetch menu: {error}"))?;

            let item = items
                .into_iter()
                .find(|item| item.id == wanted)
                .ok_or_else(|| format!("no menu item with id {wanted}"))?;

            store.add_item(item).await;
            println!("subtotal: {}", store.subtotal());
        }
        CartSubcommand::Remove { id } => {
            store.remove_item(&ItemId::new(id)).await;
        }
        CartSubcommand::Set { id, quantity } => {
            store.set_quantity(&ItemId::new(id), quantity).await;
        }
        CartSubcommand::Clear => {
            store.clear().await;
        }
        CartSubcommand::Sync => {
            store
                .sync_with_remote()
                .await
                .map_err(|error| format!("cart sync failed: {error}"))?;

            println!("cart synced: {} items", store.item_count());
        }
    }

    Ok(())
}

async fn orders(
    command: OrdersSubcommand,
    api: &HttpStorefrontClient,
    token: Option<&str>,
) -> Result<(), String> {
    let token = token
        .map(BearerToken::new)
        .ok_or("set TROLLEY_API_TOKEN to read order history")?;

    match command {
        OrdersSubcommand::List => {
            let orders = api
                .my_orders(token)
                .await
                .map_err(|error| format!("failed to fetch orders: {error}"))?;

            for order in orders {
                println!(
                    "{}\t{}\t{}\t{}",
                    order.id,
                    order.order_number.as_deref().unwrap_or("-"),
                    order.status,
                    order.total
                );
            }
        }
        OrdersSubcommand::Show { id } => {
            let order = api
                .order(token, ItemId::new(id))
                .await
                .map_err(|error| format!("failed to fetch order: {error}"))?;

            println!(
                "order {} ({})",
                order.order_number.as_deref().unwrap_or(order.id.as_str()),
                order.status
            );

            for line in &order.items {
                println!("  {} x{}\t{}", line.name, line.quantity, line.price);
            }

            println!("subtotal: {}", order.subtotal);
            println!("tax: {}", order.tax);
            println!("delivery: {}", order.delivery_fee);
            println!("total: {}", order.total);
        }
    }

    Ok(())
}

async fn checkout(args: CheckoutArgs, store: &mut CartStore) -> Result<(), String> {
    let shipping = ShippingInfo {
        full_name: args.name,
        email: args.email,
        address: args.address,
        city: args.city,
    };

    let order = store
        .place_order(
            shipping,
            PaymentMethod::CashOnDelivery,
            Price::from_cents(args.delivery_fee),
        )
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    println!(
        "order placed: {} total {}",
        order.order_number.as_deref().unwrap_or(order.id.as_str()),
        order.total
    );

    Ok(())
}
