//! Storefront CLI

use std::{
    io::{self, Write as _},
    process,
    sync::Arc,
};

use clap::{Args, Parser, Subcommand};
use storefront::{
    cart::LineId,
    orders::{OrderDraft, OrderId, PaymentMethod},
    product::ProductId,
};
use storefront_app::{
    carts::{CartController, MutationOutcome},
    config::StorefrontConfig,
    context::AppContext,
    logging,
    notify::{AlwaysConfirm, ConfirmPrompt, Notice, Notifier, Severity},
    session::Credentials,
    views,
};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront client CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login(LoginArgs),
    /// Sign out and clear the persisted session
    Logout,
    /// Cart operations
    Cart(CartCommand),
    /// Order operations
    Orders(OrdersCommand),
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart with server-computed pricing
    Show,
    /// Add a product
    Add {
        /// Product id to add
        product_id: String,

        /// Units to add
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (0 removes the line)
    Set {
        /// Cart line id
        line_id: String,

        /// New quantity
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Cart line id
        line_id: String,
    },
    /// Remove every item
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
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
        order_id: String,
    },
    /// Place an order from the current cart
    Create {
        /// Resolved delivery address reference
        #[arg(long)]
        delivery_address: String,

        /// Payment method (only `cod` completes a checkout today)
        #[arg(long, default_value = "cod")]
        payment_method: PaymentMethod,

        /// Optional note for the seller
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Prints notices to stderr as `level: message` lines.
#[derive(Debug, Clone, Copy, Default)]
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        let level = match notice.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };

        eprintln!("{level}: {}", notice.message);
    }
}

/// Interactive y/N prompt on stdin.
#[derive(Debug, Clone, Copy, Default)]
struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        let _flush = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = logging::init(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let context = AppContext::from_config(&cli.config);

    match cli.command {
        Commands::Login(args) => login(&context, args).await,
        Commands::Logout => logout(&context).await,
        Commands::Cart(CartCommand { command }) => cart(&context, command).await,
        Commands::Orders(OrdersCommand { command }) => orders(&context, command).await,
    }
}

async fn login(context: &AppContext, args: LoginArgs) -> Result<(), String> {
    let credentials = Credentials {
        email: args.email,
        password: args.password,
    };

    let user = context
        .session
        .login(&credentials)
        .await
        .map_err(|error| format!("login failed: {error}"))?;

    println!("signed in as {} <{}>", user.name, user.email);

    Ok(())
}

async fn logout(context: &AppContext) -> Result<(), String> {
    context.session.logout().await;

    println!("signed out");

    Ok(())
}

fn confirm_for(command: &CartSubcommand) -> Arc<dyn ConfirmPrompt> {
    match command {
        CartSubcommand::Clear { yes: true } => Arc::new(AlwaysConfirm),
        _ => Arc::new(StdinConfirm),
    }
}

async fn cart(context: &AppContext, command: CartSubcommand) -> Result<(), String> {
    let controller = CartController::new(
        Arc::clone(&context.carts),
        Arc::clone(&context.session),
        Arc::new(StderrNotifier),
        confirm_for(&command),
        context.events.clone(),
    );

    controller.start().await;

    let outcome = match command {
        CartSubcommand::Show => None,
        CartSubcommand::Add {
            product_id,
            quantity,
        } => Some(
            controller
                .add(&ProductId::from(product_id.as_str()), quantity)
                .await,
        ),
        CartSubcommand::Set { line_id, quantity } => Some(
            controller
                .set_quantity(&LineId::from(line_id.as_str()), quantity)
                .await,
        ),
        CartSubcommand::Remove { line_id } => {
            Some(controller.remove(&LineId::from(line_id.as_str())).await)
        }
        CartSubcommand::Clear { .. } => Some(controller.clear().await),
    };

    let snapshot = controller.snapshot();
    println!("{}", views::cart_table(&snapshot));
    println!();
    println!("{}", views::summary_block(snapshot.summary()));

    match outcome {
        Some(MutationOutcome::Denied) => Err("sign in to manage your cart".to_string()),
        Some(MutationOutcome::Failed) => Err("cart update failed".to_string()),
        Some(MutationOutcome::Rejected) => Err("no such line in your cart".to_string()),
        _ => Ok(()),
    }
}

async fn orders(context: &AppContext, command: OrdersSubcommand) -> Result<(), String> {
    if !context.session.is_signed_in() {
        return Err("sign in to view your orders".to_string());
    }

    match command {
        OrdersSubcommand::List => {
            let orders = context
                .orders
                .user_orders()
                .await
                .map_err(|error| format!("failed to list orders: {error}"))?;

            println!("{}", views::orders_table(&orders));
        }
        OrdersSubcommand::Show { order_id } => {
            let order = context
                .orders
                .order(&OrderId::from(order_id.as_str()))
                .await
                .map_err(|error| format!("failed to fetch order: {error}"))?;

            println!("{}", views::order_detail(&order));
        }
        OrdersSubcommand::Create {
            delivery_address,
            payment_method,
            notes,
        } => {
            let draft = OrderDraft {
                delivery_address,
                payment_method,
                notes,
            };

            let order_id = context
                .orders
                .create_order(&draft)
                .await
                .map_err(|error| format!("failed to place order: {error}"))?;

            println!("order placed: {order_id}");
        }
    }

    Ok(())
}
