use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use urbanroot_auth::FlowMode;
use urbanroot_catalog::{greeting, ConsultationType, Quality, Season, SystemClock};
use urbanroot_config::load as load_config;
use urbanroot_runtime::{shutdown_signal, telemetry, ClientServices};

mod output;
mod shell;

use output::Output;

#[derive(Parser)]
#[command(name = "urbanroot")]
#[command(about = "UrbanRoot client shell (login by default)")]
struct Cli {
    /// Print notifications and tables as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account: details, then a verification code
    Signup,
    /// Sign in with email and password (default)
    Login,
    /// Browse the reference tables
    Catalog {
        #[command(subcommand)]
        view: CatalogView,
    },
    /// Print the time-of-day greeting
    Greet {
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum CatalogView {
    /// List consultation experts and time slots
    Experts,
    /// Book a consultation with an expert
    Book {
        #[arg(long)]
        expert: u32,
        #[arg(long)]
        slot: Option<String>,
        #[arg(long, default_value_t = ConsultationType::Video)]
        kind: ConsultationType,
    },
    /// Recommended crops, optionally for one season
    Crops {
        #[arg(long, default_value_t = Season::Current)]
        season: Season,
    },
    /// Home farming plans and garden spaces
    Plans,
    /// Pick a plan for a garden space
    Subscribe {
        #[arg(long)]
        plan: String,
        #[arg(long)]
        space: Option<String>,
    },
    /// Current market prices
    Prices,
    /// Suggested listing price for a harvest
    Quote {
        #[arg(long)]
        crop: String,
        #[arg(long)]
        quantity: f64,
        #[arg(long, default_value_t = Quality::Premium)]
        quality: Quality,
    },
    /// Put a harvest up for resale
    List {
        #[arg(long)]
        crop: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long, default_value_t = Quality::Premium)]
        quality: Quality,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.json);

    match cli.command.unwrap_or(Commands::Login) {
        Commands::Signup => run_flow(FlowMode::Signup, output).await,
        Commands::Login => run_flow(FlowMode::Login, output).await,
        Commands::Catalog { view } => run_catalog(view, output),
        Commands::Greet { name } => {
            output.greeting(greeting(&SystemClock), name.as_deref())
        }
    }
}

async fn run_flow(mode: FlowMode, output: Output) -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    telemetry::init_tracing(&config.telemetry.filter).context("failed to initialise tracing")?;

    info!(%mode, "starting UrbanRoot shell");

    let services =
        ClientServices::initialise(&config).context("failed to initialise client services")?;

    tokio::select! {
        result = shell::run(&services, mode, output) => result,
        _ = shutdown_signal() => {
            println!();
            Ok(())
        }
    }
}

fn run_catalog(view: CatalogView, output: Output) -> anyhow::Result<()> {
    match view {
        CatalogView::Experts => output.experts(),
        CatalogView::Book { expert, slot, kind } => {
            let booking = urbanroot_catalog::book(expert, slot.as_deref(), kind)?;
            output.booking(&booking)
        }
        CatalogView::Crops { season } => output.crops(season),
        CatalogView::Plans => output.plans(),
        CatalogView::Subscribe { plan, space } => {
            let subscription = urbanroot_catalog::subscribe(&plan, space.as_deref())?;
            output.subscription(&subscription)
        }
        CatalogView::Prices => output.prices(),
        CatalogView::Quote {
            crop,
            quantity,
            quality,
        } => {
            let price = urbanroot_catalog::suggested_price(&crop, quantity, quality)
                .with_context(|| format!("no market price for {crop}"))?;
            output.quote(&crop, quantity, quality, price)
        }
        CatalogView::List {
            crop,
            quantity,
            quality,
        } => {
            let listing =
                urbanroot_catalog::list_harvest(crop.as_deref(), quantity.as_deref(), quality)?;
            output.listing(&listing)
        }
    }
}
