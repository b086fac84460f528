//! Fuel route planner CLI.
//!
//! Boots the REST API server, or runs a single planning request locally
//! for debugging without going through HTTP.

use clap::{Parser, Subcommand};
use eyre::Result;
use server::AppState;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fuelroute")]
#[command(about = "Fuel-cost-optimized route planning service")]
#[command(version)]
struct Cli {
    /// API key for the routing provider.
    #[arg(long, env = "ROUTING_API_KEY")]
    routing_api_key: String,

    /// Contact string sent as the geocoder's User-Agent.
    #[arg(long, env = "GEOCODER_CONTACT")]
    geocoder_contact: String,

    /// Postgres connection string for the fuel station store.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Enable verbose (debug) logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server.
    Serve {
        /// Address to bind to.
        #[arg(short, long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },

    /// Plan a single route locally and print the result, without
    /// starting the HTTP server.
    Plan {
        /// Starting location: a place name or a literal "lat,lon" pair.
        start: String,

        /// Destination location: a place name or a literal "lat,lon" pair.
        end: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let state = AppState::new(cli.routing_api_key, cli.geocoder_contact, &cli.database_url)?;

    match cli.command {
        Commands::Serve { addr } => server::run(addr, state).await?,
        Commands::Plan { start, end } => {
            let result = state.planner.plan(&start, &end).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
