//! Blast Dashboard — browse an agent's marketing blasts and preview the
//! target area, reach and price of a radius tier.

use std::sync::Arc;

use blast_core::config::AppConfig;
use blast_core::{GeoPoint, StatusFilter};
use blast_management::{available_actions, open_rate, BlastStore};
use blast_targeting::{AddressResolver, EditSession, ResolutionOutcome, StaticGeocoder, RADIUS_TIERS};
use clap::{Parser, Subcommand};
use tracing::info;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "blast-dashboard")]
#[command(about = "Marketing blast dashboard for real-estate agents")]
#[command(version)]
struct Cli {
    /// Start with an empty registry instead of the demo blasts
    #[arg(long, default_value_t = false)]
    no_demo_data: bool,

    /// Geocoder timeout in milliseconds (overrides config)
    #[arg(long, env = "BLAST_DASHBOARD__GEOCODER__TIMEOUT_MS")]
    geocoder_timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List blasts matching the status filter and title search
    List {
        /// All, Sent, Scheduled or Draft
        #[arg(short, long, default_value = "All")]
        status: StatusFilter,

        /// Case-insensitive title search
        #[arg(short = 'q', long, default_value = "")]
        search: String,
    },

    /// Show dashboard totals
    Summary,

    /// Print the radius tier table
    Tiers,

    /// Preview the target area for a radius tier
    Target {
        /// Radius in miles; must be one of the tiers
        #[arg(short, long, default_value_t = 3.0)]
        radius: f64,

        /// Address to center on
        #[arg(short, long)]
        address: Option<String>,

        /// Center latitude (used with --lng when no address is given)
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Center longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blast_dashboard=info".into()),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    if cli.no_demo_data {
        config.dashboard.seed_demo_data = false;
    }
    if let Some(timeout_ms) = cli.geocoder_timeout_ms {
        config.geocoder.timeout_ms = timeout_ms;
    }

    info!(
        seed_demo_data = config.dashboard.seed_demo_data,
        geocoder_timeout_ms = config.geocoder.timeout_ms,
        "Configuration loaded"
    );

    match cli.command {
        Commands::List { status, search } => {
            let store = BlastStore::from_config(&config.dashboard);
            for campaign in store.filter(status, &search) {
                let actions: Vec<String> = available_actions(&campaign)
                    .iter()
                    .map(|a| format!("{a:?}"))
                    .collect();
                println!(
                    "{:<32} {:<10} delivered {:>6}  open rate {:>5.1}%  [{}]",
                    campaign.title,
                    campaign.status,
                    campaign.delivered,
                    open_rate(&campaign),
                    actions.join(", ")
                );
            }
        }
        Commands::Summary => {
            let store = BlastStore::from_config(&config.dashboard);
            println!("{}", serde_json::to_string_pretty(&store.summary())?);
        }
        Commands::Tiers => {
            for tier in RADIUS_TIERS {
                println!("{}", tier.label());
            }
        }
        Commands::Target {
            radius,
            address,
            lat,
            lng,
        } => {
            let mut session = EditSession::new(Uuid::new_v4(), &config.targeting)?;
            session.select_radius(radius)?;

            if let (Some(lat), Some(lng)) = (lat, lng) {
                session.relocate(GeoPoint::try_new(lat, lng)?)?;
            }
            if let Some(address) = address {
                let resolver =
                    AddressResolver::new(Arc::new(StaticGeocoder::with_demo_addresses()), &config.geocoder);
                if let ResolutionOutcome::Applied(resolved) =
                    session.resolve_address(&resolver, &address).await?
                {
                    if resolved.is_ambiguous() {
                        eprintln!("Warning: address matched several places; showing best match only");
                    }
                }
            }

            println!("Tier:    {}", session.tier().label());
            println!("{}", serde_json::to_string_pretty(session.area())?);
            println!("Radius:  {:.2} m", session.area().radius_meters());
        }
    }

    Ok(())
}
