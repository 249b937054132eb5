use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use matchbook::api::state::AppState;
use matchbook::config::AppConfig;
use matchbook::models::{ArchetypeId, MatchRecord, MatchResult, TurnOrder, UserId};
use matchbook::stats::rankings::build_rankings;
use matchbook::stats::{dimensions, WinRateStats};
use matchbook::storage::{MatchStore, StorageConfig};

#[derive(Parser)]
#[command(name = "matchbook")]
#[command(about = "Personal match tracker for a collectible card game")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Record a match
    Log {
        /// User recording the match
        #[arg(long)]
        user: String,

        /// Your archetype id
        #[arg(long)]
        archetype: String,

        /// Opponent archetype id (defaults to the reserved unknown entry)
        #[arg(long, default_value = "unknown")]
        opponent: String,

        /// Turn order: first, second or unknown
        #[arg(long, default_value = "unknown")]
        turn: String,

        /// Result: win, loss or draw
        #[arg(long)]
        result: String,

        /// Free-text note
        #[arg(long)]
        note: Option<String>,
    },

    /// List a user's recorded matches
    Matches {
        #[arg(long)]
        user: String,

        /// Max matches to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Delete a recorded match
    DeleteMatch {
        #[arg(long)]
        user: String,

        /// Match id
        id: String,
    },

    /// Show a user's win-rate overview
    Stats {
        #[arg(long)]
        user: String,
    },

    /// Show cross-user win-count rankings
    Rankings,

    /// List known archetypes
    Archetypes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config file is optional; defaults apply when it's absent.
    let config_path = PathBuf::from(&cli.config);
    let mut config = if config_path.exists() {
        AppConfig::from_file(&config_path)
            .with_context(|| format!("loading config from {:?}", config_path))?
    } else {
        AppConfig::default()
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }

    // Initialize tracing
    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting matchbook v{}", env!("CARGO_PKG_VERSION"));

    let store = MatchStore::new(StorageConfig::new(config.data_dir.clone()));

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(store);
            let app = matchbook::api::build_router(state)
                .layer(matchbook::api::cors_layer(&config.server.cors_origin));
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Log {
            user,
            archetype,
            opponent,
            turn,
            result,
            note,
        } => {
            let turn: TurnOrder = turn.parse().map_err(anyhow::Error::msg)?;
            let result: MatchResult = result.parse().map_err(anyhow::Error::msg)?;

            let mut record = MatchRecord::new(
                UserId::from(user),
                ArchetypeId::from(archetype),
                ArchetypeId::from(opponent),
                turn,
                result,
            );
            if let Some(note) = note {
                record = record.with_note(note);
            }

            store.append_match(&record)?;
            println!("Recorded {} ({})", record.result, record.id);
        }
        Commands::Matches { user, limit } => {
            let user = UserId::from(user);
            let mut matches = store.load_matches(&user)?;
            matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            println!("=== Matches for {} ({} total) ===\n", user, matches.len());
            for record in matches.iter().take(limit) {
                println!(
                    "  {}  {:4}  {} vs {}  [{}]  {}",
                    record.created_at.format("%Y-%m-%d %H:%M"),
                    record.result.to_string(),
                    record.archetype_id,
                    record.opponent_archetype_id,
                    record.turn.label(),
                    record.id,
                );
            }
        }
        Commands::DeleteMatch { user, id } => {
            let id: Uuid = id.parse().context("invalid match id")?;
            store.delete_match(&UserId::from(user), id)?;
            println!("Deleted match {}", id);
        }
        Commands::Stats { user } => {
            let user = UserId::from(user);
            let matches = store.load_matches(&user)?;

            let overall = WinRateStats::from_matches(&matches);
            let turns = dimensions::by_turn(&matches);

            println!("=== Stats for {} ===\n", user);
            print_stats_line("Overall", &overall);
            print_stats_line("Going first", &turns.first);
            print_stats_line("Going second", &turns.second);
            print_stats_line("Unrecorded", &turns.unknown);
        }
        Commands::Rankings => {
            let archetypes = store.load_archetypes()?;
            let rankings = build_rankings(&store, &archetypes)?;

            println!("=== Archetype rankings ({} entries) ===\n", rankings.archetypes.len());
            for (i, entry) in rankings.archetypes.iter().enumerate() {
                println!(
                    "  {:2}. {} ({}) — {} wins",
                    i + 1,
                    entry.archetype.name,
                    entry.archetype.class_name,
                    entry.wins,
                );
            }

            println!("\n=== Class rankings ===\n");
            for (i, entry) in rankings.classes.iter().enumerate() {
                println!("  {:2}. {} — {} wins", i + 1, entry.class_name, entry.wins);
            }
        }
        Commands::Archetypes => {
            let archetypes = store.load_archetypes()?;
            println!("=== Archetypes ({}) ===\n", archetypes.len());
            for archetype in &archetypes {
                let default_marker = if archetype.is_default { " [default]" } else { "" };
                println!(
                    "  {}  {} / {} ({}){}",
                    archetype.id,
                    archetype.name,
                    archetype.abbreviation,
                    archetype.class.display_name(),
                    default_marker,
                );
            }
        }
    }

    Ok(())
}

fn print_stats_line(label: &str, stats: &WinRateStats) {
    println!(
        "  {:<13} {:>3}-{}-{} ({} games, {:.1}%)",
        label, stats.wins, stats.losses, stats.draws, stats.count, stats.win_rate,
    );
}
