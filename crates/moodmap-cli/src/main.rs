mod db;
mod heatmap;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{db::DbCommands, heatmap::HeatmapCommands};

#[derive(Debug, Parser)]
#[command(name = "moodmap-cli")]
#[command(about = "Moodmap command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Generate and inspect emotion heatmaps
    Heatmap {
        #[command(subcommand)]
        command: HeatmapCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = moodmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries command output (GeoJSON, tables); logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = moodmap_db::PoolConfig::from_app_config(&config);
    let pool = moodmap_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Db { command } => match command {
            DbCommands::Ping => db::run_db_ping(&pool).await?,
            DbCommands::Migrate => db::run_db_migrate(&pool).await?,
            DbCommands::Seed => db::run_db_seed(&pool, &config).await?,
        },
        Commands::Heatmap { command } => match command {
            HeatmapCommands::Generate { emotion, pretty } => {
                let emotion =
                    moodmap_core::resolve_emotion(emotion.as_deref(), &config.default_emotion);
                heatmap::run_heatmap_generate(pool, &config, &emotion, pretty).await?;
            }
            HeatmapCommands::Status { emotion } => {
                let emotion = emotion
                    .as_deref()
                    .map(str::trim)
                    .filter(|e| !e.is_empty());
                heatmap::run_heatmap_status(&pool, emotion).await?;
            }
        },
    }

    Ok(())
}
