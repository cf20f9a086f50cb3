//! `heatmap` sub-command handlers.

use clap::Subcommand;
use moodmap_db::PgHeatmapStore;
use moodmap_heatmap::{HeatmapConfig, HeatmapGenerator, HeatmapOutcome};

/// Sub-commands available under `heatmap`.
#[derive(Debug, Subcommand)]
pub enum HeatmapCommands {
    /// Compute hotspots, persist them, and print the GeoJSON heatmap
    Generate {
        /// Emotion to map (defaults to `MOODMAP_DEFAULT_EMOTION`)
        #[arg(long)]
        emotion: Option<String>,
        /// Pretty-print the GeoJSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Show stored hotspots
    Status {
        /// Filter by emotion
        #[arg(long)]
        emotion: Option<String>,
    },
}

/// Generate the heatmap for `emotion` and write it to stdout.
///
/// The outcome (real data or fallback, with the reason) is reported on
/// stderr so stdout stays valid GeoJSON.
///
/// # Errors
///
/// Returns an error if the fallback dataset cannot be loaded or the output
/// cannot be serialized. Storage failures during generation do not error;
/// they produce the fallback heatmap.
pub(crate) async fn run_heatmap_generate(
    pool: sqlx::PgPool,
    config: &moodmap_core::AppConfig,
    emotion: &str,
    pretty: bool,
) -> anyhow::Result<()> {
    let generator = HeatmapGenerator::new(
        PgHeatmapStore::new(pool),
        HeatmapConfig::from_app_config(config)?,
    );

    let run = generator.run(emotion).await;
    match &run.outcome {
        HeatmapOutcome::RealData {
            hotspots,
            inserted,
            updated,
        } => eprintln!(
            "{emotion}: {hotspots} hotspot(s) from review data ({inserted} inserted, {updated} updated)"
        ),
        HeatmapOutcome::Fallback { reason } => {
            eprintln!("{emotion}: fallback dataset served ({reason})");
        }
    }

    let output = if pretty {
        serde_json::to_string_pretty(&run.collection)?
    } else {
        serde_json::to_string(&run.collection)?
    };
    println!("{output}");
    Ok(())
}

/// Print stored hotspots as a table, best first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_heatmap_status(
    pool: &sqlx::PgPool,
    emotion: Option<&str>,
) -> anyhow::Result<()> {
    let rows = moodmap_db::list_hotspots(pool, emotion).await?;

    if rows.is_empty() {
        println!(
            "no hotspots stored{}; run `heatmap generate` first",
            emotion.map(|e| format!(" for {e}")).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "{:<24}{:<14}{:>8}{:>9}  UPDATED",
        "NEIGHBORHOOD", "EMOTION", "SCORE", "REVIEWS"
    );
    for row in &rows {
        println!(
            "{:<24}{:<14}{:>8.3}{:>9}  {}",
            truncate(&row.neighborhood_name, 22),
            row.emotion,
            row.average_score,
            row.review_count,
            row.last_updated.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!("{}...", value.chars().take(max_chars - 3).collect::<String>())
    } else {
        value.to_string()
    }
}
