//! `db` sub-command handlers.

use clap::Subcommand;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Upsert neighborhoods from the seed file
    Seed,
}

/// # Errors
///
/// Returns an error if the database cannot be reached.
pub(crate) async fn run_db_ping(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    moodmap_db::health_check(pool).await?;
    println!("database reachable");
    Ok(())
}

/// # Errors
///
/// Returns an error if any migration fails.
pub(crate) async fn run_db_migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let applied = moodmap_db::run_migrations(pool).await?;
    println!("applied {applied} migration(s)");
    Ok(())
}

/// Load the neighborhoods seed file and upsert every entry.
///
/// Migrations are applied first so seeding works against a fresh database.
///
/// # Errors
///
/// Returns an error if the seed file is missing or invalid, or if any
/// database operation fails. A failed seed leaves no partial rows behind.
pub(crate) async fn run_db_seed(
    pool: &sqlx::PgPool,
    config: &moodmap_core::AppConfig,
) -> anyhow::Result<()> {
    let file = moodmap_core::load_neighborhoods(&config.neighborhoods_path)?;
    moodmap_db::run_migrations(pool).await?;

    let seeded = moodmap_db::seed_neighborhoods(pool, &file.neighborhoods).await?;
    tracing::info!(
        seeded,
        path = %config.neighborhoods_path.display(),
        "neighborhoods seeded"
    );
    println!(
        "seeded {seeded} neighborhood(s) from {}",
        config.neighborhoods_path.display()
    );
    Ok(())
}
