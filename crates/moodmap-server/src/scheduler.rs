//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring hotspot refresh.

use std::sync::Arc;

use moodmap_heatmap::HeatmapOutcome;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::api::SharedHeatmap;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised, the
/// cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    heatmap: SharedHeatmap,
    config: Arc<moodmap_core::AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_refresh_job(&scheduler, heatmap, config).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the hotspot refresh on `config.refresh_cron`.
///
/// Each tick regenerates the heatmap for every emotion in
/// `config.refresh_emotions`, which upserts fresh hotspot rows.
async fn register_refresh_job(
    scheduler: &JobScheduler,
    heatmap: SharedHeatmap,
    config: Arc<moodmap_core::AppConfig>,
) -> Result<(), JobSchedulerError> {
    let emotions: Arc<[String]> = config.refresh_emotions.clone().into();

    let job = Job::new_async(config.refresh_cron.as_str(), move |_uuid, _lock| {
        let heatmap = Arc::clone(&heatmap);
        let emotions = Arc::clone(&emotions);

        Box::pin(async move {
            tracing::info!(emotions = emotions.len(), "scheduler: starting hotspot refresh");
            let refreshed = refresh_hotspots(&heatmap, &emotions).await;
            tracing::info!(refreshed, "scheduler: hotspot refresh complete");
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron = %config.refresh_cron, "scheduler: hotspot refresh registered");
    Ok(())
}

/// Run the heatmap for each emotion; returns how many produced real data.
async fn refresh_hotspots(heatmap: &SharedHeatmap, emotions: &[String]) -> usize {
    let mut refreshed = 0;

    for emotion in emotions {
        let run = heatmap.run(emotion).await;
        match run.outcome {
            HeatmapOutcome::RealData { hotspots, .. } => {
                tracing::debug!(emotion = %emotion, hotspots, "scheduler: emotion refreshed");
                refreshed += 1;
            }
            HeatmapOutcome::Fallback { reason } => {
                tracing::debug!(emotion = %emotion, reason = %reason, "scheduler: emotion fell back");
            }
        }
    }

    refreshed
}
