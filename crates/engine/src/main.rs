//! RepForge engine - demo entry point.
//!
//! Runs one daily tick against JSON file stores, logs a sample workout,
//! and prints a status summary. The library crate carries the real API;
//! this binary exists to exercise it end to end against the filesystem.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repforge_engine::infrastructure::clock::{SystemClock, SystemRandom};
use repforge_engine::infrastructure::persistence::JsonFileStores;
use repforge_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repforge_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = std::env::var("REPFORGE_DATA_DIR").unwrap_or_else(|_| "data".into());
    tracing::info!(%data_dir, "starting RepForge engine");

    let stores = Arc::new(JsonFileStores::new(data_dir));
    let app = App::new(
        Arc::new(SystemClock),
        Arc::new(SystemRandom),
        stores.clone(),
        stores.clone(),
        stores.clone(),
        stores,
    );

    let report = app.daily_tick().await?;
    if report.reset_daily {
        tracing::info!("new day: daily quests regenerated");
    }
    for title in &report.unlocked_titles {
        tracing::info!(title = title.name, "title unlocked");
    }

    let workout = app.log_workout("Push-ups", 20, 300, 6).await?;
    tracing::info!(
        xp = workout.outcome.xp_awarded,
        levels = workout.outcome.level_up.levels_gained,
        "sample workout logged"
    );

    let status = app.status().await?;
    tracing::info!(
        level = status.player.level,
        experience = status.player.experience,
        title = %status.player.current_title,
        daily_quests = status.daily_quests.len(),
        urgent_quests = status.urgent_quests.len(),
        active_debuffs = status.active_debuffs.len(),
        "status"
    );
    if let Some(progress) = app.title_progress("Century Club").await? {
        tracing::info!(percent = (progress * 100.0).round(), "Century Club progress");
    }

    let stats = app.training_stats().await?;
    tracing::info!(
        streak = stats.current_streak,
        total_reps = stats.total_reps,
        favorite = stats.favorite_exercise.as_deref().unwrap_or("-"),
        "training stats"
    );

    Ok(())
}
