//! Keyed JSON persistence. Each slot is an independent `<key>.json` file
//! under the data directory; there is no transactional grouping across
//! slots. Absent or malformed slots load as defaults and are never fatal.

use crate::errors::AppError;
use crate::models::{AppData, DailyNutrition, InjectionRecord, RoutineSchedule, SubscriptionState};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub const INJECTIONS_KEY: &str = "injections";
pub const NUTRITION_KEY: &str = "nutrition";
pub const ROUTINE_KEY: &str = "routine";
pub const SUBSCRIPTION_KEY: &str = "subscription";

pub fn resolve_data_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(dir) = env::var("OZ_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    Ok(PathBuf::from("data"))
}

fn slot_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

async fn load_slot<T: DeserializeOwned>(dir: &Path, key: &str) -> Option<T> {
    let path = slot_path(dir, key);
    match fs::read(&path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                error!("failed to parse slot {key}: {err}");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!("failed to read slot {key}: {err}");
            None
        }
    }
}

pub async fn persist_slot<T: Serialize>(dir: &Path, key: &str, value: &T) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(value).map_err(AppError::internal)?;
    fs::write(slot_path(dir, key), payload)
        .await
        .map_err(AppError::internal)?;
    Ok(())
}

pub async fn remove_slot(dir: &Path, key: &str) -> Result<(), AppError> {
    match fs::remove_file(slot_path(dir, key)).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(AppError::internal(err)),
    }
}

/// Load all four slots into one in-memory aggregate at startup.
pub async fn load_data(dir: &Path) -> AppData {
    AppData {
        injections: load_slot::<Vec<InjectionRecord>>(dir, INJECTIONS_KEY)
            .await
            .unwrap_or_default(),
        nutrition: load_slot::<Vec<DailyNutrition>>(dir, NUTRITION_KEY)
            .await
            .unwrap_or_default(),
        routine: load_slot::<RoutineSchedule>(dir, ROUTINE_KEY).await,
        subscription: load_slot::<SubscriptionState>(dir, SUBSCRIPTION_KEY).await,
    }
}
