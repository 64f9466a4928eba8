//! Dataset and image listing handlers.

use super::{get_dataset, require_split};
use crate::server::AppState;
use serde_json::Value;

pub async fn list_datasets(state: &AppState, _params: &Value) -> tagger_core::Result<Value> {
    let datasets = state.api.list_datasets().await?;
    Ok(serde_json::to_value(datasets)?)
}

pub async fn list_images(state: &AppState, params: &Value) -> tagger_core::Result<Value> {
    let dataset = get_dataset(params);
    let split = require_split(params)?;
    let images = state.api.enumerate(dataset.as_deref(), split).await?;
    Ok(serde_json::to_value(images)?)
}
