//! Annotation read and save handlers.

use super::{get_dataset, require_split, require_str_param};
use crate::server::AppState;
use serde_json::Value;
use tagger_core::{AnnotationRecord, TaggerError};

pub async fn get_annotation(state: &AppState, params: &Value) -> tagger_core::Result<Value> {
    let dataset = get_dataset(params);
    let split = require_split(params)?;
    let filename = require_str_param(params, "filename", "filename")?;

    let record = state
        .api
        .resolve(dataset.as_deref(), split, &filename)
        .await?;
    Ok(serde_json::to_value(record)?)
}

pub async fn save_annotation(state: &AppState, params: &Value) -> tagger_core::Result<Value> {
    let dataset = get_dataset(params);
    let split = require_split(params)?;
    let filename = require_str_param(params, "filename", "filename")?;

    let payload = params
        .get("record")
        .or_else(|| params.get("data"))
        .cloned()
        .ok_or_else(|| TaggerError::InvalidParams {
            message: "Missing required parameter: record".to_string(),
        })?;
    let record: AnnotationRecord =
        serde_json::from_value(payload).map_err(|e| TaggerError::InvalidParams {
            message: format!("Invalid annotation record: {}", e),
        })?;

    let outcome = state
        .api
        .save(dataset.as_deref(), split, &filename, record)
        .await?;
    Ok(serde_json::to_value(outcome)?)
}
