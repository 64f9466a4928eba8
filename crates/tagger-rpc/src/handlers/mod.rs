//! JSON-RPC request handlers, split by domain.

mod annotations;
mod datasets;

use crate::server::AppState;
use crate::wrapper::wrap_response;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tagger_core::{Split, TaggerError};
use tracing::{debug, error, warn};

// ============================================================================
// JSON-RPC types
// ============================================================================

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
            id,
        }
    }
}

// ============================================================================
// Parameter extraction helpers
// ============================================================================

/// Extract an optional string parameter, supporting both snake_case and camelCase.
pub(crate) fn get_str_param<'a>(params: &'a Value, snake: &str, camel: &str) -> Option<&'a str> {
    params
        .get(snake)
        .or_else(|| params.get(camel))
        .and_then(|v| v.as_str())
}

/// Extract a required string parameter or return an error.
pub(crate) fn require_str_param(
    params: &Value,
    snake: &str,
    camel: &str,
) -> tagger_core::Result<String> {
    get_str_param(params, snake, camel)
        .map(String::from)
        .ok_or_else(|| TaggerError::InvalidParams {
            message: format!("Missing required parameter: {}", snake),
        })
}

/// Extract the required `split` parameter as a typed split.
pub(crate) fn require_split(params: &Value) -> tagger_core::Result<Split> {
    require_str_param(params, "split", "split")?.parse()
}

/// Extract the optional `dataset` parameter. An empty string counts as absent.
pub(crate) fn get_dataset(params: &Value) -> Option<String> {
    params
        .get("dataset")
        .and_then(|v| v.as_str())
        .or_else(|| get_str_param(params, "dataset_name", "datasetName"))
        .filter(|s| !s.is_empty())
        .map(String::from)
}

// ============================================================================
// HTTP entry points
// ============================================================================

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Main JSON-RPC handler.
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    let method = &request.method;
    let params = request.params.unwrap_or(Value::Object(Default::default()));
    let id = request.id.clone();

    debug!("RPC call: {}({:?})", method, params);

    if method == "health_check" {
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::success(id, json!({"status": "ok"}))),
        );
    }

    match dispatch_method(&state, method, &params).await {
        Ok(value) => {
            let wrapped = wrap_response(method, value);
            (StatusCode::OK, Json(JsonRpcResponse::success(id, wrapped)))
        }
        Err(e) => {
            if e.is_not_found() {
                warn!("RPC {} failed: {}", method, e);
            } else {
                error!("RPC error for {}: {}", method, e);
            }
            let code = e.to_rpc_error_code();
            (
                StatusCode::OK,
                Json(JsonRpcResponse::error(id, code, e.to_string())),
            )
        }
    }
}

/// Dispatch a method call to the appropriate handler.
async fn dispatch_method(
    state: &AppState,
    method: &str,
    params: &Value,
) -> tagger_core::Result<Value> {
    match method {
        // Datasets
        "list_datasets" => datasets::list_datasets(state, params).await,
        "list_images" => datasets::list_images(state, params).await,

        // Annotations
        "get_annotation" => annotations::get_annotation(state, params).await,
        "save_annotation" => annotations::save_annotation(state, params).await,

        _ => Err(TaggerError::InvalidParams {
            message: format!("Method not found: {}", method),
        }),
    }
}
