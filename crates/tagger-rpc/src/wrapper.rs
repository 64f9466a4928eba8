//! Response wrapping for frontend compatibility.
//!
//! The labeling frontend expects list responses wrapped as
//! `{success: true, <key>: [...]}` and a save acknowledgement of
//! `{status: "success", file}`. Annotation records are returned as-is.

use serde_json::{json, Value};

/// Wrap API responses to match the frontend's expected format.
pub fn wrap_response(method: &str, result: Value) -> Value {
    match method {
        "list_datasets" => {
            json!({
                "success": true,
                "datasets": if result.is_null() { json!([]) } else { result }
            })
        }

        "list_images" => {
            json!({
                "success": true,
                "images": if result.is_null() { json!([]) } else { result }
            })
        }

        "save_annotation" => {
            let mut ack = json!({"status": "success"});
            if let (Some(ack), Some(file)) = (ack.as_object_mut(), result.get("file")) {
                ack.insert("file".to_string(), file.clone());
            }
            ack
        }

        // Records pass through unchanged
        _ => result,
    }
}
