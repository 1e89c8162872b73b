use axum::response::Json as JsonResponse;
use serde_json::{json, Value};

use crate::AppError;

pub async fn post_only_handler() -> AppError {
  AppError::method_not_allowed("Method not allowed. Use POST")
}

pub async fn get_or_post_handler() -> AppError {
  AppError::method_not_allowed("Method not allowed. Use GET or POST")
}

pub async fn health_handler() -> JsonResponse<Value> {
  JsonResponse(json!({ "status": "ok" }))
}
