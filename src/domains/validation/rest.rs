use axum::{
  body::Bytes,
  extract::{Query, State},
  response::Json as JsonResponse,
  routing::{get, Router},
};
use serde_json::Value;

use super::model::{ValidateEmailQuery, ValidateEmailResponse};
use crate::{
  handlers::get_or_post_handler,
  state::{AppState, SharedAppState},
  AppError,
};

pub fn validation_routes() -> Router<SharedAppState> {
  Router::new().route(
    "/validate-mailgun-email",
    get(validate_email_query_handler)
      .post(validate_email_body_handler)
      .fallback(get_or_post_handler),
  )
}

pub async fn validate_email_query_handler(
  State(state): State<SharedAppState>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Result<JsonResponse<ValidateEmailResponse>, AppError> {
  let query = ValidateEmailQuery::from_pairs(pairs);

  state.validate_email(query.email).await.map(JsonResponse).map_err(Into::into)
}

pub async fn validate_email_body_handler(
  State(state): State<SharedAppState>,
  body: Bytes,
) -> Result<JsonResponse<ValidateEmailResponse>, AppError> {
  let payload: Value = serde_json::from_slice(&body)?;
  let email = payload.get("email").and_then(Value::as_str).map(str::to_string);

  state.validate_email(email).await.map(JsonResponse).map_err(Into::into)
}
