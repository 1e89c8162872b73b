use std::collections::HashMap;
use std::sync::Arc;

use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::{app::create_app, mailgun::MailgunClient, state::SharedAppState};

pub const TEST_API_KEY: &str = "key-test";
pub const TEST_DOMAIN: &str = "mg.example.com";

/// Full Mailgun settings pointing at `base_url`, with `overrides` applied on top.
/// An override with an empty value removes the key.
pub fn test_config(base_url: &str, overrides: &[(&str, &str)]) -> HashMap<String, String> {
  let mut config: HashMap<String, String> = [
    ("MAILGUN_API_KEY", TEST_API_KEY),
    ("MAILGUN_DOMAIN", TEST_DOMAIN),
    ("MAILGUN_BASE_URL", base_url),
  ]
  .into_iter()
  .map(|(k, v)| (k.to_string(), v.to_string()))
  .collect();

  for (key, value) in overrides {
    if value.is_empty() {
      config.remove(*key);
    } else {
      config.insert(key.to_string(), value.to_string());
    }
  }
  config
}

pub fn app_with_config(config: HashMap<String, String>) -> Router {
  let state = SharedAppState::new(MailgunClient::default(), Arc::new(config));
  create_app(state)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(serde_json::to_vec(body).expect("serialize request body")))
    .expect("build request");

  send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("GET")
    .uri(uri)
    .body(Body::empty())
    .expect("build request");

  send(app, request).await
}

pub fn json_body(body: &Bytes) -> Value {
  serde_json::from_slice(body).expect("deserialize response")
}
