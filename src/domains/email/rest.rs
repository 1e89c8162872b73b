use axum::{
  body::Bytes,
  extract::State,
  http::StatusCode,
  response::Json as JsonResponse,
  routing::{post, Router},
};
use serde_json::Value;

use super::model::SendEmailResponse;
use crate::{
  handlers::post_only_handler,
  state::{AppState, SharedAppState},
  AppError,
};

pub fn email_routes() -> Router<SharedAppState> {
  Router::new()
    .route(
      "/send-mailgun-email",
      post(send_simple_email_handler).fallback(post_only_handler),
    )
    .route(
      "/send-email",
      post(send_rich_email_handler).fallback(post_only_handler),
    )
}

pub async fn send_simple_email_handler(
  State(state): State<SharedAppState>,
  body: Bytes,
) -> Result<(StatusCode, JsonResponse<SendEmailResponse>), AppError> {
  let payload: Value = serde_json::from_slice(&body)?;

  let response = state.send_simple_email(payload).await?;
  Ok((StatusCode::ACCEPTED, JsonResponse(response)))
}

/// Passes Mailgun's success body through as-is, unlike the simple handler.
pub async fn send_rich_email_handler(
  State(state): State<SharedAppState>,
  body: Bytes,
) -> Result<(StatusCode, JsonResponse<Value>), AppError> {
  let payload: Value = serde_json::from_slice(&body)?;

  let response = state.send_rich_email(payload).await?;
  Ok((StatusCode::ACCEPTED, JsonResponse(response)))
}

#[cfg(test)]
mod tests {
  use crate::test_support::{app_with_config, get, json_body, post_json, send, test_config};
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use mockito::{Matcher, Server};
  use serde_json::json;

  const MESSAGES_PATH: &str = "/v3/mg.example.com/messages";

  #[tokio::test]
  async fn simple_send_uses_default_sender() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("POST", MESSAGES_PATH)
      .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
      .match_body(Matcher::AllOf(vec![
        Matcher::UrlEncoded("from".to_string(), "noreply@example.com".to_string()),
        Matcher::UrlEncoded("to".to_string(), "x@y.com".to_string()),
        Matcher::UrlEncoded("subject".to_string(), "s".to_string()),
        Matcher::UrlEncoded("text".to_string(), "t".to_string()),
      ]))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"id":"<msg-1@mg.example.com>","message":"Queued. Thank you."}"#)
      .create_async()
      .await;

    let app = app_with_config(test_config(
      &server.url(),
      &[("MAILGUN_DEFAULT_FROM", "noreply@example.com")],
    ));
    let (status, body) = post_json(
      app,
      "/api/v1/send-mailgun-email",
      &json!({"to": "x@y.com", "subject": "s", "text": "t"}),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json_body(&body), json!({"id": "<msg-1@mg.example.com>", "message": "queued"}));
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn simple_send_rejects_bad_recipient_without_calling_provider() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", MESSAGES_PATH).expect(0).create_async().await;

    let app = app_with_config(test_config(&server.url(), &[]));
    let (status, body) = post_json(
      app,
      "/api/v1/send-mailgun-email",
      &json!({"to": "bad", "subject": "s", "text": "t"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json_body(&body);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"]["field"], "to");
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn simple_send_without_any_sender_is_validation_error() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", MESSAGES_PATH).expect(0).create_async().await;

    let app = app_with_config(test_config(&server.url(), &[]));
    let (status, body) = post_json(
      app,
      "/api/v1/send-mailgun-email",
      &json!({"to": "x@y.com", "subject": "s", "text": "t"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["details"]["field"], "from");
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn simple_send_missing_api_key_is_internal_error() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", MESSAGES_PATH).expect(0).create_async().await;

    let app = app_with_config(test_config(&server.url(), &[("MAILGUN_API_KEY", "")]));
    let (status, body) = post_json(
      app,
      "/api/v1/send-mailgun-email",
      &json!({"to": "x@y.com", "subject": "s", "text": "t", "from": "me@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
      json_body(&body),
      json!({"error": "mailgun_error", "details": {"message": "MAILGUN_API_KEY not configured"}})
    );
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn simple_send_missing_domain_is_internal_error() {
    let app = app_with_config(test_config("http://127.0.0.1:9", &[("MAILGUN_DOMAIN", "")]));
    let (status, body) = post_json(
      app,
      "/api/v1/send-mailgun-email",
      &json!({"to": "x@y.com", "subject": "s", "text": "t", "from": "me@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body)["details"]["message"], "MAILGUN_DOMAIN not configured");
  }

  #[tokio::test]
  async fn provider_server_error_maps_to_bad_gateway() {
    let mut server = Server::new_async().await;
    server
      .mock("POST", MESSAGES_PATH)
      .with_status(500)
      .with_body("upstream exploded")
      .create_async()
      .await;

    let app = app_with_config(test_config(&server.url(), &[]));
    let (status, body) = post_json(
      app,
      "/api/v1/send-mailgun-email",
      &json!({"to": "x@y.com", "subject": "s", "text": "t", "from": "me@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
      json_body(&body),
      json!({"error": "mailgun_error", "details": {"status": 500, "message": "upstream exploded"}})
    );
  }

  #[tokio::test]
  async fn provider_not_found_maps_to_bad_request() {
    let mut server = Server::new_async().await;
    server
      .mock("POST", MESSAGES_PATH)
      .with_status(404)
      .with_body(r#"{"message":"Domain not found"}"#)
      .create_async()
      .await;

    let app = app_with_config(test_config(&server.url(), &[]));
    let (status, body) = post_json(
      app,
      "/api/v1/send-mailgun-email",
      &json!({"to": "x@y.com", "subject": "s", "text": "t", "from": "me@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json_body(&body);
    assert_eq!(body["details"]["status"], 404);
    assert_eq!(body["details"]["message"], r#"{"message":"Domain not found"}"#);
  }

  #[tokio::test]
  async fn unreachable_provider_is_internal_error() {
    let app = app_with_config(test_config("http://127.0.0.1:9", &[]));
    let (status, body) = post_json(
      app,
      "/api/v1/send-mailgun-email",
      &json!({"to": "x@y.com", "subject": "s", "text": "t", "from": "me@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body)["error"], "mailgun_error");
  }

  #[tokio::test]
  async fn malformed_json_is_internal_error() {
    let app = app_with_config(test_config("http://127.0.0.1:9", &[]));
    let request = Request::builder()
      .method("POST")
      .uri("/api/v1/send-mailgun-email")
      .header("content-type", "application/json")
      .body(Body::from("{not json"))
      .unwrap();

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body)["error"], "mailgun_error");
  }

  #[tokio::test]
  async fn send_routes_reject_other_methods() {
    let app = app_with_config(test_config("http://127.0.0.1:9", &[]));
    let (status, body) = get(app, "/api/v1/send-email").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json_body(&body)["error"], "validation_error");
  }

  #[tokio::test]
  async fn rich_send_passes_provider_body_through() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("POST", MESSAGES_PATH)
      .match_body(Matcher::AllOf(vec![
        Matcher::UrlEncoded("from".to_string(), "sender@example.com".to_string()),
        Matcher::UrlEncoded("to".to_string(), "a@b.com, c@d.com".to_string()),
        Matcher::UrlEncoded("html".to_string(), "<p>Hi</p>".to_string()),
        Matcher::UrlEncoded("cc".to_string(), "e@f.com".to_string()),
        Matcher::UrlEncoded("h:Reply-To".to_string(), "reply@example.com".to_string()),
      ]))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"id":"<rich@mg.example.com>","message":"Queued. Thank you."}"#)
      .create_async()
      .await;

    let app = app_with_config(test_config(&server.url(), &[]));
    let (status, body) = post_json(
      app,
      "/api/v1/send-email",
      &json!({
        "from": "sender@example.com",
        "to": "a@b.com, c@d.com",
        "subject": "Hello",
        "html": "<p>Hi</p>",
        "cc": "e@f.com",
        "replyTo": "reply@example.com"
      }),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(
      json_body(&body),
      json!({"id": "<rich@mg.example.com>", "message": "Queued. Thank you."})
    );
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn rich_send_without_content_does_not_call_provider() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", MESSAGES_PATH).expect(0).create_async().await;

    let app = app_with_config(test_config(&server.url(), &[]));
    let (status, body) = post_json(
      app,
      "/api/v1/send-email",
      &json!({"from": "sender@example.com", "to": "a@b.com", "subject": "Hello", "text": "", "html": ""}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "validation_error");
    mock.assert_async().await;
  }
}
