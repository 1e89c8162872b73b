use axum::{
  http::{header, HeaderName, Method},
  routing::get,
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{
  domains::{email::rest::email_routes, validation::rest::validation_routes},
  handlers::health_handler,
  state::SharedAppState,
};

pub fn create_app(state: SharedAppState) -> Router {
  Router::new()
    .route("/health", get(health_handler))
    .nest("/api/v1", email_routes().merge(validation_routes()))
    .layer(cors_layer())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

pub fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
    .allow_headers([
      header::AUTHORIZATION,
      HeaderName::from_static("x-client-info"),
      HeaderName::from_static("apikey"),
      header::CONTENT_TYPE,
    ])
}
