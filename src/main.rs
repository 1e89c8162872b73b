use std::sync::Arc;

use tokio::signal;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use mailgun_relay::app::create_app;
use mailgun_relay::config::{ProcessEnv, ServerConfig};
use mailgun_relay::mailgun::MailgunClient;
use mailgun_relay::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let server_config = ServerConfig::from_source(&ProcessEnv);
  let app_state = SharedAppState::new(MailgunClient::new(reqwest::Client::new()), Arc::new(ProcessEnv));
  let app = create_app(app_state);

  let listener = tokio::net::TcpListener::bind(&server_config.addr).await?;

  tracing::info!("Server running on http://{}", server_config.addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!("Failed to install Ctrl+C handler: {}", e);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        tracing::error!("Failed to install signal handler: {}", e);
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
