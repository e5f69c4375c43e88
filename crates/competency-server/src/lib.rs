//! HTTP server assembly for the staff competency service.
//!
//! Mounts the JSON API under [`API_PREFIX`] and wraps it with request
//! tracing. Configuration loading lives here so it can be tested without
//! starting a listener.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use competency_api::{PersonService, api_router};
use competency_core::store::CompetencyStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Every API route is nested under this prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Prefix for environment variables that override the config file.
pub const ENV_PREFIX: &str = "COMPETENCY";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `COMPETENCY_*` environment
  /// variables, on top of built-in defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::from_sources(
      config::File::from(path).required(false),
      config::Environment::with_prefix(ENV_PREFIX),
    )
  }

  fn from_sources<F, E>(file: F, env: E) -> Result<Self, config::ConfigError>
  where
    F: config::Source + Send + Sync + 'static,
    E: config::Source + Send + Sync + 'static,
  {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 5000)?
      .set_default("store_path", "competencies.db")?
      .add_source(file)
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  /// `host:port`, ready for `TcpListener::bind`.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: CompetencyStore + 'static,
{
  let service = Arc::new(PersonService::new(store));
  Router::new()
    .nest(API_PREFIX, api_router(service))
    .layer(TraceLayer::new_for_http())
}
