//! HTTP front end for Hearth.
//!
//! Exposes an axum [`Router`] over any [`SocialStore`], with cookie sessions
//! for identity and JSON-serialised views at the render boundary.

pub mod error;
pub mod handlers;
pub mod randomuser;
pub mod session;
pub mod view;

pub use error::Error;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use axum::{
  Router,
  routing::{get, post},
};
use hearth_core::{Directory, Ledger, seed::DEFAULT_BATCH_SIZE, store::SocialStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{account, profiles, timeline};
use session::SessionStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `HEARTH_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                  String,
  #[serde(default = "default_port")]
  pub port:                  u16,
  #[serde(default = "default_store_path")]
  pub store_path:            PathBuf,
  /// Required; the server refuses to start without it.
  #[serde(default)]
  pub session_secret:        Option<String>,
  #[serde(default = "default_session_ttl_secs")]
  pub session_ttl_secs:      u64,
  #[serde(default = "default_profile_source_url")]
  pub profile_source_url:    String,
  #[serde(default = "default_seed_batch_size")]
  pub seed_batch_size:       usize,
  /// Also write self-service profile edits to the store.
  #[serde(default)]
  pub persist_profile_edits: bool,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("hearth.db") }

fn default_session_ttl_secs() -> u64 { session::DEFAULT_TTL.as_secs() }

fn default_profile_source_url() -> String { randomuser::DEFAULT_URL.to_string() }

fn default_seed_batch_size() -> usize { DEFAULT_BATCH_SIZE }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                  default_host(),
      port:                  default_port(),
      store_path:            default_store_path(),
      session_secret:        None,
      session_ttl_secs:      default_session_ttl_secs(),
      profile_source_url:    default_profile_source_url(),
      seed_batch_size:       default_seed_batch_size(),
      persist_profile_edits: false,
    }
  }
}

impl ServerConfig {
  pub fn session_ttl(&self) -> Duration { Duration::from_secs(self.session_ttl_secs) }

  /// The configured session secret. A missing or empty secret is fatal at
  /// startup.
  pub fn require_session_secret(&self) -> anyhow::Result<&str> {
    self
      .session_secret
      .as_deref()
      .filter(|s| !s.is_empty())
      .context("session secret missing; set HEARTH_SESSION_SECRET")
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: SocialStore> {
  pub store:     Arc<S>,
  pub directory: Arc<Directory>,
  pub ledger:    Arc<Ledger>,
  pub sessions:  Arc<SessionStore>,
  pub config:    Arc<ServerConfig>,
}

impl<S: SocialStore> AppState<S> {
  /// Assemble state around an already-bootstrapped directory.
  pub fn new(
    store: S,
    directory: Directory,
    session_secret: impl Into<String>,
    config: ServerConfig,
  ) -> Self {
    Self {
      store:     Arc::new(store),
      directory: Arc::new(directory),
      ledger:    Arc::new(Ledger::new()),
      sessions:  Arc::new(SessionStore::new(session_secret, config.session_ttl())),
      config:    Arc::new(config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application [`Router`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: SocialStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/",               get(account::landing))
    .route("/login",          post(account::login::<S>))
    .route("/logout",         get(account::logout::<S>))
    .route("/profiles",       get(profiles::list::<S>))
    .route("/addFriend/{id}", post(profiles::add_friend::<S>))
    .route("/myprofile",      get(profiles::my_profile::<S>))
    .route("/saveProfile",    post(profiles::save_profile::<S>))
    .route("/timeline",       get(timeline::show::<S>))
    .route("/postMessage",    post(timeline::post::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
