//! Identity context: cookie-backed sessions binding a request to a profile.
//!
//! The cookie carries `<token>.<signature>`, where the token is a random
//! UUID and the signature is the hex SHA-256 of the server secret followed by
//! the token bytes. The session table itself lives in memory; a process
//! restart logs everyone out.

use std::{
  collections::HashMap,
  time::{Duration, Instant},
};

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use hearth_core::{Directory, seed::INVALID_PASSWORD, store::SocialStore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::AppState;

/// Name of the session cookie.
pub const COOKIE_NAME: &str = "hearth.sid";

/// Default session lifetime: fifteen minutes from login.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

// ─── Identity ────────────────────────────────────────────────────────────────

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
  Anonymous,
  /// Bound to the profile with this identity.
  Authenticated(String),
}

impl Identity {
  pub fn profile_id(&self) -> Option<&str> {
    match self {
      Identity::Authenticated(id) => Some(id.as_str()),
      Identity::Anonymous => None,
    }
  }
}

// ─── Session table ───────────────────────────────────────────────────────────

/// An opaque handle for one login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

struct Entry {
  profile_id: String,
  /// `None` when the TTL is too large to represent.
  expires_at: Option<Instant>,
}

impl Entry {
  fn is_live(&self, now: Instant) -> bool { self.expires_at.is_none_or(|at| now < at) }
}

pub struct SessionStore {
  secret:  String,
  ttl:     Duration,
  entries: RwLock<HashMap<SessionToken, Entry>>,
}

impl SessionStore {
  pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
    Self {
      secret: secret.into(),
      ttl,
      entries: RwLock::new(HashMap::new()),
    }
  }

  /// Check `name`/`credential` against the directory and open a session on
  /// success. The credential is compared by plain equality; profiles holding
  /// the seeding sentinel can never log in.
  pub async fn authenticate(
    &self,
    directory: &Directory,
    name: &str,
    credential: &str,
  ) -> Option<SessionToken> {
    let Some(profile) = directory.by_name(name).await else {
      warn!("login rejected: unknown name");
      return None;
    };
    if profile.password == INVALID_PASSWORD || profile.password != credential {
      warn!(profile_id = %profile.id, "login rejected: credential mismatch");
      return None;
    }

    let token = SessionToken(Uuid::new_v4());
    let now = Instant::now();
    let mut entries = self.entries.write().await;
    Self::drain_expired(&mut entries, now);
    entries.insert(token, Entry {
      profile_id: profile.id.clone(),
      expires_at: now.checked_add(self.ttl),
    });
    info!(profile_id = %profile.id, "session opened");
    Some(token)
  }

  /// The identity bound to `token`, or [`Identity::Anonymous`]. Expired
  /// sessions are dropped on sight.
  pub async fn current(&self, token: Option<SessionToken>) -> Identity {
    let Some(token) = token else {
      return Identity::Anonymous;
    };

    let mut entries = self.entries.write().await;
    match entries.get(&token) {
      Some(entry) if entry.is_live(Instant::now()) => {
        Identity::Authenticated(entry.profile_id.clone())
      }
      Some(_) => {
        entries.remove(&token);
        debug!("session expired");
        Identity::Anonymous
      }
      None => Identity::Anonymous,
    }
  }

  /// End the session. Clearing an unknown token is a no-op.
  pub async fn clear(&self, token: SessionToken) {
    if self.entries.write().await.remove(&token).is_some() {
      info!("session closed");
    }
  }

  /// Drop every session that has expired by `now`. Runs on each login, so
  /// the table never holds more than the live sessions plus one.
  fn drain_expired(entries: &mut HashMap<SessionToken, Entry>, now: Instant) {
    let before = entries.len();
    entries.retain(|_, entry| entry.is_live(now));
    let drained = before - entries.len();
    if drained > 0 {
      debug!(drained, "expired sessions dropped");
    }
  }

  #[cfg(test)]
  async fn len(&self) -> usize { self.entries.read().await.len() }

  // ── Cookie encoding ───────────────────────────────────────────────────────

  fn signature(&self, token: SessionToken) -> String {
    let mut hasher = Sha256::new();
    hasher.update(self.secret.as_bytes());
    hasher.update(token.0.as_bytes());
    hex::encode(hasher.finalize())
  }

  /// Cookie value for `token`.
  pub fn sign(&self, token: SessionToken) -> String {
    format!("{}.{}", token.0.simple(), self.signature(token))
  }

  /// Recover the token from a cookie value, rejecting bad signatures.
  pub fn verify(&self, value: &str) -> Option<SessionToken> {
    let (raw, signature) = value.split_once('.')?;
    let token = SessionToken(Uuid::try_parse(raw).ok()?);
    let expected = self.signature(token);
    bool::from(expected.as_bytes().ct_eq(signature.as_bytes())).then_some(token)
  }

  /// `Set-Cookie` value that installs `token` in the browser.
  pub fn set_cookie(&self, token: SessionToken) -> String {
    format!(
      "{COOKIE_NAME}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
      self.sign(token),
      self.ttl.as_secs()
    )
  }

  /// `Set-Cookie` value that removes the session cookie.
  pub fn expired_cookie() -> String {
    format!("{COOKIE_NAME}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
  }

  /// Pull the session token out of a request's `Cookie` headers.
  pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<SessionToken> {
    headers
      .get_all(header::COOKIE)
      .iter()
      .filter_map(|v| v.to_str().ok())
      .flat_map(|v| v.split(';'))
      .filter_map(|pair| pair.trim().split_once('='))
      .find(|(name, _)| *name == COOKIE_NAME)
      .and_then(|(_, value)| self.verify(value))
  }
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// The resolved session for a request. Never rejects: a missing, forged, or
/// expired cookie yields an anonymous session.
pub struct Session {
  pub token:    Option<SessionToken>,
  pub identity: Identity,
}

impl<S> FromRequestParts<AppState<S>> for Session
where
  S: SocialStore + Clone + Send + Sync + 'static,
{
  type Rejection = std::convert::Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = state.sessions.token_from_headers(&parts.headers);
    let identity = state.sessions.current(token).await;
    Ok(Session { token, identity })
  }
}
