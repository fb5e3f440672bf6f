//! Directory listing, friendship and self-service profile edits.

use axum::{
  Form,
  extract::{Path, State},
  response::Redirect,
};
use hearth_core::{profile::ProfileEdit, store::SocialStore};
use tracing::{debug, warn};

use crate::{AppState, error::Error, session::Session, view::View};

/// `GET /profiles`
pub async fn list<S>(State(state): State<AppState<S>>, session: Session) -> View
where
  S: SocialStore + Clone + Send + Sync + 'static,
{
  View::new("profiles")
    .with("profiles", state.directory.all().await)
    .with("friendships", state.ledger.edges().await)
    .with("userId", session.identity.profile_id())
}

/// `POST /addFriend/{id}`
///
/// The caller's persisted friend list is appended to before the ledger is
/// consulted, so a ledger rejection (404) still leaves the append in place.
pub async fn add_friend<S>(
  State(state): State<AppState<S>>,
  session: Session,
  Path(raw_id): Path<String>,
) -> Result<Redirect, Error>
where
  S: SocialStore + Clone + Send + Sync + 'static,
{
  let target: u32 = raw_id
    .parse()
    .map_err(|_| Error::BadRequest(format!("invalid profile id {raw_id:?}")))?;
  let caller = session.identity.profile_id().ok_or(Error::NotFound)?;

  if state.directory.by_identity(&target.to_string()).await.is_none() {
    warn!(caller, target, "friend target does not exist");
    return Err(Error::NotFound);
  }

  state.ledger.add_friend(&*state.store, caller, target).await?;
  Ok(Redirect::to("/profiles"))
}

/// `GET /myprofile`
pub async fn my_profile<S>(
  State(state): State<AppState<S>>,
  session: Session,
) -> Result<View, Error>
where
  S: SocialStore + Clone + Send + Sync + 'static,
{
  let id = session.identity.profile_id().ok_or(Error::NotFound)?;
  let profile = state.directory.by_identity(id).await.ok_or(Error::NotFound)?;
  Ok(View::new("myprofile").with("profile", profile))
}

/// `POST /saveProfile`
///
/// Edits land in the directory cache only, unless `persist_profile_edits` is
/// set, in which case the same fields are also written to the store.
pub async fn save_profile<S>(
  State(state): State<AppState<S>>,
  session: Session,
  Form(edit): Form<ProfileEdit>,
) -> Result<Redirect, Error>
where
  S: SocialStore + Clone + Send + Sync + 'static,
{
  let id = session.identity.profile_id().ok_or(Error::NotFound)?;
  state.directory.update_self(id, edit.clone()).await?;

  if state.config.persist_profile_edits {
    let matched = state
      .store
      .update_profile(id.to_owned(), edit)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
    debug!(id, matched, "profile edit written through");
  }

  Ok(Redirect::to("/myprofile"))
}
