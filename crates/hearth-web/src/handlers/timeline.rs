//! Timeline feed.

use axum::{
  Form,
  extract::State,
  response::Redirect,
};
use hearth_core::{store::SocialStore, timeline};
use serde::Deserialize;

use crate::{AppState, error::Error, session::Session, view::View};

/// `GET /timeline` — `profile` is `null` for anonymous callers.
pub async fn show<S>(
  State(state): State<AppState<S>>,
  session: Session,
) -> Result<View, Error>
where
  S: SocialStore + Clone + Send + Sync + 'static,
{
  let profile = match session.identity.profile_id() {
    Some(id) => state.directory.by_identity(id).await,
    None => None,
  };
  let messages = timeline::list(&*state.store).await?;
  Ok(
    View::new("timeline")
      .with("profile", profile)
      .with("messages", messages),
  )
}

#[derive(Debug, Deserialize)]
pub struct PostForm {
  #[serde(default)]
  pub contents: String,
}

/// `POST /postMessage`
pub async fn post<S>(
  State(state): State<AppState<S>>,
  session: Session,
  Form(form): Form<PostForm>,
) -> Result<Redirect, Error>
where
  S: SocialStore + Clone + Send + Sync + 'static,
{
  let author = session.identity.profile_id().ok_or(Error::NotFound)?;
  timeline::post(&*state.store, &state.directory, author, form.contents).await?;
  Ok(Redirect::to("/timeline"))
}
