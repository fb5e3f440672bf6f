//! Landing page, login and logout.

use axum::{
  Form,
  extract::State,
  http::header,
  response::{IntoResponse, Redirect, Response},
};
use hearth_core::store::SocialStore;
use serde::Deserialize;

use crate::{
  AppState,
  session::{Identity, Session, SessionStore},
  view::View,
};

/// `GET /` — `home` when logged in, otherwise `login`.
pub async fn landing(session: Session) -> View {
  match session.identity {
    Identity::Authenticated(id) => View::new("home").with("userId", id),
    Identity::Anonymous => View::new("login"),
  }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
  #[serde(default)]
  pub name:     String,
  #[serde(default)]
  pub password: String,
}

/// `POST /login` — on success set the session cookie and go home; on failure
/// show the login view again.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  session: Session,
  Form(form): Form<LoginForm>,
) -> Response
where
  S: SocialStore + Clone + Send + Sync + 'static,
{
  let Some(token) = state
    .sessions
    .authenticate(&state.directory, &form.name, &form.password)
    .await
  else {
    return View::new("login").into_response();
  };

  if let Some(previous) = session.token {
    state.sessions.clear(previous).await;
  }

  (
    [(header::SET_COOKIE, state.sessions.set_cookie(token))],
    Redirect::to("/"),
  )
    .into_response()
}

/// `GET /logout`
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  session: Session,
) -> Response
where
  S: SocialStore + Clone + Send + Sync + 'static,
{
  if let Some(token) = session.token {
    state.sessions.clear(token).await;
  }
  (
    [(header::SET_COOKIE, SessionStore::expired_cookie())],
    Redirect::to("/"),
  )
    .into_response()
}
