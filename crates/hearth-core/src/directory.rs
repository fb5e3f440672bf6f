//! The in-memory profile directory.
//!
//! Loaded once at startup (see [`crate::seed::bootstrap`]). From then on it is
//! the source of truth for the editable profile fields: self-service edits
//! mutate only this cache, never the persisted documents.

use tokio::sync::RwLock;

use crate::{
  Error, Result,
  profile::{Profile, ProfileEdit},
};

#[derive(Debug, Default)]
pub struct Directory {
  profiles: RwLock<Vec<Profile>>,
}

impl Directory {
  pub fn new(profiles: Vec<Profile>) -> Self {
    Self { profiles: RwLock::new(profiles) }
  }

  /// Every profile, in insertion order.
  pub async fn all(&self) -> Vec<Profile> { self.profiles.read().await.clone() }

  pub async fn len(&self) -> usize { self.profiles.read().await.len() }

  pub async fn by_identity(&self, id: &str) -> Option<Profile> {
    self
      .profiles
      .read()
      .await
      .iter()
      .find(|p| p.id == id)
      .cloned()
  }

  /// The first profile with display name `name`.
  pub async fn by_name(&self, name: &str) -> Option<Profile> {
    self
      .profiles
      .read()
      .await
      .iter()
      .find(|p| p.name == name)
      .cloned()
  }

  /// Overwrite the description and picture of profile `id` in the cache and
  /// return the updated profile.
  pub async fn update_self(&self, id: &str, edit: ProfileEdit) -> Result<Profile> {
    let mut profiles = self.profiles.write().await;
    let profile = profiles
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or_else(|| Error::ProfileNotFound(id.to_owned()))?;
    profile.apply(edit);
    Ok(profile.clone())
  }
}
