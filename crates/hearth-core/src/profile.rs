//! Profile types — the user records held by the directory and the store.

use serde::{Deserialize, Serialize};

// ─── FriendEdge ──────────────────────────────────────────────────────────────

/// A directed connection to another profile, identified by its numeric
/// identity.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct FriendEdge {
  pub id: u32,
}

impl FriendEdge {
  pub fn new(id: u32) -> Self { Self { id } }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// A user record. Created only by bootstrap seeding; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  /// Sequential identity assigned at seed time (`"0"`, `"1"`, …).
  pub id:          String,
  /// Display name, `"{first} {last}"`.
  pub name:        String,
  pub email:       String,
  pub description: String,
  pub picture:     String,
  /// Friend edges as recorded on this profile's persisted document.
  #[serde(default)]
  pub friends:     Vec<FriendEdge>,
  /// Plain-text credential compared by direct equality at login. Never
  /// serialised into views.
  #[serde(skip_serializing, default)]
  pub password:    String,
}

// ─── ProfileEdit ─────────────────────────────────────────────────────────────

/// The self-service fields a user may overwrite on their own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileEdit {
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub picture:     String,
}

impl Profile {
  /// Overwrite exactly the editable fields.
  pub fn apply(&mut self, edit: ProfileEdit) {
    self.description = edit.description;
    self.picture = edit.picture;
  }
}
