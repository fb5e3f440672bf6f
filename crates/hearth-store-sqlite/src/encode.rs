//! Encoding and decoding helpers between domain types and the plain-text
//! column representations.
//!
//! Friend lists are stored as a compact JSON array so they can be appended to
//! in place with SQLite's `json_insert`.

use hearth_core::profile::{FriendEdge, Profile};

use crate::Result;

// ─── Friends ─────────────────────────────────────────────────────────────────

pub fn encode_friends(friends: &[FriendEdge]) -> Result<String> {
  Ok(serde_json::to_string(friends)?)
}

pub fn decode_friends(s: &str) -> Result<Vec<FriendEdge>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const PROFILE_COLUMNS: &str =
  "id, name, email, description, picture, friends, password";

/// Raw strings read directly from a `profiles` row, or about to be written
/// to one.
pub struct RawProfile {
  pub id:          String,
  pub name:        String,
  pub email:       String,
  pub description: String,
  pub picture:     String,
  pub friends:     String,
  pub password:    String,
}

impl RawProfile {
  /// Map a row selected with [`PROFILE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      email:       row.get(2)?,
      description: row.get(3)?,
      picture:     row.get(4)?,
      friends:     row.get(5)?,
      password:    row.get(6)?,
    })
  }

  pub fn from_profile(p: Profile) -> Result<Self> {
    Ok(Self {
      friends:     encode_friends(&p.friends)?,
      id:          p.id,
      name:        p.name,
      email:       p.email,
      description: p.description,
      picture:     p.picture,
      password:    p.password,
    })
  }

  pub fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      friends:     decode_friends(&self.friends)?,
      id:          self.id,
      name:        self.name,
      email:       self.email,
      description: self.description,
      picture:     self.picture,
      password:    self.password,
    })
  }
}
