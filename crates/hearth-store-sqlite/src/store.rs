//! [`SqliteStore`] — the SQLite implementation of [`SocialStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::debug;

use hearth_core::{
  message::Message,
  profile::{FriendEdge, Profile, ProfileEdit},
  store::SocialStore,
};

use crate::{
  Error, Result,
  encode::{PROFILE_COLUMNS, RawProfile},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Hearth store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SocialStore impl ────────────────────────────────────────────────────────

impl SocialStore for SqliteStore {
  type Error = Error;

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn list_profiles(&self) -> Result<Vec<Profile>> {
    let raws: Vec<RawProfile> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY seq"
        ))?;
        let rows = stmt
          .query_map([], RawProfile::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProfile::into_profile).collect()
  }

  async fn get_profile(&self, id: String) -> Result<Option<Profile>> {
    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
            rusqlite::params![id],
            RawProfile::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn clear_profiles(&self) -> Result<()> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM profiles", [])?))
      .await?;
    debug!(removed, "cleared profile collection");
    Ok(())
  }

  async fn insert_profiles(&self, profiles: Vec<Profile>) -> Result<()> {
    let raws = profiles
      .into_iter()
      .map(RawProfile::from_profile)
      .collect::<Result<Vec<_>>>()?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(&format!(
            "INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
          ))?;
          for raw in &raws {
            stmt.execute(rusqlite::params![
              raw.id,
              raw.name,
              raw.email,
              raw.description,
              raw.picture,
              raw.friends,
              raw.password,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn push_friend(&self, owner: String, edge: FriendEdge) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE profiles
           SET friends = json_insert(friends, '$[#]', json_object('id', ?1))
           WHERE id = ?2",
          rusqlite::params![edge.id, owner],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn update_profile(&self, id: String, edit: ProfileEdit) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE profiles SET description = ?1, picture = ?2 WHERE id = ?3",
          rusqlite::params![edit.description, edit.picture, id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  // ── Messages ──────────────────────────────────────────────────────────────

  async fn insert_message(&self, message: Message) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO messages (author, contents) VALUES (?1, ?2)",
          rusqlite::params![message.author, message.contents],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_messages(&self) -> Result<Vec<Message>> {
    let messages = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT author, contents FROM messages ORDER BY seq")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Message {
              author:   row.get(0)?,
              contents: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(messages)
  }
}
