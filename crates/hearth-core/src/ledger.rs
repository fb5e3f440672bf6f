//! The friendship ledger.
//!
//! Two unrelated records are written when a friend is added: the edge is
//! appended to the caller's persisted document, and the target is recorded in
//! a process-wide in-memory set. The in-memory set has no owner attribution,
//! so once any caller has added target `T`, every later attempt to add `T` is
//! rejected here, even though the persisted append has already happened.

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{Error, Result, profile::FriendEdge, store::SocialStore};

#[derive(Debug, Default)]
pub struct Ledger {
  edges: RwLock<Vec<FriendEdge>>,
}

impl Ledger {
  pub fn new() -> Self { Self::default() }

  /// Snapshot of every recorded edge, in insertion order.
  pub async fn edges(&self) -> Vec<FriendEdge> { self.edges.read().await.clone() }

  /// Record that `caller_id` befriended `target`.
  ///
  /// The persisted append is unconditional. Returns
  /// [`Error::FriendshipExists`] if the ledger already holds `target`; the
  /// persisted append is not rolled back in that case.
  pub async fn add_friend<S>(
    &self,
    store: &S,
    caller_id: &str,
    target: u32,
  ) -> Result<FriendEdge>
  where
    S: SocialStore,
  {
    let edge = FriendEdge::new(target);

    let matched = store
      .push_friend(caller_id.to_owned(), edge)
      .await
      .map_err(Error::store)?;
    if !matched {
      debug!(caller_id, target, "no persisted profile matched friend append");
    }

    let mut edges = self.edges.write().await;
    if edges.contains(&edge) {
      warn!(caller_id, target, "friend edge already recorded");
      return Err(Error::FriendshipExists(target));
    }
    edges.push(edge);
    Ok(edge)
  }
}
