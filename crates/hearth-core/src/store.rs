//! The `SocialStore` trait — the persistent side of the system.
//!
//! Two collections live behind it: profiles and messages. Higher layers
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  message::Message,
  profile::{FriendEdge, Profile, ProfileEdit},
};

/// Abstraction over the persistent store.
///
/// Every method is a single point operation; there are no cross-call
/// transactions.
pub trait SocialStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Profiles ──────────────────────────────────────────────────────────

  /// Every profile document, in insertion order.
  fn list_profiles(
    &self,
  ) -> impl Future<Output = Result<Vec<Profile>, Self::Error>> + Send + '_;

  /// A single profile document. Returns `None` if not found.
  fn get_profile(
    &self,
    id: String,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  /// Remove every profile document.
  fn clear_profiles(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert a batch of new profile documents.
  fn insert_profiles(
    &self,
    profiles: Vec<Profile>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Append `edge` to the friend list of the profile `owner`. No duplicate
  /// check is made. Returns `false` if no document matched.
  fn push_friend(
    &self,
    owner: String,
    edge: FriendEdge,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Overwrite the editable fields of profile `id`. Returns `false` if no
  /// document matched.
  fn update_profile(
    &self,
    id: String,
    edit: ProfileEdit,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Messages ──────────────────────────────────────────────────────────

  /// Append a message to the feed.
  fn insert_message(
    &self,
    message: Message,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every message in storage order.
  fn list_messages(
    &self,
  ) -> impl Future<Output = Result<Vec<Message>, Self::Error>> + Send + '_;
}
