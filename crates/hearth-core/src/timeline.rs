//! The timeline feed. Messages live only in the store; there is no cache.

use tracing::debug;

use crate::{
  Directory, Error, Result, message::Message, store::SocialStore,
};

/// Every message, in the store's natural retrieval order.
pub async fn list<S: SocialStore>(store: &S) -> Result<Vec<Message>> {
  store.list_messages().await.map_err(Error::store)
}

/// Post `contents` as `author_id`.
///
/// The author's current display name is copied into the message. Nothing is
/// written if `author_id` is not in the directory.
pub async fn post<S: SocialStore>(
  store: &S,
  directory: &Directory,
  author_id: &str,
  contents: String,
) -> Result<Message> {
  let author = directory
    .by_identity(author_id)
    .await
    .ok_or_else(|| Error::ProfileNotFound(author_id.to_owned()))?;

  let message = Message { author: author.name, contents };
  store
    .insert_message(message.clone())
    .await
    .map_err(Error::store)?;
  debug!(author_id, "message posted");
  Ok(message)
}
