//! Timeline messages.

use serde::{Deserialize, Serialize};

/// A single timeline post.
///
/// `author` is a copy of the poster's display name at the time of posting,
/// not a reference to the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub author:   String,
  pub contents: String,
}
