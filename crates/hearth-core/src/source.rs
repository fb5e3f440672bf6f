//! The external profile source consumed by bootstrap seeding.

use std::future::Future;

use serde::Deserialize;

// ─── Candidate ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidateName {
  pub first: String,
  pub last:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidatePicture {
  pub large: String,
}

/// One record returned by the external source, before deduplication and
/// identity assignment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
  pub name:    CandidateName,
  pub email:   String,
  pub picture: CandidatePicture,
}

impl Candidate {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.name.first, self.name.last)
  }

  pub fn picture_url(&self) -> &str { &self.picture.large }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A source of candidate profiles, queried once during bootstrap.
pub trait ProfileSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch up to `count` candidates in source order.
  fn fetch(
    &self,
    count: usize,
  ) -> impl Future<Output = Result<Vec<Candidate>, Self::Error>> + Send + '_;
}
