//! [`ProfileSource`] backed by the public randomuser.me API.

use std::time::Duration;

use hearth_core::source::{Candidate, ProfileSource};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::info;

/// Fields, nationality filter and batch size. The `results` parameter is
/// overridden per request with the requested count.
pub const DEFAULT_URL: &str =
  "https://randomuser.me/api/?inc=name,email,picture&nat=us&results=20";

#[derive(Deserialize)]
struct Envelope {
  results: Vec<Candidate>,
}

/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RandomUserSource {
  client: Client,
  url:    String,
}

impl RandomUserSource {
  pub fn new(url: impl Into<String>) -> reqwest::Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, url: url.into() })
  }
}

impl ProfileSource for RandomUserSource {
  type Error = reqwest::Error;

  async fn fetch(&self, count: usize) -> Result<Vec<Candidate>, Self::Error> {
    info!(url = %self.url, count, "fetching seed profiles");
    let mut request = self.client.get(&self.url).build()?;
    set_result_count(request.url_mut(), count);
    let envelope: Envelope = self
      .client
      .execute(request)
      .await?
      .error_for_status()?
      .json()
      .await?;
    Ok(envelope.results.into_iter().take(count).collect())
  }
}

/// Replace any `results` query parameter on `url` with `count`.
fn set_result_count(url: &mut Url, count: usize) {
  let kept: Vec<(String, String)> = url
    .query_pairs()
    .filter(|(key, _)| key != "results")
    .map(|(key, value)| (key.into_owned(), value.into_owned()))
    .collect();
  url
    .query_pairs_mut()
    .clear()
    .extend_pairs(kept)
    .append_pair("results", &count.to_string());
}
