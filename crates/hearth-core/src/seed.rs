//! Bootstrap seeding.
//!
//! Runs once, before the server accepts requests. If the profile collection
//! is empty, a batch of candidates is fetched from a [`ProfileSource`],
//! deduplicated by picture URL, given sequential identities and generated
//! credentials, and written to the store. Any error here is fatal to startup.

use std::collections::HashSet;

use rand_core::{OsRng, RngCore};
use tracing::info;

use crate::{
  Directory, Error, Result,
  profile::Profile,
  source::{Candidate, ProfileSource},
  store::SocialStore,
};

/// Number of candidates requested from the source.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Credential given to a profile whose random draw was too short. No login
/// can ever supply it, so such profiles are permanently locked out.
pub const INVALID_PASSWORD: &str = "invalid password";

/// Draws are uniform in `[0, CREDENTIAL_SPACE)`.
const CREDENTIAL_SPACE: u64 = 1_000_000_000_000;

const MIN_CREDENTIAL_DIGITS: usize = 8;

/// Load the directory, seeding the store first if it is empty.
pub async fn bootstrap<S, P>(
  store: &S,
  source: &P,
  batch_size: usize,
) -> Result<Directory>
where
  S: SocialStore,
  P: ProfileSource,
{
  bootstrap_with_rng(store, source, batch_size, &mut OsRng).await
}

/// [`bootstrap`] with a caller-supplied random source for credentials.
pub async fn bootstrap_with_rng<S, P, R>(
  store: &S,
  source: &P,
  batch_size: usize,
  rng: &mut R,
) -> Result<Directory>
where
  S: SocialStore,
  P: ProfileSource,
  R: RngCore + Send,
{
  let existing = store.list_profiles().await.map_err(Error::store)?;
  if !existing.is_empty() {
    info!(count = existing.len(), "profile collection populated; skipping seed");
    return Ok(Directory::new(existing));
  }

  store.clear_profiles().await.map_err(Error::store)?;

  let candidates = source.fetch(batch_size).await.map_err(Error::source)?;
  let fetched = candidates.len();
  let batch = build_batch(candidates, rng);
  info!(
    fetched,
    kept = batch.len(),
    dropped = fetched - batch.len(),
    "seeding profile collection"
  );

  store
    .insert_profiles(batch.clone())
    .await
    .map_err(Error::store)?;

  Ok(Directory::new(batch))
}

/// Deduplicate `candidates` by picture URL (first occurrence wins) and turn
/// the survivors into profiles with identities `"0"`, `"1"`, … in order.
pub fn build_batch<R>(candidates: Vec<Candidate>, rng: &mut R) -> Vec<Profile>
where
  R: RngCore + ?Sized,
{
  let mut seen: HashSet<String> = HashSet::new();
  candidates
    .into_iter()
    .filter(|c| seen.insert(c.picture_url().to_owned()))
    .enumerate()
    .map(|(index, candidate)| Profile {
      id:          index.to_string(),
      name:        candidate.full_name(),
      email:       candidate.email,
      description: String::new(),
      picture:     candidate.picture.large,
      friends:     Vec::new(),
      password:    generate_credential(rng),
    })
    .collect()
}

/// Draw a credential: a random integer below 10^12, kept only if it has at
/// least eight decimal digits; otherwise [`INVALID_PASSWORD`].
pub fn generate_credential<R>(rng: &mut R) -> String
where
  R: RngCore + ?Sized,
{
  let digits = uniform_below(rng, CREDENTIAL_SPACE).to_string();
  if digits.len() >= MIN_CREDENTIAL_DIGITS {
    digits
  } else {
    INVALID_PASSWORD.to_owned()
  }
}

/// Rejection sampling over `next_u64` so every value below `bound` is
/// equally likely.
fn uniform_below<R>(rng: &mut R, bound: u64) -> u64
where
  R: RngCore + ?Sized,
{
  let zone = u64::MAX - (u64::MAX % bound);
  loop {
    let draw = rng.next_u64();
    if draw < zone {
      return draw % bound;
    }
  }
}
