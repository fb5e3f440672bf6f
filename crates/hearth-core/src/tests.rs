//! Component tests against an in-memory `SocialStore`.

use std::{
  convert::Infallible,
  sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  },
};

use crate::{
  Directory, Error, Ledger,
  message::Message,
  profile::{FriendEdge, Profile, ProfileEdit},
  seed::{self, DEFAULT_BATCH_SIZE},
  source::{Candidate, ProfileSource},
  store::SocialStore,
  timeline,
};

// ─── Test doubles ────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("store offline")]
struct Offline;

#[derive(Default)]
struct MemoryStore {
  profiles:     Mutex<Vec<Profile>>,
  messages:     Mutex<Vec<Message>>,
  clears:       AtomicUsize,
  fail_inserts: AtomicBool,
}

impl MemoryStore {
  fn with_profiles(profiles: Vec<Profile>) -> Self {
    Self { profiles: Mutex::new(profiles), ..Self::default() }
  }

  fn persisted(&self, id: &str) -> Profile {
    self
      .profiles
      .lock()
      .unwrap()
      .iter()
      .find(|p| p.id == id)
      .cloned()
      .expect("persisted profile")
  }
}

impl SocialStore for MemoryStore {
  type Error = Offline;

  async fn list_profiles(&self) -> Result<Vec<Profile>, Offline> {
    Ok(self.profiles.lock().unwrap().clone())
  }

  async fn get_profile(&self, id: String) -> Result<Option<Profile>, Offline> {
    Ok(self.profiles.lock().unwrap().iter().find(|p| p.id == id).cloned())
  }

  async fn clear_profiles(&self) -> Result<(), Offline> {
    self.clears.fetch_add(1, Ordering::SeqCst);
    self.profiles.lock().unwrap().clear();
    Ok(())
  }

  async fn insert_profiles(&self, profiles: Vec<Profile>) -> Result<(), Offline> {
    if self.fail_inserts.load(Ordering::SeqCst) {
      return Err(Offline);
    }
    self.profiles.lock().unwrap().extend(profiles);
    Ok(())
  }

  async fn push_friend(&self, owner: String, edge: FriendEdge) -> Result<bool, Offline> {
    let mut profiles = self.profiles.lock().unwrap();
    match profiles.iter_mut().find(|p| p.id == owner) {
      Some(p) => {
        p.friends.push(edge);
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn update_profile(&self, id: String, edit: ProfileEdit) -> Result<bool, Offline> {
    let mut profiles = self.profiles.lock().unwrap();
    match profiles.iter_mut().find(|p| p.id == id) {
      Some(p) => {
        p.apply(edit);
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn insert_message(&self, message: Message) -> Result<(), Offline> {
    self.messages.lock().unwrap().push(message);
    Ok(())
  }

  async fn list_messages(&self) -> Result<Vec<Message>, Offline> {
    Ok(self.messages.lock().unwrap().clone())
  }
}

struct FixedSource(Vec<Candidate>);

impl ProfileSource for FixedSource {
  type Error = Infallible;

  async fn fetch(&self, count: usize) -> Result<Vec<Candidate>, Infallible> {
    Ok(self.0.iter().take(count).cloned().collect())
  }
}

struct DownSource;

impl ProfileSource for DownSource {
  type Error = Offline;

  async fn fetch(&self, _: usize) -> Result<Vec<Candidate>, Offline> { Err(Offline) }
}

fn candidate(first: &str, last: &str, picture: &str) -> Candidate {
  serde_json::from_value(serde_json::json!({
    "name":    { "first": first, "last": last },
    "email":   format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
    "picture": { "large": picture },
  }))
  .unwrap()
}

fn stored(id: &str, name: &str) -> Profile {
  Profile {
    id:          id.into(),
    name:        name.into(),
    email:       format!("{id}@example.com"),
    description: "persisted".into(),
    picture:     format!("https://pics.example.com/{id}.jpg"),
    friends:     vec![],
    password:    "31415926".into(),
  }
}

async fn seeded(candidates: Vec<Candidate>) -> (MemoryStore, Directory) {
  let store = MemoryStore::default();
  let dir = seed::bootstrap(&store, &FixedSource(candidates), DEFAULT_BATCH_SIZE)
    .await
    .unwrap();
  (store, dir)
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seeding_assigns_sequential_unique_identities() {
  let candidates = (0..DEFAULT_BATCH_SIZE)
    .map(|i| candidate("User", &i.to_string(), &format!("https://pics/{i}.jpg")))
    .collect();
  let (store, dir) = seeded(candidates).await;

  let ids: Vec<String> = dir.all().await.into_iter().map(|p| p.id).collect();
  let expected: Vec<String> = (0..DEFAULT_BATCH_SIZE).map(|i| i.to_string()).collect();
  assert_eq!(ids, expected);

  let persisted: Vec<String> =
    store.list_profiles().await.unwrap().into_iter().map(|p| p.id).collect();
  assert_eq!(persisted, expected);
}

#[tokio::test]
async fn seeding_with_duplicate_pictures_shrinks_directory() {
  let candidates = (0..DEFAULT_BATCH_SIZE)
    .map(|i| candidate("User", &i.to_string(), &format!("https://pics/{}.jpg", i % 7)))
    .collect();
  let (_, dir) = seeded(candidates).await;

  let profiles = dir.all().await;
  assert_eq!(profiles.len(), 7);
  let mut pictures: Vec<_> = profiles.iter().map(|p| p.picture.clone()).collect();
  pictures.sort();
  pictures.dedup();
  assert_eq!(pictures.len(), profiles.len());
}

#[tokio::test]
async fn seeding_skipped_when_collection_populated() {
  let store = MemoryStore::with_profiles(vec![stored("0", "Existing One")]);
  let source = FixedSource(vec![candidate("New", "Person", "https://pics/n.jpg")]);

  let dir = seed::bootstrap(&store, &source, DEFAULT_BATCH_SIZE).await.unwrap();

  assert_eq!(dir.len().await, 1);
  assert_eq!(dir.by_identity("0").await.unwrap().name, "Existing One");
  assert_eq!(store.clears.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn seeding_clears_empty_collection_first() {
  let (store, _) = seeded(vec![candidate("A", "B", "https://pics/a.jpg")]).await;
  assert_eq!(store.clears.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn seeding_fails_when_source_is_down() {
  let store = MemoryStore::default();
  let err = seed::bootstrap(&store, &DownSource, DEFAULT_BATCH_SIZE)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Source(_)));
}

#[tokio::test]
async fn seeding_fails_when_store_rejects_batch() {
  let store = MemoryStore::default();
  store.fail_inserts.store(true, Ordering::SeqCst);
  let source = FixedSource(vec![candidate("A", "B", "https://pics/a.jpg")]);

  let err = seed::bootstrap(&store, &source, DEFAULT_BATCH_SIZE).await.unwrap_err();
  assert!(matches!(err, Error::Store(_)));
}

// ─── Directory / store divergence ────────────────────────────────────────────

#[tokio::test]
async fn self_edits_stay_in_the_cache() {
  let store = MemoryStore::with_profiles(vec![stored("0", "Ann Doe")]);
  let dir = seed::bootstrap(&store, &DownSource, DEFAULT_BATCH_SIZE).await.unwrap();

  for description in ["first", "second"] {
    let edit = ProfileEdit {
      description: description.into(),
      picture:     "https://pics/new.jpg".into(),
    };
    dir.update_self("0", edit).await.unwrap();
  }

  assert_eq!(dir.by_identity("0").await.unwrap().description, "second");
  assert_eq!(store.persisted("0").description, "persisted");
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn second_caller_is_rejected_but_still_persisted() {
  let store = MemoryStore::with_profiles(vec![
    stored("0", "A"),
    stored("1", "B"),
    stored("2", "T"),
  ]);
  let ledger = Ledger::new();

  ledger.add_friend(&store, "0", 2).await.unwrap();
  let err = ledger.add_friend(&store, "1", 2).await.unwrap_err();

  assert!(matches!(err, Error::FriendshipExists(2)));
  assert_eq!(ledger.edges().await, vec![FriendEdge::new(2)]);
  assert_eq!(store.persisted("0").friends, vec![FriendEdge::new(2)]);
  assert_eq!(store.persisted("1").friends, vec![FriendEdge::new(2)]);
}

#[tokio::test]
async fn repeat_add_appends_twice_to_the_persisted_list() {
  let (store, _) = seeded(vec![
    candidate("Ann", "Doe", "https://pics/a.jpg"),
    candidate("Ben", "Roe", "https://pics/b.jpg"),
  ])
  .await;
  let ledger = Ledger::new();

  ledger.add_friend(&store, "0", 1).await.unwrap();
  assert!(ledger.add_friend(&store, "0", 1).await.is_err());

  assert_eq!(ledger.edges().await, vec![FriendEdge::new(1)]);
  assert_eq!(
    store.persisted("0").friends,
    vec![FriendEdge::new(1), FriendEdge::new(1)]
  );
}

#[tokio::test]
async fn unknown_caller_still_updates_ledger() {
  let store = MemoryStore::default();
  let ledger = Ledger::new();

  ledger.add_friend(&store, "99", 4).await.unwrap();
  assert_eq!(ledger.edges().await, vec![FriendEdge::new(4)]);
}

// ─── Timeline ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn post_denormalises_author_name() {
  let store = MemoryStore::default();
  let dir = Directory::new(vec![stored("0", "Ann Doe")]);

  timeline::post(&store, &dir, "0", "hello".into()).await.unwrap();
  timeline::post(&store, &dir, "0", "again".into()).await.unwrap();

  let messages = timeline::list(&store).await.unwrap();
  assert_eq!(messages.len(), 2);
  assert_eq!(messages[0], Message { author: "Ann Doe".into(), contents: "hello".into() });
  assert_eq!(messages[1].contents, "again");
}

#[tokio::test]
async fn post_by_unknown_author_writes_nothing() {
  let store = MemoryStore::default();
  let dir = Directory::new(vec![stored("0", "Ann Doe")]);

  let err = timeline::post(&store, &dir, "5", "hi".into()).await.unwrap_err();
  assert!(matches!(err, Error::ProfileNotFound(_)));
  assert!(timeline::list(&store).await.unwrap().is_empty());
}
