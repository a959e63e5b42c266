//! Tests for `AdminView` driven against an in-memory store.

use serde_json::{Value, json};

use crate::{
  Error,
  admin::{AdminView, View},
  in_flight::InFlight,
  memory::{MemoryStore, MemoryStoreError},
  store::COLLECTION,
  submission::{Attendance, Document, UnknownAttendance},
  tally::Tally,
};

fn doc(id: &str, fields: Value) -> Document {
  Document::new(id, fields.as_object().cloned().unwrap())
}

fn alice_and_bob() -> MemoryStore {
  let store = MemoryStore::new();
  store.insert(
    COLLECTION,
    doc(
      "a",
      json!({ "name": "Alice", "attendance": "attending", "drinks": ["wine"] }),
    ),
  );
  store.insert(
    COLLECTION,
    doc("b", json!({ "name": "Bob", "attendance": "not attending" })),
  );
  store
}

async fn loaded(store: &MemoryStore) -> AdminView {
  let mut view = AdminView::new();
  view.load(store).await;
  view
}

// ─── Load ────────────────────────────────────────────────────────────────────

#[test]
fn fresh_view_is_loading() {
  let view = AdminView::new();
  assert!(view.is_loading());
  assert_eq!(view.view(), View::Loading);
  assert_eq!(view.tally(), Tally::default());
}

#[tokio::test]
async fn load_populates_in_store_order() {
  let store = MemoryStore::new();
  for i in 0..5 {
    store.insert(
      COLLECTION,
      doc(&format!("id{i}"), json!({ "name": format!("Guest {i}"), "attendance": "буду" })),
    );
  }

  let view = loaded(&store).await;
  assert!(!view.is_loading());
  assert_eq!(view.submissions().len(), 5);
  let ids: Vec<_> = view.submissions().iter().map(|s| s.id.as_str()).collect();
  assert_eq!(ids, ["id0", "id1", "id2", "id3", "id4"]);
}

#[tokio::test]
async fn alice_and_bob_scenario() {
  let view = loaded(&alice_and_bob()).await;

  let tally = view.tally();
  assert_eq!(tally.attending, 1);
  assert_eq!(tally.not_attending, 1);
  assert_eq!(tally.total, 2);

  let View::Populated(cards) = view.view() else {
    panic!("expected populated view, got {:?}", view.view());
  };
  assert_eq!(cards.len(), 2);
  assert_eq!(cards[0].name, "Alice");
  assert_eq!(cards[0].drinks, vec!["wine"]);
  assert_eq!(cards[1].name, "Bob");
  assert!(cards[1].drinks.is_empty());
}

#[tokio::test]
async fn empty_store_shows_empty_view() {
  let view = loaded(&MemoryStore::new()).await;
  assert!(!view.is_loading());
  assert_eq!(view.view(), View::Empty);
  assert_eq!(view.tally(), Tally::default());
}

#[tokio::test]
async fn fetch_failure_settles_in_failed_view() {
  let store = alice_and_bob();
  store.set_list_failure(true);

  let view = loaded(&store).await;
  assert!(!view.is_loading());
  assert!(view.submissions().is_empty());
  assert_eq!(view.tally(), Tally::default());
  match view.view() {
    View::Failed { message } => assert!(message.contains("store unavailable"), "{message}"),
    other => panic!("expected failed view, got {other:?}"),
  }
}

#[tokio::test]
async fn second_load_result_is_ignored() {
  let store = alice_and_bob();
  let mut view = loaded(&store).await;

  let applied = view.finish_load::<MemoryStoreError>(Ok(Vec::new()));
  assert!(!applied);
  assert_eq!(view.submissions().len(), 2);

  let applied = view.finish_load(Err(MemoryStoreError::Unavailable));
  assert!(!applied);
  assert!(matches!(view.view(), View::Populated(_)));
}

#[test]
fn duplicate_ids_keep_the_first() {
  let mut view = AdminView::new();
  view.finish_load::<MemoryStoreError>(Ok(vec![
    doc("a", json!({ "name": "First", "attendance": "буду" })),
    doc("a", json!({ "name": "Second", "attendance": "не смогу" })),
  ]));
  assert_eq!(view.submissions().len(), 1);
  assert_eq!(view.submissions()[0].name, "First");
}

#[tokio::test]
async fn wrongly_typed_documents_stay_listed_and_deletable() {
  let store = MemoryStore::new();
  store.insert(COLLECTION, doc("y", json!({ "name": "Yes", "attendance": "буду" })));
  store.insert(COLLECTION, doc("n", json!({ "name": "Odd", "attendance": true })));
  store.insert(
    COLLECTION,
    doc("w", json!({ "name": "Wine", "attendance": "буду", "drinks": ["wine", 5] })),
  );
  store.insert(COLLECTION, doc("l", json!({ "name": ["not", "a", "string"] })));

  let mut view = loaded(&store).await;

  assert_eq!(view.submissions().len(), 4);
  let tally = view.tally();
  assert_eq!((tally.attending, tally.not_attending, tally.total), (2, 0, 4));
  assert_eq!(tally.unrecognized(), 2);
  let wine = view.submissions().iter().find(|s| s.id == "w").unwrap();
  assert_eq!(wine.drinks, vec!["wine"]);

  view.delete(&store, "n").await.unwrap();
  assert_eq!(view.submissions().len(), 3);
  assert_eq!(store.documents(COLLECTION).len(), 3);
}

#[test]
fn unknown_attendance_policy() {
  let docs = || {
    vec![
      doc("a", json!({ "name": "Alice", "attendance": "буду" })),
      doc("m", json!({ "name": "Max", "attendance": "может быть" })),
    ]
  };

  let mut kept = AdminView::with_policy(UnknownAttendance::Keep);
  kept.finish_load::<MemoryStoreError>(Ok(docs()));
  let tally = kept.tally();
  assert_eq!((tally.attending, tally.not_attending, tally.total), (1, 0, 2));
  assert!(tally.attending + tally.not_attending <= tally.total);

  let mut rejected = AdminView::with_policy(UnknownAttendance::Reject);
  rejected.finish_load::<MemoryStoreError>(Ok(docs()));
  let tally = rejected.tally();
  assert_eq!((tally.attending, tally.not_attending, tally.total), (1, 0, 1));
  assert_eq!(rejected.submissions()[0].attendance, Some(Attendance::Attending));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_remotely_and_locally() {
  let store = alice_and_bob();
  let mut view = loaded(&store).await;

  view.delete(&store, "a").await.unwrap();

  assert_eq!(view.submissions().len(), 1);
  assert!(view.submissions().iter().all(|s| s.id != "a"));
  assert_eq!(store.documents(COLLECTION).len(), 1);
  assert_eq!(store.delete_calls(), 1);
  assert!(!view.is_deleting("a"));
}

#[tokio::test]
async fn deleting_everything_leaves_empty_view() {
  let store = alice_and_bob();
  let mut view = loaded(&store).await;

  view.delete(&store, "a").await.unwrap();
  view.delete(&store, "b").await.unwrap();

  assert_eq!(view.view(), View::Empty);
  assert!(!view.is_loading());
}

#[tokio::test]
async fn failed_delete_leaves_state_unchanged() {
  let store = alice_and_bob();
  let mut view = loaded(&store).await;
  let before = view.submissions().to_vec();
  store.set_delete_failure(true);

  let err = view.delete(&store, "a").await.unwrap_err();

  assert!(matches!(err, Error::Delete { ref id, .. } if id == "a"));
  assert_eq!(view.submissions(), before.as_slice());
  assert_eq!(store.documents(COLLECTION).len(), 2);
  assert!(!view.is_deleting("a"));
}

#[tokio::test]
async fn failed_delete_can_be_retried_by_the_user() {
  let store = alice_and_bob();
  let mut view = loaded(&store).await;

  store.set_delete_failure(true);
  assert!(view.delete(&store, "b").await.is_err());
  store.set_delete_failure(false);
  view.delete(&store, "b").await.unwrap();

  assert_eq!(view.submissions().len(), 1);
  assert_eq!(store.delete_calls(), 2);
}

#[tokio::test]
async fn double_delete_in_succession() {
  let store = alice_and_bob();
  let mut view = loaded(&store).await;

  view.delete(&store, "a").await.unwrap();
  let second = view.delete(&store, "a").await;

  assert!(matches!(second, Err(Error::NotPresent(ref id)) if id == "a"));
  assert_eq!(view.submissions().len(), 1);
  assert_eq!(view.submissions()[0].id, "b");
  assert_eq!(store.delete_calls(), 1);
}

#[test]
fn concurrent_delete_of_same_id_is_refused() {
  let mut view = AdminView::new();
  view.finish_load::<MemoryStoreError>(Ok(vec![doc(
    "a",
    json!({ "name": "Alice", "attendance": "буду" }),
  )]));

  let ticket = view.begin_delete("a").unwrap();
  assert!(view.is_deleting("a"));
  assert!(matches!(view.begin_delete("a"), Err(Error::InFlight(_))));

  view.finish_delete::<MemoryStoreError>(ticket, Ok(())).unwrap();
  assert!(view.submissions().is_empty());
  assert!(matches!(view.begin_delete("a"), Err(Error::NotPresent(_))));
}

#[test]
fn deletes_complete_in_any_order() {
  let mut view = AdminView::new();
  view.finish_load::<MemoryStoreError>(Ok(vec![
    doc("a", json!({ "name": "Alice", "attendance": "буду" })),
    doc("b", json!({ "name": "Bob", "attendance": "не смогу" })),
    doc("c", json!({ "name": "Cleo", "attendance": "буду" })),
  ]));

  let ta = view.begin_delete("a").unwrap();
  let tc = view.begin_delete("c").unwrap();
  view.finish_delete::<MemoryStoreError>(tc, Ok(())).unwrap();
  view.finish_delete::<MemoryStoreError>(ta, Ok(())).unwrap();

  let ids: Vec<_> = view.submissions().iter().map(|s| s.id.as_str()).collect();
  assert_eq!(ids, ["b"]);
}

#[test]
fn delete_before_load_is_refused() {
  let mut view = AdminView::new();
  assert!(matches!(view.begin_delete("a"), Err(Error::NotPresent(_))));
  assert!(view.is_loading());
}

#[tokio::test]
async fn shared_guard_spans_views() {
  let store = alice_and_bob();
  let guard = InFlight::new();

  let mut first = AdminView::new().with_in_flight(guard.clone());
  first.load(&store).await;
  let mut second = AdminView::new().with_in_flight(guard.clone());
  second.load(&store).await;

  let ticket = first.begin_delete("a").unwrap();
  assert!(matches!(second.begin_delete("a"), Err(Error::InFlight(_))));
  first.finish_delete::<MemoryStoreError>(ticket, Ok(())).unwrap();
  assert!(guard.is_empty());
}
