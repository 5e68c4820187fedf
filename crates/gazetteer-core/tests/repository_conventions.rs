//! Calling-convention equivalence and lifecycle event tests.
//!
//! The repository exposes future, stream, and callback conventions over one
//! collection. A record saved through one convention must read back
//! identically through any other, and every operation must dispatch its
//! lifecycle events to registered listeners.

use std::sync::Arc;

use futures::StreamExt;
use gazetteer_core::{
    GeoPoint, InMemoryStore, LoggingListener, RecordingListener, Repository, StoreEvent, Venue,
};

fn repository() -> Repository<Venue> {
    Repository::new(Arc::new(InMemoryStore::<Venue>::new()))
}

#[tokio::test]
async fn test_save_future_read_stream_fields_match() {
    let repo = repository();

    let saved = repo
        .save(Venue::new("123 Main St", GeoPoint::new(1.0, 2.0)))
        .await
        .unwrap();

    let mut stream = repo.stream_all().await.unwrap();
    let streamed = stream
        .next()
        .await
        .expect("one venue in the collection")
        .unwrap();
    assert!(stream.next().await.is_none());

    assert_eq!(streamed, saved);
    assert_eq!(streamed.address, "123 Main St");
    assert_eq!(streamed.location, Some(GeoPoint::new(1.0, 2.0)));
}

#[tokio::test]
async fn test_save_future_read_callback_fields_match() {
    let repo = repository();

    let saved = repo
        .save(Venue::new("221B Baker Street", GeoPoint::new(-0.158, 51.523)))
        .await
        .unwrap();

    let seen: Arc<std::sync::Mutex<Vec<Venue>>> = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handled = repo
        .for_each(move |venue| {
            let sink = Arc::clone(&sink);
            Box::pin(async move {
                sink.lock().unwrap().push(venue);
            })
        })
        .await
        .unwrap();

    assert_eq!(handled, 1);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], saved);
}

#[tokio::test]
async fn test_all_three_conventions_agree() {
    let repo = repository();

    let saved = repo
        .save(Venue::new("123 Main St", GeoPoint::new(1.0, 2.0)))
        .await
        .unwrap();
    let id = saved.id.clone().unwrap();

    // future convention
    let by_id = repo.find_by_id(&id).await.unwrap().unwrap();

    // stream convention
    let streamed: Vec<Venue> = repo
        .stream_all()
        .await
        .unwrap()
        .map(|item| item.unwrap())
        .collect()
        .await;

    // callback convention
    let collected: Arc<std::sync::Mutex<Vec<Venue>>> = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&collected);
    repo.for_each(move |venue| {
        let sink = Arc::clone(&sink);
        Box::pin(async move {
            sink.lock().unwrap().push(venue);
        })
    })
    .await
    .unwrap();
    let callback_seen = collected.lock().unwrap().clone();

    assert_eq!(by_id, saved);
    assert_eq!(streamed, vec![saved.clone()]);
    assert_eq!(callback_seen, vec![saved]);
}

#[tokio::test]
async fn test_save_load_delete_event_sequence() {
    let listener = Arc::new(RecordingListener::new());
    let repo = repository().with_listener(listener.clone());

    let saved = repo
        .save(Venue::new("123 Main St", GeoPoint::new(1.0, 2.0)))
        .await
        .unwrap();
    let id = saved.id.clone().unwrap();

    repo.find_by_id(&id).await.unwrap();
    repo.delete(&id).await.unwrap();

    assert_eq!(
        listener.kinds(),
        vec![
            "before_save",
            "after_save",
            "after_load",
            "before_delete",
            "after_delete",
        ]
    );

    // BeforeSave fires before the identifier exists; AfterSave carries it.
    match &listener.events()[0] {
        StoreEvent::BeforeSave { collection, id } => {
            assert_eq!(collection, "venues");
            assert_eq!(id.as_deref(), None);
        }
        other => panic!("expected BeforeSave, got {:?}", other),
    }
    match &listener.events()[1] {
        StoreEvent::AfterSave { id: event_id, .. } => {
            assert_eq!(event_id.as_deref(), Some(id.as_str()));
        }
        other => panic!("expected AfterSave, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stream_items_fire_after_load_events() {
    let listener = Arc::new(RecordingListener::new());
    let repo = repository().with_listener(listener.clone());

    repo.save(Venue::new("123 Main St", GeoPoint::new(1.0, 2.0)))
        .await
        .unwrap();
    repo.save(Venue::new("456 Oak Ave", GeoPoint::new(3.0, 4.0)))
        .await
        .unwrap();

    let loaded: Vec<Venue> = repo
        .stream_all()
        .await
        .unwrap()
        .map(|item| item.unwrap())
        .collect()
        .await;
    assert_eq!(loaded.len(), 2);

    let after_loads = listener
        .events()
        .iter()
        .filter(|e| e.kind() == "after_load")
        .count();
    assert_eq!(after_loads, 2);
}

#[tokio::test]
async fn test_missing_delete_fires_no_after_delete() {
    let listener = Arc::new(RecordingListener::new());
    let repo = repository().with_listener(listener.clone());

    assert!(!repo.delete("no-such-venue").await.unwrap());
    assert_eq!(listener.kinds(), vec!["before_delete"]);
}

#[tokio::test]
async fn test_unregistered_geo_expansion_is_fail_soft() {
    // The in-memory store registers no geo expansion rules; index setup for
    // the venue's declared geo index must still succeed and the repository
    // must stay fully usable with the field unindexed.
    let repo = repository().with_listener(Arc::new(LoggingListener));

    repo.ensure_indexes().await.unwrap();

    let saved = repo
        .save(Venue::new("123 Main St", GeoPoint::new(1.0, 2.0)))
        .await
        .unwrap();
    let found = repo
        .find_by_id(saved.id.as_deref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.location, Some(GeoPoint::new(1.0, 2.0)));
}
