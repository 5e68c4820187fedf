//! Integration tests against a running MongoDB server.
//!
//! These exercise the full bootstrap wiring and the repository conventions
//! end to end. They need a reachable server (default
//! `mongodb://localhost:27017`, override with `MONGODB_URI`), so every test
//! is `#[ignore]`d; run them with `cargo test -- --ignored`.

use futures::StreamExt;
use gazetteer_core::{GeoPoint, Venue};
use gazetteer_mongodb::{AppContext, MongoConfig};

fn test_config() -> MongoConfig {
    MongoConfig::from_env().with_database("gazetteer_it")
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_bootstrap_builds_wiring_graph() {
    let context = AppContext::bootstrap(test_config()).await.unwrap();

    assert_eq!(context.database.name(), "gazetteer_it");
    assert_eq!(context.client.database().name(), "gazetteer_it");
    assert_eq!(context.config.database, "gazetteer_it");
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_save_and_read_back_across_conventions() {
    let context = AppContext::bootstrap(test_config()).await.unwrap();
    let venues = &context.venues;

    let saved = venues
        .save(Venue::new("123 Main St", GeoPoint::new(1.0, 2.0)))
        .await
        .unwrap();
    let id = saved.id.clone().unwrap();

    // future convention
    let found = venues.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(found.address, "123 Main St");
    assert_eq!(found.location, Some(GeoPoint::new(1.0, 2.0)));

    // stream convention
    let mut stream = venues.stream_all().await.unwrap();
    let mut streamed = None;
    while let Some(item) = stream.next().await {
        let venue = item.unwrap();
        if venue.id.as_deref() == Some(id.as_str()) {
            streamed = Some(venue);
        }
    }
    assert_eq!(streamed, Some(saved));

    venues.delete(&id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_find_near_uses_declared_geo_index() {
    let context = AppContext::bootstrap(test_config()).await.unwrap();
    let operations = context.factory.operations::<Venue>();

    let near = context
        .venues
        .save(Venue::new("Near", GeoPoint::new(0.001, 0.001)))
        .await
        .unwrap();
    let far = context
        .venues
        .save(Venue::new("Far", GeoPoint::new(50.0, 50.0)))
        .await
        .unwrap();

    let results = operations
        .find_near("location", GeoPoint::new(0.0, 0.0), Some(1.0))
        .await
        .unwrap();
    assert!(results.iter().any(|v| v.id == near.id));
    assert!(!results.iter().any(|v| v.id == far.id));

    context.venues.delete(near.id.as_deref().unwrap()).await.unwrap();
    context.venues.delete(far.id.as_deref().unwrap()).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_bootstrap_is_idempotent_on_reconstruction() {
    // Index setup runs at every bootstrap; the second run must not fail.
    AppContext::bootstrap(test_config()).await.unwrap();
    AppContext::bootstrap(test_config()).await.unwrap();
}
