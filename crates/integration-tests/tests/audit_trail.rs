//! Audit-trail rules for product writes.
//!
//! These run against a real Postgres instance: point `TEST_DATABASE_URL`
//! at a scratch database and run with `cargo test -- --ignored`.

use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use auric_admin::db::history::ProductHistoryRepository;
use auric_admin::db::products::AdminProductRepository;
use auric_core::{ChangeType, Email};
use auric_integration_tests::ring_draft;

async fn scratch_pool() -> sqlx::PgPool {
    let url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must point at a scratch Postgres");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to scratch database");
    auric_admin::db::migrator()
        .run(&pool)
        .await
        .expect("apply migrations");
    pool
}

#[tokio::test]
#[ignore = "needs TEST_DATABASE_URL pointing at a scratch Postgres"]
async fn every_product_mutation_appends_one_history_row() {
    let pool = scratch_pool().await;
    let actor = Email::parse("audit@auricjewelry.co").expect("valid email");
    let repo = AdminProductRepository::new(&pool);

    let mut draft = ring_draft();
    draft.sku = format!("AUR-AUDIT-{}", Uuid::new_v4());

    let created = repo.create(&draft, &actor).await.expect("create product");
    assert_eq!(created.version, 1);

    draft.title = "Band Ring, polished".to_owned();
    let updated = repo
        .update(created.external_id, &draft, &actor)
        .await
        .expect("update product");
    assert_eq!(updated.version, 2);

    let deleted = repo
        .delete(created.external_id, &actor)
        .await
        .expect("delete product");
    assert_eq!(deleted.version, 2);

    let trail = ProductHistoryRepository::new(&pool)
        .list_for_product(created.external_id)
        .await
        .expect("load history");

    // newest first: deletion, revision, creation
    let [removal, revision, origin] = trail.as_slice() else {
        panic!("expected exactly three history rows, got {}", trail.len());
    };

    assert_eq!(origin.change_type, ChangeType::Created);
    assert_eq!(origin.version, 1);
    assert_eq!(revision.change_type, ChangeType::Updated);
    assert_eq!(revision.version, 2);
    assert_eq!(removal.change_type, ChangeType::Deleted);
    assert_eq!(removal.version, 2);

    // each snapshot records the state at that version
    assert_eq!(
        origin
            .snapshot
            .get("version")
            .and_then(serde_json::Value::as_i64),
        Some(1)
    );
    assert_eq!(
        revision
            .snapshot
            .get("title")
            .and_then(serde_json::Value::as_str),
        Some("Band Ring, polished")
    );
    assert!(trail.iter().all(|entry| entry.changed_by == actor.as_str()));

    // the trail outlives the product row
    assert!(
        repo.get_by_external_id(created.external_id)
            .await
            .expect("lookup after delete")
            .is_none()
    );
}
