//! Entitlement resolution tests
//!
//! Covers the access predicate (free bypass, anonymous denial, subscriber
//! and single-program grants), the catalog listing filter, and exercise
//! ordering.

mod helpers;

use trainsmart::models::Identity;
use trainsmart::services::access;
use trainsmart::{db, Error};
use uuid::Uuid;

#[tokio::test]
async fn free_program_accessible_to_anonymous() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let program = helpers::seed_program(&pool, "Mobility Basics", true, 0)
        .await
        .unwrap();

    let allowed = access::has_access(&pool, Identity::Anonymous, program)
        .await
        .unwrap();
    assert!(allowed);
}

#[tokio::test]
async fn free_program_accessible_to_user_without_entitlement() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let program = helpers::seed_program(&pool, "Mobility Basics", true, 0)
        .await
        .unwrap();

    let allowed = access::has_access(&pool, Identity::User(Uuid::new_v4()), program)
        .await
        .unwrap();
    assert!(allowed);
}

#[tokio::test]
async fn paid_program_denied_for_anonymous() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let program = helpers::seed_program(&pool, "Strength Block 1", false, 1999)
        .await
        .unwrap();

    let allowed = access::has_access(&pool, Identity::Anonymous, program)
        .await
        .unwrap();
    assert!(!allowed);
}

#[tokio::test]
async fn paid_program_denied_without_entitlement() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let program = helpers::seed_program(&pool, "Strength Block 1", false, 1999)
        .await
        .unwrap();

    let allowed = access::has_access(&pool, Identity::User(Uuid::new_v4()), program)
        .await
        .unwrap();
    assert!(!allowed);
}

#[tokio::test]
async fn single_program_grant_covers_only_that_program() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let owned = helpers::seed_program(&pool, "Strength Block 1", false, 1999)
        .await
        .unwrap();
    let other = helpers::seed_program(&pool, "Strength Block 2", false, 2499)
        .await
        .unwrap();
    let user = Uuid::new_v4();
    helpers::seed_entitlement(&pool, user, Some(owned), false)
        .await
        .unwrap();

    assert!(access::has_access(&pool, Identity::User(user), owned)
        .await
        .unwrap());
    assert!(!access::has_access(&pool, Identity::User(user), other)
        .await
        .unwrap());
}

#[tokio::test]
async fn subscriber_grant_covers_every_program() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let p1 = helpers::seed_program(&pool, "Strength Block 1", false, 1999)
        .await
        .unwrap();
    let p2 = helpers::seed_program(&pool, "Strength Block 2", false, 2499)
        .await
        .unwrap();
    let user = Uuid::new_v4();
    // All-access grant: subscriber flag set, no program reference.
    helpers::seed_entitlement(&pool, user, None, true)
        .await
        .unwrap();

    assert!(access::has_access(&pool, Identity::User(user), p1)
        .await
        .unwrap());
    assert!(access::has_access(&pool, Identity::User(user), p2)
        .await
        .unwrap());
}

#[tokio::test]
async fn unknown_program_yields_no_access() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();

    let allowed = access::has_access(&pool, Identity::User(Uuid::new_v4()), Uuid::new_v4())
        .await
        .unwrap();
    assert!(!allowed);
}

#[tokio::test]
async fn store_failure_surfaces_as_error_for_fail_closed_handling() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let program = helpers::seed_program(&pool, "Strength Block 1", false, 1999)
        .await
        .unwrap();
    pool.close().await;

    let result = access::has_access(&pool, Identity::User(Uuid::new_v4()), program).await;
    assert!(matches!(result, Err(Error::Database(_))));
}

#[tokio::test]
async fn anonymous_listing_contains_only_free_programs() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let free = helpers::seed_program(&pool, "Mobility Basics", true, 0)
        .await
        .unwrap();
    helpers::seed_program(&pool, "Strength Block 1", false, 1999)
        .await
        .unwrap();

    let programs = access::visible_programs(&pool, Identity::Anonymous)
        .await
        .unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0].id, free);
}

#[tokio::test]
async fn authenticated_listing_contains_full_catalog_newest_first() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let base = chrono::Utc::now();
    let older = helpers::seed_program_at(&pool, "Mobility Basics", true, 0, base)
        .await
        .unwrap();
    let newer = helpers::seed_program_at(
        &pool,
        "Strength Block 1",
        false,
        1999,
        base + chrono::Duration::seconds(60),
    )
    .await
    .unwrap();

    let programs = access::visible_programs(&pool, Identity::User(Uuid::new_v4()))
        .await
        .unwrap();
    assert_eq!(programs.len(), 2);
    assert_eq!(programs[0].id, newer);
    assert_eq!(programs[1].id, older);
}

#[tokio::test]
async fn exercises_ordered_by_sort_order_and_stable() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let program = helpers::seed_program(&pool, "Mobility Basics", true, 0)
        .await
        .unwrap();
    let third = helpers::seed_exercise(&pool, program, "Cooldown", 3, 300)
        .await
        .unwrap();
    let first = helpers::seed_exercise(&pool, program, "Warmup", 1, 180)
        .await
        .unwrap();
    let second = helpers::seed_exercise(&pool, program, "Main Set", 2, 600)
        .await
        .unwrap();

    let exercises = db::exercises::list_for_program(&pool, program)
        .await
        .unwrap();
    let ids: Vec<_> = exercises.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![first, second, third]);

    // Stable under re-fetch.
    let refetched = db::exercises::list_for_program(&pool, program)
        .await
        .unwrap();
    let refetched_ids: Vec<_> = refetched.iter().map(|e| e.id).collect();
    assert_eq!(ids, refetched_ids);
}

#[tokio::test]
async fn entitlement_listing_skips_orphaned_grants() {
    let (_dir, pool) = helpers::create_test_db().await.unwrap();
    let program = helpers::seed_program(&pool, "Strength Block 1", false, 1999)
        .await
        .unwrap();
    let user = Uuid::new_v4();
    helpers::seed_entitlement(&pool, user, Some(program), false)
        .await
        .unwrap();
    // Grant referencing a program that no longer exists in the catalog.
    helpers::seed_entitlement(&pool, user, Some(Uuid::new_v4()), false)
        .await
        .unwrap();
    // Subscriber-wide grant carries no program at all.
    helpers::seed_entitlement(&pool, user, None, true)
        .await
        .unwrap();

    let entries = db::entitlements::list_with_programs(&pool, user)
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries
        .iter()
        .any(|e| e.program.as_ref().map(|p| p.id) == Some(program)));
    assert!(entries
        .iter()
        .any(|e| e.entitlement.is_subscriber && e.program.is_none()));
}
