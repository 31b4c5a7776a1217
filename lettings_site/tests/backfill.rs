mod common;

use common::{
    count, fk_check_empty, insert_legacy_address, insert_legacy_letting, insert_legacy_profile,
    insert_user, legacy_address, setup_db,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use lettings_site::backfill::{
    AddressCopier, BackfillError, LettingCopier, ProfileCopier, run_backfill,
};
use lettings_site::diag::MemoryDiag;
use lettings_site::identity;
use lettings_site::lettings::{self, LettingsSink};
use lettings_site::models::Address;
use lettings_site::observe::{ObserverSet, RecordObserver};
use lettings_site::profiles;
use lettings_site::schema::{lettings_address, lettings_letting, profiles_profile};

fn repos() -> (lettings::SqliteRepo, profiles::SqliteRepo) {
    (
        lettings::SqliteRepo::default(),
        profiles::SqliteRepo::default(),
    )
}

#[test]
fn addresses_copied_verbatim() {
    let (_db, mut conn) = setup_db();
    let (lettings_repo, _) = repos();

    insert_legacy_address(&mut conn, &legacy_address(12, "Elm St", "Springfield"));
    insert_legacy_address(&mut conn, &legacy_address(7, "Maple Rd", "Peoria"));
    insert_legacy_address(&mut conn, &legacy_address(99, "Birch Ln", "Chicago"));

    let diag = MemoryDiag::new();
    AddressCopier::new(&diag)
        .run(&mut conn, &lettings_repo)
        .expect("address copy");

    assert_eq!(count(&mut conn, "lettings_address"), 3);

    // Every legacy tuple exists exactly once among the copies.
    for (number, street, city) in [(12, "Elm St", "Springfield"), (7, "Maple Rd", "Peoria"), (99, "Birch Ln", "Chicago")] {
        let n: i64 = lettings_address::table
            .filter(
                lettings_address::number
                    .eq(number)
                    .and(lettings_address::street.eq(street))
                    .and(lettings_address::city.eq(city))
                    .and(lettings_address::state.eq("IL"))
                    .and(lettings_address::zip_code.eq(62704))
                    .and(lettings_address::country_iso_code.eq("USA")),
            )
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(n, 1, "{number} {street} copied exactly once");
    }
}

#[test]
fn end_to_end_letting_follows_its_address() {
    let (_db, mut conn) = setup_db();
    let (lettings_repo, profiles_repo) = repos();

    let old_id = insert_legacy_address(&mut conn, &legacy_address(12, "Elm St", "Springfield"));
    insert_legacy_letting(&mut conn, "Cabin", old_id);

    let diag = MemoryDiag::new();
    run_backfill(&mut conn, &lettings_repo, &profiles_repo, &diag).expect("backfill");

    let new_address: Address = lettings_address::table
        .select(Address::as_select())
        .first(&mut conn)
        .expect("one copied address");
    assert_eq!(
        (
            new_address.number,
            new_address.street.as_str(),
            new_address.city.as_str(),
            new_address.state.as_str(),
            new_address.zip_code,
            new_address.country_iso_code.as_str(),
        ),
        (12, "Elm St", "Springfield", "IL", 62704, "USA")
    );

    let (title, address_id): (String, i32) = lettings_letting::table
        .select((lettings_letting::title, lettings_letting::address_id))
        .first(&mut conn)
        .expect("one copied letting");
    assert_eq!(title, "Cabin");
    assert_eq!(address_id, new_address.id);

    assert_eq!(count(&mut conn, "lettings_letting"), 1);
    fk_check_empty(&mut conn);

    // Two progress messages per step.
    assert_eq!(diag.entries().len(), 6);
}

#[test]
fn unmatched_address_soft_skips_letting() {
    let (_db, mut conn) = setup_db();
    let (lettings_repo, _) = repos();

    let old_id = insert_legacy_address(&mut conn, &legacy_address(12, "Elm St", "Springfield"));
    insert_legacy_letting(&mut conn, "Cabin", old_id);

    let diag = MemoryDiag::new();
    AddressCopier::new(&diag)
        .run(&mut conn, &lettings_repo)
        .expect("address copy");

    // Lose the copied address before re-linking runs.
    diesel::delete(lettings_address::table)
        .execute(&mut conn)
        .unwrap();

    LettingCopier::new(&diag)
        .run(&mut conn, &lettings_repo)
        .expect("zero matches must not be an error");

    assert_eq!(count(&mut conn, "lettings_letting"), 0);
}

#[test]
fn ambiguous_address_match_is_fatal() {
    let (_db, mut conn) = setup_db();
    let (lettings_repo, profiles_repo) = repos();

    // Two legacy rows with identical field values; nothing forbids this.
    let a = insert_legacy_address(&mut conn, &legacy_address(12, "Elm St", "Springfield"));
    insert_legacy_address(&mut conn, &legacy_address(12, "Elm St", "Springfield"));
    insert_legacy_letting(&mut conn, "Cabin", a);

    let diag = MemoryDiag::new();
    let err = run_backfill(&mut conn, &lettings_repo, &profiles_repo, &diag)
        .expect_err("two candidates cannot be resolved");

    match err.downcast_ref::<BackfillError>() {
        Some(BackfillError::AmbiguousAddress { count, .. }) => assert_eq!(*count, 2),
        other => panic!("unexpected error: {other:?} / {err:?}"),
    }

    // Step 1 committed, step 2 rolled back whole.
    assert_eq!(count(&mut conn, "lettings_address"), 2);
    assert_eq!(count(&mut conn, "lettings_letting"), 0);
}

#[test]
fn profile_copied_for_existing_user() {
    let (_db, mut conn) = setup_db();
    let (_, profiles_repo) = repos();

    let bob = insert_user(&mut conn, "bob");
    insert_legacy_profile(&mut conn, bob, "Tokyo");

    let diag = MemoryDiag::new();
    ProfileCopier::new(&diag)
        .run(&mut conn, &profiles_repo)
        .expect("profile copy");

    let (user_id, favorite_city): (i32, String) = profiles_profile::table
        .select((profiles_profile::user_id, profiles_profile::favorite_city))
        .first(&mut conn)
        .expect("one copied profile");
    assert_eq!(user_id, bob);
    assert_eq!(favorite_city, "Tokyo");
}

#[test]
fn profile_skipped_when_user_gone() {
    let (_db, mut conn) = setup_db();
    let (_, profiles_repo) = repos();

    let bob = insert_user(&mut conn, "bob");
    insert_legacy_profile(&mut conn, bob, "Tokyo");
    identity::delete_user(&mut conn, bob).unwrap();

    let diag = MemoryDiag::new();
    ProfileCopier::new(&diag)
        .run(&mut conn, &profiles_repo)
        .expect("missing user must not be an error");

    assert_eq!(count(&mut conn, "profiles_profile"), 0);
}

#[test]
fn rerun_duplicates_addresses_then_goes_ambiguous() {
    let (_db, mut conn) = setup_db();
    let (lettings_repo, profiles_repo) = repos();

    let old_id = insert_legacy_address(&mut conn, &legacy_address(12, "Elm St", "Springfield"));
    insert_legacy_letting(&mut conn, "Cabin", old_id);

    let diag = MemoryDiag::new();
    run_backfill(&mut conn, &lettings_repo, &profiles_repo, &diag).expect("first run");

    // Second run against the same sink: the address step happily
    // duplicates, which then makes every resolution ambiguous.
    let err = run_backfill(&mut conn, &lettings_repo, &profiles_repo, &diag)
        .expect_err("second run cannot re-link");
    assert!(err.downcast_ref::<BackfillError>().is_some());

    assert_eq!(count(&mut conn, "lettings_address"), 2);
    assert_eq!(count(&mut conn, "lettings_letting"), 1);
}

#[test]
fn rerun_trips_one_profile_per_user() {
    let (_db, mut conn) = setup_db();
    let (lettings_repo, profiles_repo) = repos();

    let bob = insert_user(&mut conn, "bob");
    insert_legacy_profile(&mut conn, bob, "Tokyo");

    let diag = MemoryDiag::new();
    run_backfill(&mut conn, &lettings_repo, &profiles_repo, &diag).expect("first run");

    let err = run_backfill(&mut conn, &lettings_repo, &profiles_repo, &diag)
        .expect_err("second profile for the same user");
    match err.downcast_ref::<DieselError>() {
        Some(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {}
        other => panic!("unexpected error: {other:?} / {err:?}"),
    }

    assert_eq!(count(&mut conn, "profiles_profile"), 1);
}

#[test]
fn deleting_current_address_cascades_to_letting() {
    let (_db, mut conn) = setup_db();
    let (lettings_repo, profiles_repo) = repos();

    let old_id = insert_legacy_address(&mut conn, &legacy_address(12, "Elm St", "Springfield"));
    insert_legacy_letting(&mut conn, "Cabin", old_id);

    let diag = MemoryDiag::new();
    run_backfill(&mut conn, &lettings_repo, &profiles_repo, &diag).expect("backfill");

    diesel::delete(lettings_address::table)
        .execute(&mut conn)
        .unwrap();
    assert_eq!(count(&mut conn, "lettings_letting"), 0);
}

struct CountingObserver {
    created: Arc<AtomicUsize>,
}

impl RecordObserver for CountingObserver {
    fn created(&self, _table: &str, _id: i32) {
        self.created.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn observers_fire_after_each_create() {
    let (_db, mut conn) = setup_db();

    let created = Arc::new(AtomicUsize::new(0));
    let mut observers = ObserverSet::new();
    observers.register(Box::new(CountingObserver {
        created: created.clone(),
    }));
    let lettings_repo = lettings::SqliteRepo::new(observers);
    let profiles_repo = profiles::SqliteRepo::default();

    let old_id = insert_legacy_address(&mut conn, &legacy_address(12, "Elm St", "Springfield"));
    insert_legacy_letting(&mut conn, "Cabin", old_id);

    let diag = MemoryDiag::new();
    run_backfill(&mut conn, &lettings_repo, &profiles_repo, &diag).expect("backfill");

    // One address, one letting.
    assert_eq!(created.load(Ordering::SeqCst), 2);
    assert!(lettings_repo.any_lettings(&mut conn).unwrap());
}
