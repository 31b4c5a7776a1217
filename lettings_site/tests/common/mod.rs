#![allow(dead_code)]

use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use diesel::{SqliteConnection, sql_query};
use std::path::PathBuf;
use tempfile::TempDir;

use lettings_site::db::{connection, migrate};
use lettings_site::identity;
use lettings_site::legacy::models::{NewSiteAddress, NewSiteLetting, NewSiteProfile};
use lettings_site::models::NewUser;
use lettings_site::schema::{site_address, site_letting, site_profile};

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}
#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}
#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = Integer, column_name = "timeout")]
    busy_timeout: i32,
}
#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    n: i64,
}
#[derive(QueryableByName)]
struct FkViolation {
    #[diesel(sql_type = Text)]
    table: String,
}

pub struct TestDb {
    _dir: TempDir, // keep alive for the life of the test
    pub path: String,
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run(&path).expect("migrations");

    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

pub fn assert_sqlite_pragmas(conn: &mut SqliteConnection) {
    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    assert_eq!(jm.journal_mode.to_lowercase(), "wal");

    let fk: ForeignKeys = sql_query("PRAGMA foreign_keys;").get_result(conn).unwrap();
    assert_eq!(fk.foreign_keys, 1);

    let bt: BusyTimeout = sql_query("PRAGMA busy_timeout;").get_result(conn).unwrap();
    assert_eq!(bt.busy_timeout, 5000);
}

pub fn count(conn: &mut SqliteConnection, table: &str) -> i64 {
    let row: CountRow = sql_query(format!("SELECT COUNT(*) AS n FROM {table}"))
        .get_result(conn)
        .unwrap();
    row.n
}

pub fn fk_check_empty(conn: &mut SqliteConnection) {
    let rows: Vec<FkViolation> = sql_query("PRAGMA foreign_key_check;").load(conn).unwrap();
    let tables: Vec<String> = rows.into_iter().map(|r| r.table).collect();
    assert!(tables.is_empty(), "FK violations in tables: {tables:?}");
}

/// A legacy address with the varying fields filled in and the rest fixed.
pub fn legacy_address<'a>(number: i32, street: &'a str, city: &'a str) -> NewSiteAddress<'a> {
    NewSiteAddress {
        number,
        street,
        city,
        state: "IL",
        zip_code: 62704,
        country_iso_code: "USA",
    }
}

pub fn insert_legacy_address(conn: &mut SqliteConnection, row: &NewSiteAddress<'_>) -> i32 {
    diesel::insert_into(site_address::table)
        .values(row)
        .returning(site_address::id)
        .get_result(conn)
        .expect("insert legacy address")
}

pub fn insert_legacy_letting(conn: &mut SqliteConnection, title: &str, address_id: i32) -> i32 {
    diesel::insert_into(site_letting::table)
        .values(&NewSiteLetting { title, address_id })
        .returning(site_letting::id)
        .get_result(conn)
        .expect("insert legacy letting")
}

pub fn insert_legacy_profile(
    conn: &mut SqliteConnection,
    user_id: i32,
    favorite_city: &str,
) -> i32 {
    diesel::insert_into(site_profile::table)
        .values(&NewSiteProfile {
            user_id,
            favorite_city,
        })
        .returning(site_profile::id)
        .get_result(conn)
        .expect("insert legacy profile")
}

pub fn insert_user(conn: &mut SqliteConnection, username: &str) -> i32 {
    identity::create_user(
        conn,
        &NewUser {
            username,
            email: "",
            first_name: "",
            last_name: "",
            is_staff: false,
        },
    )
    .expect("insert user")
}
