//! SQLite implementation of the profiles sink.

use diesel::prelude::*;
use diesel::{SqliteConnection, insert_into};

use super::ProfilesSink;
use crate::models::NewProfile;
use crate::observe::ObserverSet;

/// Repository for the profiles table in a SQLite database.
#[derive(Default)]
pub struct SqliteRepo {
    observers: ObserverSet,
}

impl SqliteRepo {
    /// Creates a repository with the given observers.
    pub fn new(observers: ObserverSet) -> Self {
        Self { observers }
    }
}

impl ProfilesSink for SqliteRepo {
    fn create_profile(
        &self,
        conn: &mut SqliteConnection,
        row: &NewProfile<'_>,
    ) -> anyhow::Result<i32> {
        use crate::schema::profiles_profile::dsl as pp;

        let new_id: i32 = insert_into(pp::profiles_profile)
            .values(row)
            .returning(pp::id)
            .get_result(conn)?;

        self.observers.notify_created("profiles_profile", new_id);
        Ok(new_id)
    }

    fn any_profiles(&self, conn: &mut SqliteConnection) -> anyhow::Result<bool> {
        use crate::schema::profiles_profile::dsl as pp;

        let n: i64 = pp::profiles_profile.count().get_result(conn)?;
        Ok(n > 0)
    }

    fn delete_all(&self, conn: &mut SqliteConnection) -> anyhow::Result<usize> {
        use crate::schema::profiles_profile::dsl as pp;

        let ids: Vec<i32> = pp::profiles_profile.select(pp::id).load(conn)?;
        diesel::delete(pp::profiles_profile).execute(conn)?;
        for id in &ids {
            self.observers.notify_deleted("profiles_profile", *id);
        }
        Ok(ids.len())
    }
}
