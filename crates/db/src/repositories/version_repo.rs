//! Repository for the `versions` table.
//!
//! Versions are managed elsewhere; the diagram only needs to create them in
//! tests and look them up for inheritance and detail views.

use archgraph_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::version::Version;

const COLUMNS: &str = "id, name, sut, created_at";

/// Read access (and test seeding) for versions.
pub struct VersionRepo;

impl VersionRepo {
    pub async fn create(
        pool: &PgPool,
        name: &str,
        sut: Option<&serde_json::Value>,
    ) -> Result<Version, sqlx::Error> {
        let query = format!(
            "INSERT INTO versions (id, name, sut) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(new_id())
            .bind(name)
            .bind(sut)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Version>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM versions WHERE id = $1");
        sqlx::query_as::<_, Version>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
