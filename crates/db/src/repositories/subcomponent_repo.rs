//! Repository for the `subcomponents` table.

use archgraph_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::element::ELEMENT_COLUMNS;
use crate::models::subcomponent::{SubComponent, SubComponentInput};

/// Provides CRUD operations for sub-components.
pub struct SubComponentRepo;

impl SubComponentRepo {
    /// Insert a new sub-component with a caller-generated id.
    pub async fn create(
        conn: &mut PgConnection,
        id: DbId,
        input: &SubComponentInput,
    ) -> Result<SubComponent, sqlx::Error> {
        let query = format!(
            "INSERT INTO subcomponents \
                (id, name, description, notes, availability, confidentiality, integrity, \
                 version_id, component_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {ELEMENT_COLUMNS}, component_id"
        );
        sqlx::query_as::<_, SubComponent>(&query)
            .bind(id)
            .bind(&input.element.name)
            .bind(&input.element.description)
            .bind(&input.element.notes)
            .bind(input.element.flags.availability)
            .bind(input.element.flags.confidentiality)
            .bind(input.element.flags.integrity)
            .bind(input.version_id)
            .bind(input.component_id)
            .fetch_one(conn)
            .await
    }

    /// Find a sub-component by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SubComponent>, sqlx::Error> {
        let query = format!("SELECT {ELEMENT_COLUMNS}, component_id FROM subcomponents WHERE id = $1");
        sqlx::query_as::<_, SubComponent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all sub-components in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<SubComponent>, sqlx::Error> {
        let query = format!("SELECT {ELEMENT_COLUMNS}, component_id FROM subcomponents ORDER BY id");
        sqlx::query_as::<_, SubComponent>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the sub-components of one component.
    pub async fn list_by_component(
        pool: &PgPool,
        component_id: DbId,
    ) -> Result<Vec<SubComponent>, sqlx::Error> {
        let query = format!(
            "SELECT {ELEMENT_COLUMNS}, component_id FROM subcomponents \
             WHERE component_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, SubComponent>(&query)
            .bind(component_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the scalar fields and parent of a sub-component.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &SubComponentInput,
    ) -> Result<Option<SubComponent>, sqlx::Error> {
        let query = format!(
            "UPDATE subcomponents SET \
                name = $2, \
                description = $3, \
                notes = $4, \
                availability = $5, \
                confidentiality = $6, \
                integrity = $7, \
                version_id = $8, \
                component_id = $9, \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {ELEMENT_COLUMNS}, component_id"
        );
        sqlx::query_as::<_, SubComponent>(&query)
            .bind(id)
            .bind(&input.element.name)
            .bind(&input.element.description)
            .bind(&input.element.notes)
            .bind(input.element.flags.availability)
            .bind(input.element.flags.confidentiality)
            .bind(input.element.flags.integrity)
            .bind(input.version_id)
            .bind(input.component_id)
            .fetch_optional(conn)
            .await
    }

    /// Update only the notes of a sub-component.
    pub async fn update_notes(
        pool: &PgPool,
        id: DbId,
        notes: Option<&str>,
    ) -> Result<Option<SubComponent>, sqlx::Error> {
        let query = format!(
            "UPDATE subcomponents SET notes = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {ELEMENT_COLUMNS}, component_id"
        );
        sqlx::query_as::<_, SubComponent>(&query)
            .bind(id)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a sub-component. Interfaces targeting it lose their target but
    /// survive.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subcomponents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
