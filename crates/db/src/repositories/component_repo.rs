//! Repository for the `components` table.

use archgraph_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::component::{Component, ComponentInput};
use crate::models::element::ELEMENT_COLUMNS;

/// Provides CRUD operations for components.
pub struct ComponentRepo;

impl ComponentRepo {
    /// Insert a new component with a caller-generated id.
    pub async fn create(
        conn: &mut PgConnection,
        id: DbId,
        input: &ComponentInput,
    ) -> Result<Component, sqlx::Error> {
        let query = format!(
            "INSERT INTO components \
                (id, name, description, notes, availability, confidentiality, integrity, version_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {ELEMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .bind(&input.element.name)
            .bind(&input.element.description)
            .bind(&input.element.notes)
            .bind(input.element.flags.availability)
            .bind(input.element.flags.confidentiality)
            .bind(input.element.flags.integrity)
            .bind(input.version_id)
            .fetch_one(conn)
            .await
    }

    /// Find a component by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Component>, sqlx::Error> {
        let query = format!("SELECT {ELEMENT_COLUMNS} FROM components WHERE id = $1");
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all components in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Component>, sqlx::Error> {
        let query = format!("SELECT {ELEMENT_COLUMNS} FROM components ORDER BY id");
        sqlx::query_as::<_, Component>(&query).fetch_all(pool).await
    }

    /// Replace the scalar fields of a component. A `None` version keeps the
    /// current one.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &ComponentInput,
    ) -> Result<Option<Component>, sqlx::Error> {
        let query = format!(
            "UPDATE components SET \
                name = $2, \
                description = $3, \
                notes = $4, \
                availability = $5, \
                confidentiality = $6, \
                integrity = $7, \
                version_id = COALESCE($8, version_id), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {ELEMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .bind(&input.element.name)
            .bind(&input.element.description)
            .bind(&input.element.notes)
            .bind(input.element.flags.availability)
            .bind(input.element.flags.confidentiality)
            .bind(input.element.flags.integrity)
            .bind(input.version_id)
            .fetch_optional(conn)
            .await
    }

    /// Update only the notes of a component.
    pub async fn update_notes(
        pool: &PgPool,
        id: DbId,
        notes: Option<&str>,
    ) -> Result<Option<Component>, sqlx::Error> {
        let query = format!(
            "UPDATE components SET notes = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {ELEMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a component. Sub-components, ports, their interfaces and every
    /// owned parameter and image row go with it.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM components WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
