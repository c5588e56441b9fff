//! Repository for the `ports` table.

use archgraph_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::element::ELEMENT_COLUMNS;
use crate::models::port::{Port, PortInput};

/// Provides CRUD operations for ports.
pub struct PortRepo;

impl PortRepo {
    /// Insert a new port with a caller-generated id.
    pub async fn create(
        conn: &mut PgConnection,
        id: DbId,
        input: &PortInput,
    ) -> Result<Port, sqlx::Error> {
        let query = format!(
            "INSERT INTO ports \
                (id, name, description, notes, availability, confidentiality, integrity, \
                 version_id, component_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {ELEMENT_COLUMNS}, component_id"
        );
        sqlx::query_as::<_, Port>(&query)
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

    /// Find a port by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Port>, sqlx::Error> {
        let query = format!("SELECT {ELEMENT_COLUMNS}, component_id FROM ports WHERE id = $1");
        sqlx::query_as::<_, Port>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all ports in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Port>, sqlx::Error> {
        let query = format!("SELECT {ELEMENT_COLUMNS}, component_id FROM ports ORDER BY id");
        sqlx::query_as::<_, Port>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the ports of one component.
    pub async fn list_by_component(
        pool: &PgPool,
        component_id: DbId,
    ) -> Result<Vec<Port>, sqlx::Error> {
        let query = format!(
            "SELECT {ELEMENT_COLUMNS}, component_id FROM ports \
             WHERE component_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, Port>(&query)
            .bind(component_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the scalar fields and parent of a port.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &PortInput,
    ) -> Result<Option<Port>, sqlx::Error> {
        let query = format!(
            "UPDATE ports SET \
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
        sqlx::query_as::<_, Port>(&query)
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

    /// Update only the notes of a port.
    pub async fn update_notes(
        pool: &PgPool,
        id: DbId,
        notes: Option<&str>,
    ) -> Result<Option<Port>, sqlx::Error> {
        let query = format!(
            "UPDATE ports SET notes = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {ELEMENT_COLUMNS}, component_id"
        );
        sqlx::query_as::<_, Port>(&query)
            .bind(id)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a port. Interfaces sourced from it are deleted; interfaces
    /// targeting it lose their target but survive.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
