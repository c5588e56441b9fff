//! Repository for the `interfaces` table.

use archgraph_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::element::ELEMENT_COLUMNS;
use crate::models::interface::{Interface, InterfaceInput};

/// Interface-specific columns following the shared element columns.
const EDGE_COLUMNS: &str =
    "interface_type, port_from_id, port_to_port_id, port_to_subcomponent_id";

/// Provides CRUD operations for interfaces.
pub struct InterfaceRepo;

impl InterfaceRepo {
    /// Insert a new interface with a caller-generated id.
    pub async fn create(
        conn: &mut PgConnection,
        id: DbId,
        input: &InterfaceInput,
    ) -> Result<Interface, sqlx::Error> {
        let query = format!(
            "INSERT INTO interfaces \
                (id, name, description, notes, availability, confidentiality, integrity, \
                 version_id, interface_type, port_from_id, port_to_port_id, port_to_subcomponent_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {ELEMENT_COLUMNS}, {EDGE_COLUMNS}"
        );
        sqlx::query_as::<_, Interface>(&query)
            .bind(id)
            .bind(&input.element.name)
            .bind(&input.element.description)
            .bind(&input.element.notes)
            .bind(input.element.flags.availability)
            .bind(input.element.flags.confidentiality)
            .bind(input.element.flags.integrity)
            .bind(input.version_id)
            .bind(input.interface_type.as_str())
            .bind(input.port_from_id)
            .bind(input.target.port_to_port())
            .bind(input.target.port_to_subcomponent())
            .fetch_one(conn)
            .await
    }

    /// Find an interface by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Interface>, sqlx::Error> {
        let query =
            format!("SELECT {ELEMENT_COLUMNS}, {EDGE_COLUMNS} FROM interfaces WHERE id = $1");
        sqlx::query_as::<_, Interface>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all interfaces in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Interface>, sqlx::Error> {
        let query = format!("SELECT {ELEMENT_COLUMNS}, {EDGE_COLUMNS} FROM interfaces ORDER BY id");
        sqlx::query_as::<_, Interface>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the interfaces whose source port belongs to a component.
    pub async fn list_from_component(
        pool: &PgPool,
        component_id: DbId,
    ) -> Result<Vec<Interface>, sqlx::Error> {
        let query = format!(
            "SELECT {ELEMENT_COLUMNS}, {EDGE_COLUMNS} FROM interfaces \
             WHERE port_from_id IN (SELECT id FROM ports WHERE component_id = $1) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Interface>(&query)
            .bind(component_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the scalar fields, source and target of an interface.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &InterfaceInput,
    ) -> Result<Option<Interface>, sqlx::Error> {
        let query = format!(
            "UPDATE interfaces SET \
                name = $2, \
                description = $3, \
                notes = $4, \
                availability = $5, \
                confidentiality = $6, \
                integrity = $7, \
                version_id = $8, \
                interface_type = $9, \
                port_from_id = $10, \
                port_to_port_id = $11, \
                port_to_subcomponent_id = $12, \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {ELEMENT_COLUMNS}, {EDGE_COLUMNS}"
        );
        sqlx::query_as::<_, Interface>(&query)
            .bind(id)
            .bind(&input.element.name)
            .bind(&input.element.description)
            .bind(&input.element.notes)
            .bind(input.element.flags.availability)
            .bind(input.element.flags.confidentiality)
            .bind(input.element.flags.integrity)
            .bind(input.version_id)
            .bind(input.interface_type.as_str())
            .bind(input.port_from_id)
            .bind(input.target.port_to_port())
            .bind(input.target.port_to_subcomponent())
            .fetch_optional(conn)
            .await
    }

    /// Update only the notes of an interface.
    pub async fn update_notes(
        pool: &PgPool,
        id: DbId,
        notes: Option<&str>,
    ) -> Result<Option<Interface>, sqlx::Error> {
        let query = format!(
            "UPDATE interfaces SET notes = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {ELEMENT_COLUMNS}, {EDGE_COLUMNS}"
        );
        sqlx::query_as::<_, Interface>(&query)
            .bind(id)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete an interface and its parameters and images.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM interfaces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
