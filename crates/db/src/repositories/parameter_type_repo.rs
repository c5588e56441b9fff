//! Repository for the `parameter_types` table.

use archgraph_core::types::{new_id, DbId};
use sqlx::{PgConnection, PgPool};

use crate::models::parameter_type::{CreateParameterType, ParameterType, UpdateParameterType};

/// Column list for the `parameter_types` table.
const COLUMNS: &str = "id, name, description, generic, created_at, updated_at";

/// Provides CRUD operations for parameter types.
pub struct ParameterTypeRepo;

impl ParameterTypeRepo {
    /// Insert a new parameter type, returning the created row.
    ///
    /// If `generic` is `None`, the type is not generic.
    pub async fn create(
        pool: &PgPool,
        input: &CreateParameterType,
    ) -> Result<ParameterType, sqlx::Error> {
        let query = format!(
            "INSERT INTO parameter_types (id, name, description, generic) \
             VALUES ($1, $2, $3, COALESCE($4, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParameterType>(&query)
            .bind(new_id())
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.generic)
            .fetch_one(pool)
            .await
    }

    /// Find a parameter type by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ParameterType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parameter_types WHERE id = $1");
        sqlx::query_as::<_, ParameterType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all parameter types ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<ParameterType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parameter_types ORDER BY name, id");
        sqlx::query_as::<_, ParameterType>(&query)
            .fetch_all(pool)
            .await
    }

    /// Fetch several parameter types at once. Unknown ids are ignored.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<ParameterType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parameter_types WHERE id = ANY($1)");
        sqlx::query_as::<_, ParameterType>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Which of `ids` name an existing parameter type.
    pub async fn existing_ids(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, DbId>("SELECT id FROM parameter_types WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(conn)
            .await
    }

    /// Update a parameter type. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateParameterType,
    ) -> Result<Option<ParameterType>, sqlx::Error> {
        let query = format!(
            "UPDATE parameter_types SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                generic = COALESCE($4, generic), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParameterType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.generic)
            .fetch_optional(pool)
            .await
    }

    /// Delete a parameter type. Parameters of this type are deleted with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parameter_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
