//! Repository for the `image_files` table.

use archgraph_core::owner::OwnerRef;
use archgraph_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::image::{ImageFile, NewImageFile, IMAGE_COLUMNS};

/// Provides access to image metadata rows.
pub struct ImageRepo;

impl ImageRepo {
    /// Record a stored image.
    pub async fn create(
        conn: &mut PgConnection,
        input: &NewImageFile,
    ) -> Result<ImageFile, sqlx::Error> {
        let owner = input.owner.columns();
        let query = format!(
            "INSERT INTO image_files \
                (id, file_path, is_default, component_id, subcomponent_id, port_id, interface_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {IMAGE_COLUMNS}"
        );
        sqlx::query_as::<_, ImageFile>(&query)
            .bind(input.id)
            .bind(&input.file_path)
            .bind(input.is_default)
            .bind(owner.component)
            .bind(owner.subcomponent)
            .bind(owner.port)
            .bind(owner.interface)
            .fetch_one(conn)
            .await
    }

    /// List the images of one element in upload order.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner: OwnerRef,
    ) -> Result<Vec<ImageFile>, sqlx::Error> {
        let column = owner.kind().owner_column();
        let query =
            format!("SELECT {IMAGE_COLUMNS} FROM image_files WHERE {column} = $1 ORDER BY id");
        sqlx::query_as::<_, ImageFile>(&query)
            .bind(owner.id())
            .fetch_all(pool)
            .await
    }

    /// Set the default flag of an image.
    pub async fn set_default(
        conn: &mut PgConnection,
        id: DbId,
        is_default: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE image_files SET is_default = $2 WHERE id = $1")
            .bind(id)
            .bind(is_default)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete several images, returning the removed rows so their files can
    /// be cleaned up.
    pub async fn delete_many(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<ImageFile>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query =
            format!("DELETE FROM image_files WHERE id = ANY($1) RETURNING {IMAGE_COLUMNS}");
        sqlx::query_as::<_, ImageFile>(&query)
            .bind(ids)
            .fetch_all(conn)
            .await
    }

    /// File paths of every image that deleting `owner` removes by cascade.
    ///
    /// A component takes its sub-components, ports and the interfaces sourced
    /// from those ports with it; a port takes the interfaces sourced from it.
    /// Interfaces that merely target a deleted element survive, so their
    /// images are not included.
    pub async fn paths_for_cascade(
        pool: &PgPool,
        owner: OwnerRef,
    ) -> Result<Vec<String>, sqlx::Error> {
        let filter = match owner {
            OwnerRef::Component(_) => {
                "component_id = $1 \
                 OR subcomponent_id IN (SELECT id FROM subcomponents WHERE component_id = $1) \
                 OR port_id IN (SELECT id FROM ports WHERE component_id = $1) \
                 OR interface_id IN ( \
                     SELECT i.id FROM interfaces i \
                     JOIN ports p ON p.id = i.port_from_id \
                     WHERE p.component_id = $1)"
            }
            OwnerRef::Port(_) => {
                "port_id = $1 \
                 OR interface_id IN (SELECT id FROM interfaces WHERE port_from_id = $1)"
            }
            OwnerRef::SubComponent(_) => "subcomponent_id = $1",
            OwnerRef::Interface(_) => "interface_id = $1",
        };
        let query = format!("SELECT file_path FROM image_files WHERE {filter} ORDER BY id");
        sqlx::query_scalar::<_, String>(&query)
            .bind(owner.id())
            .fetch_all(pool)
            .await
    }
}
