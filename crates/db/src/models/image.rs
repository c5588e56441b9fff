//! Image metadata rows. The bytes live in the local image store.

use archgraph_core::error::CoreError;
use archgraph_core::owner::{OwnerColumns, OwnerRef};
use archgraph_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Column list shared across image queries.
pub const IMAGE_COLUMNS: &str = "id, file_path, is_default, \
    component_id, subcomponent_id, port_id, interface_id, created_at";

/// A row from the `image_files` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ImageFile {
    pub id: DbId,
    /// Path relative to the image store root.
    pub file_path: String,
    pub is_default: bool,
    pub component_id: Option<DbId>,
    pub subcomponent_id: Option<DbId>,
    pub port_id: Option<DbId>,
    pub interface_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl ImageFile {
    pub fn owner(&self) -> Result<OwnerRef, CoreError> {
        OwnerRef::try_from(OwnerColumns {
            component: self.component_id,
            subcomponent: self.subcomponent_id,
            port: self.port_id,
            interface: self.interface_id,
        })
    }
}

/// DTO for recording a stored image.
#[derive(Debug, Clone)]
pub struct NewImageFile {
    pub id: DbId,
    pub file_path: String,
    pub is_default: bool,
    pub owner: OwnerRef,
}
