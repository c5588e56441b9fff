//! Write-path steps shared by the four element handlers: the create and
//! update sequence (scalar row, images, parameter set, one transaction),
//! notes-only updates, deletes with image cleanup, and the checks on
//! elements a form references.

use std::path::PathBuf;

use archgraph_core::element::ElementKind;
use archgraph_core::error::CoreError;
use archgraph_core::image::{
    image_relative_path, pair_uploads, plan_images, removed_images, validate_image_extension,
    ImageAction,
};
use archgraph_core::owner::OwnerRef;
use archgraph_core::types::{new_id, DbId};
use archgraph_db::models::component::{Component, ComponentInput};
use archgraph_db::models::image::{ImageFile, NewImageFile};
use archgraph_db::models::interface::{Interface, InterfaceInput};
use archgraph_db::models::port::{Port, PortInput};
use archgraph_db::models::subcomponent::{SubComponent, SubComponentInput};
use archgraph_db::projections::DiagramView;
use archgraph_db::repositories::{
    ComponentRepo, ImageRepo, InterfaceRepo, ParameterRepo, PortRepo, SubComponentRepo,
};
use axum::http::StatusCode;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::error::{AppError, AppResult};
use crate::forms::{ElementForm, UploadedFile};
use crate::images::ImageStore;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Element rows
// ---------------------------------------------------------------------------

/// A diagram element table, seen through its repository.
#[async_trait::async_trait]
pub trait ElementRecord: Serialize + Send + Sync + Sized {
    type Input: Send + Sync;

    const KIND: ElementKind;

    async fn insert(
        conn: &mut PgConnection,
        id: DbId,
        input: &Self::Input,
    ) -> Result<Self, sqlx::Error>;

    async fn replace(
        conn: &mut PgConnection,
        id: DbId,
        input: &Self::Input,
    ) -> Result<Option<Self>, sqlx::Error>;

    async fn replace_notes(
        pool: &PgPool,
        id: DbId,
        notes: Option<&str>,
    ) -> Result<Option<Self>, sqlx::Error>;

    async fn find(pool: &PgPool, id: DbId) -> Result<Option<Self>, sqlx::Error>;

    async fn remove(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error>;
}

macro_rules! element_record {
    ($row:ty, $input:ty, $repo:ty, $kind:expr) => {
        #[async_trait::async_trait]
        impl ElementRecord for $row {
            type Input = $input;

            const KIND: ElementKind = $kind;

            async fn insert(
                conn: &mut PgConnection,
                id: DbId,
                input: &Self::Input,
            ) -> Result<Self, sqlx::Error> {
                <$repo>::create(conn, id, input).await
            }

            async fn replace(
                conn: &mut PgConnection,
                id: DbId,
                input: &Self::Input,
            ) -> Result<Option<Self>, sqlx::Error> {
                <$repo>::update(conn, id, input).await
            }

            async fn replace_notes(
                pool: &PgPool,
                id: DbId,
                notes: Option<&str>,
            ) -> Result<Option<Self>, sqlx::Error> {
                <$repo>::update_notes(pool, id, notes).await
            }

            async fn find(pool: &PgPool, id: DbId) -> Result<Option<Self>, sqlx::Error> {
                <$repo>::find_by_id(pool, id).await
            }

            async fn remove(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
                <$repo>::delete(pool, id).await
            }
        }
    };
}

element_record!(Component, ComponentInput, ComponentRepo, ElementKind::Component);
element_record!(SubComponent, SubComponentInput, SubComponentRepo, ElementKind::SubComponent);
element_record!(Port, PortInput, PortRepo, ElementKind::Port);
element_record!(Interface, InterfaceInput, InterfaceRepo, ElementKind::Interface);

/// Outcome of a create or update, before the diagram view is loaded.
pub struct SavedElement<T> {
    pub id: DbId,
    pub row: T,
    pub parameters_skipped: usize,
    pub images_removed: usize,
}

impl<T: ElementRecord> SavedElement<T> {
    pub async fn into_view(self, pool: &PgPool) -> AppResult<DiagramView<T>> {
        let owner = OwnerRef::new(T::KIND, self.id);
        Ok(DiagramView::load(pool, self.row, owner).await?)
    }
}

/// Load an element or fail with 404.
pub async fn find_element<T: ElementRecord>(state: &AppState, id: DbId) -> AppResult<T> {
    T::find(&state.pool, id)
        .await?
        .ok_or_else(|| element_not_found(T::KIND, id))
}

/// Diagram view of an existing element.
pub async fn element_diagram<T: ElementRecord>(
    state: &AppState,
    id: DbId,
) -> AppResult<DiagramView<T>> {
    let row = find_element::<T>(state, id).await?;
    Ok(DiagramView::load(&state.pool, row, OwnerRef::new(T::KIND, id)).await?)
}

/// Insert a new element with the form's images and parameters in one
/// transaction.
pub async fn create_element<T: ElementRecord>(
    state: &AppState,
    form: &ElementForm,
    input: &T::Input,
) -> AppResult<SavedElement<T>> {
    let parameters = form.parameters()?;
    let manifest = form.image_manifest()?.unwrap_or_default();

    let id = new_id();
    let owner = OwnerRef::new(T::KIND, id);
    let uploads = prepare_uploads(owner, &form.files, &pair_uploads(&manifest, form.files.len()))?;

    let mut tx = state.pool.begin().await?;
    let row = T::insert(&mut *tx, id, input).await?;
    store_uploads(&state.images, &mut *tx, owner, &form.files, &uploads).await?;
    let report = ParameterRepo::sync_for_owner(&mut *tx, owner, parameters).await?;
    tx.commit().await?;

    Ok(SavedElement {
        id,
        row,
        parameters_skipped: report.skipped.len(),
        images_removed: 0,
    })
}

/// Rewrite an element's scalar fields and parameter set, and its images
/// when the form carries a manifest. Files of dropped images are removed
/// after commit.
pub async fn update_element<T: ElementRecord>(
    state: &AppState,
    id: DbId,
    form: &ElementForm,
    input: &T::Input,
) -> AppResult<SavedElement<T>> {
    let owner = OwnerRef::new(T::KIND, id);
    let parameters = form.parameters()?;
    let image_plan = match form.image_manifest()? {
        Some(manifest) => Some(plan_images(&manifest, form.files.len())?),
        None => None,
    };
    let current_images = ImageRepo::list_by_owner(&state.pool, owner).await?;

    let mut tx = state.pool.begin().await?;
    let row = T::replace(&mut *tx, id, input)
        .await?
        .ok_or_else(|| element_not_found(T::KIND, id))?;
    let removed = match &image_plan {
        Some(actions) => {
            apply_image_update(
                &state.images,
                &mut *tx,
                owner,
                &form.files,
                &current_images,
                actions,
            )
            .await?
        }
        None => Vec::new(),
    };
    let report = ParameterRepo::sync_for_owner(&mut *tx, owner, parameters).await?;
    tx.commit().await?;

    state.images.remove_all(&removed).await;

    Ok(SavedElement {
        id,
        row,
        parameters_skipped: report.skipped.len(),
        images_removed: removed.len(),
    })
}

/// The `only_notes` update: only the notes column changes.
pub async fn update_element_notes<T: ElementRecord>(
    state: &AppState,
    id: DbId,
    form: &ElementForm,
) -> AppResult<DiagramView<T>> {
    let row = T::replace_notes(&state.pool, id, form.notes().as_deref())
        .await?
        .ok_or_else(|| element_not_found(T::KIND, id))?;
    tracing::info!(kind = T::KIND.as_str(), id = %id, "Element notes updated");
    Ok(DiagramView::load(&state.pool, row, OwnerRef::new(T::KIND, id)).await?)
}

/// Remove the image files of the element and of everything it cascades to,
/// then the row.
pub async fn delete_element<T: ElementRecord>(state: &AppState, id: DbId) -> AppResult<StatusCode> {
    find_element::<T>(state, id).await?;
    clear_images_for_delete(state, OwnerRef::new(T::KIND, id)).await?;

    if T::remove(&state.pool, id).await? {
        tracing::info!(kind = T::KIND.as_str(), id = %id, "Element deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(element_not_found(T::KIND, id))
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// An upload checked and assigned its storage path, not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload {
    pub image_id: DbId,
    pub relative_path: PathBuf,
    pub file_index: usize,
    pub is_default: bool,
}

/// Check the extension of every file the plan uploads and assign paths.
pub fn prepare_uploads(
    owner: OwnerRef,
    files: &[UploadedFile],
    actions: &[ImageAction],
) -> Result<Vec<PendingUpload>, CoreError> {
    let mut pending = Vec::new();
    for action in actions {
        let ImageAction::Upload {
            file_index,
            is_default,
        } = *action
        else {
            continue;
        };
        let file = files.get(file_index).ok_or_else(|| {
            CoreError::Validation(format!("Upload #{} is missing", file_index + 1))
        })?;
        let ext = validate_image_extension(&file.file_name)?;
        let image_id = new_id();
        pending.push(PendingUpload {
            image_id,
            relative_path: image_relative_path(owner.kind(), owner.id(), image_id, &ext),
            file_index,
            is_default,
        });
    }
    Ok(pending)
}

/// Write the pending files and record them against `owner`.
///
/// A failed write aborts: files already written by this call are removed
/// and the error propagates, so the caller's transaction rolls back.
pub async fn store_uploads(
    store: &ImageStore,
    conn: &mut PgConnection,
    owner: OwnerRef,
    files: &[UploadedFile],
    uploads: &[PendingUpload],
) -> AppResult<()> {
    let mut written: Vec<String> = Vec::with_capacity(uploads.len());

    for upload in uploads {
        let relative = upload.relative_path.to_string_lossy().to_string();
        let bytes = &files[upload.file_index].bytes;

        if let Err(e) = store.save(&upload.relative_path, bytes).await {
            store.remove_all(&written).await;
            return Err(AppError::Storage(e));
        }
        written.push(relative.clone());

        let row = NewImageFile {
            id: upload.image_id,
            file_path: relative,
            is_default: upload.is_default,
            owner,
        };
        if let Err(e) = ImageRepo::create(&mut *conn, &row).await {
            store.remove_all(&written).await;
            return Err(e.into());
        }
    }

    Ok(())
}

/// Apply an update manifest inside the caller's transaction.
///
/// Kept images get their default flag rewritten, uploads are stored, and
/// every current image the manifest does not keep is deleted. Returns the
/// paths of the deleted images; remove them once the transaction commits.
pub async fn apply_image_update(
    store: &ImageStore,
    conn: &mut PgConnection,
    owner: OwnerRef,
    files: &[UploadedFile],
    current: &[ImageFile],
    actions: &[ImageAction],
) -> AppResult<Vec<String>> {
    let current_ids: Vec<DbId> = current.iter().map(|i| i.id).collect();

    for action in actions {
        if let ImageAction::Keep { id, .. } = action {
            if !current_ids.contains(id) {
                return Err(AppError::not_found("Image", *id));
            }
        }
    }

    let uploads = prepare_uploads(owner, files, actions)?;

    for action in actions {
        if let ImageAction::Keep { id, is_default } = *action {
            ImageRepo::set_default(&mut *conn, id, is_default).await?;
        }
    }

    let removed = ImageRepo::delete_many(&mut *conn, &removed_images(&current_ids, actions)).await?;
    store_uploads(store, conn, owner, files, &uploads).await?;

    Ok(removed.into_iter().map(|i| i.file_path).collect())
}

/// Remove the image files of `owner` and of everything deleting it cascades
/// to. Missing files are skipped.
pub async fn clear_images_for_delete(state: &AppState, owner: OwnerRef) -> AppResult<()> {
    let paths = ImageRepo::paths_for_cascade(&state.pool, owner).await?;
    let removed = state.images.remove_all(&paths).await;
    if !paths.is_empty() {
        tracing::debug!(owner = %owner, removed, total = paths.len(), "Removed image files");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Referenced elements
// ---------------------------------------------------------------------------

/// A component named in a form. A dangling id is a validation error.
pub async fn referenced_component(state: &AppState, field: &str, id: DbId) -> AppResult<Component> {
    ComponentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| dangling(field, ElementKind::Component, id))
}

/// Parent component of a sub-component or port form. On update a missing
/// `component` field keeps `current`.
pub async fn parent_component(
    state: &AppState,
    form: &ElementForm,
    current: Option<DbId>,
) -> AppResult<Component> {
    let id = match (form.optional_id("component")?, current) {
        (Some(id), _) => id,
        (None, Some(id)) => id,
        (None, None) => form.required_id("component")?,
    };
    referenced_component(state, "component", id).await
}

/// A port named in a form.
pub async fn referenced_port(state: &AppState, field: &str, id: DbId) -> AppResult<Port> {
    PortRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| dangling(field, ElementKind::Port, id))
}

/// A sub-component named in a form.
pub async fn referenced_subcomponent(
    state: &AppState,
    field: &str,
    id: DbId,
) -> AppResult<SubComponent> {
    SubComponentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| dangling(field, ElementKind::SubComponent, id))
}

fn dangling(field: &str, kind: ElementKind, id: DbId) -> AppError {
    AppError::Core(CoreError::Validation(format!(
        "Field '{field}' references a {} that does not exist: {id}",
        kind.entity_name()
    )))
}

/// Not-found error for an element kind.
pub fn element_not_found(kind: ElementKind, id: DbId) -> AppError {
    AppError::not_found(kind.entity_name(), id)
}
