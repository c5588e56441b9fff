//! Image manifests submitted alongside element forms.
//!
//! The `images` form field is a JSON array of `{uuid, default}` objects.
//! An entry with an empty `uuid` stands for the next uploaded file part, in
//! order; an entry with a `uuid` keeps an image the element already has.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::element::ElementKind;
use crate::error::CoreError;
use crate::form::unquote;
use crate::types::DbId;

/// Accepted image file extensions (lowercase).
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// URL prefix under which the image store is served.
pub const MEDIA_URL_PREFIX: &str = "/media";

/// Public URL of a stored image, from its store-relative path.
pub fn image_url(file_path: &str) -> String {
    format!("{MEDIA_URL_PREFIX}/{}", file_path.trim_start_matches('/'))
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageManifestEntry {
    #[serde(default)]
    pub uuid: String,
    #[serde(default, deserialize_with = "default_flag")]
    pub default: bool,
}

fn default_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => matches!(unquote(&s).to_ascii_lowercase().as_str(), "true" | "1"),
        _ => false,
    })
}

/// Parse the `images` form field. Blank means no images.
pub fn parse_image_manifest(raw: &str) -> Result<Vec<ImageManifestEntry>, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("Invalid images format: {e}")))
}

/// What to do for one manifest entry on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    /// Store uploaded file number `file_index` as a new image.
    Upload { file_index: usize, is_default: bool },
    /// Keep existing image `id`, updating its default flag.
    Keep { id: DbId, is_default: bool },
}

/// Plan an update manifest against the number of uploaded files.
///
/// Fails when the manifest asks for more uploads than were sent, or names an
/// existing image with a malformed id.
pub fn plan_images(
    manifest: &[ImageManifestEntry],
    file_count: usize,
) -> Result<Vec<ImageAction>, CoreError> {
    let mut next_file = 0;
    let mut actions = Vec::with_capacity(manifest.len());

    for entry in manifest {
        let uuid = unquote(&entry.uuid);
        if uuid.is_empty() {
            if next_file >= file_count {
                return Err(CoreError::Validation(format!(
                    "Image manifest references upload #{} but only {file_count} file(s) were sent",
                    next_file + 1
                )));
            }
            actions.push(ImageAction::Upload {
                file_index: next_file,
                is_default: entry.default,
            });
            next_file += 1;
        } else {
            let id = uuid.parse::<DbId>().map_err(|_| {
                CoreError::Validation(format!("Image manifest has an invalid uuid: '{uuid}'"))
            })?;
            actions.push(ImageAction::Keep {
                id,
                is_default: entry.default,
            });
        }
    }

    Ok(actions)
}

/// Pair uploaded files with manifest entries on create.
///
/// Pairing is positional and stops at the shorter of the two lists; a file
/// without a manifest entry, or the reverse, is ignored.
pub fn pair_uploads(manifest: &[ImageManifestEntry], file_count: usize) -> Vec<ImageAction> {
    manifest
        .iter()
        .take(file_count)
        .enumerate()
        .map(|(file_index, entry)| ImageAction::Upload {
            file_index,
            is_default: entry.default,
        })
        .collect()
}

/// Existing images not kept by the plan; these are removed on update.
pub fn removed_images(current: &[DbId], actions: &[ImageAction]) -> Vec<DbId> {
    current
        .iter()
        .copied()
        .filter(|id| {
            !actions
                .iter()
                .any(|a| matches!(a, ImageAction::Keep { id: kept, .. } if kept == id))
        })
        .collect()
}

/// Validate the extension of an uploaded file name and return it lowercased.
pub fn validate_image_extension(file_name: &str) -> Result<String, CoreError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {}",
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        )))
    }
}

/// Relative storage path for a new image of an element:
/// `images/{kind}/{element_id}/{image_id}.{ext}`.
pub fn image_relative_path(kind: ElementKind, element_id: DbId, image_id: DbId, ext: &str) -> PathBuf {
    PathBuf::from("images")
        .join(kind.as_str())
        .join(element_id.to_string())
        .join(format!("{image_id}.{ext}"))
}
