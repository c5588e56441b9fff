//! Multipart element forms.
//!
//! Create and update requests for the four graph entities are multipart
//! forms: scalar text fields, a JSON `parameters` batch, a JSON `images`
//! manifest and any number of `files` parts. Values come from the diagram
//! editor as strings, possibly wrapped in an extra pair of quotes.

use std::collections::HashMap;

use archgraph_core::element::{validate_element_name, validate_name_length, SecurityFlags};
use archgraph_core::error::CoreError;
use archgraph_core::form::{optional_text, parse_flag, parse_optional_id, parse_required_id, unquote};
use archgraph_core::image::{parse_image_manifest, ImageManifestEntry};
use archgraph_core::interface::InterfaceType;
use archgraph_core::parameter::{parse_parameter_batch, ParameterEntry};
use archgraph_core::types::DbId;
use archgraph_db::models::element::ElementInput;
use axum::body::Bytes;
use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// Form part name of uploaded image files.
const FILES_FIELD: &str = "files";

/// One uploaded `files` part.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// A parsed element form. Later text fields with the same name win.
#[derive(Debug, Default)]
pub struct ElementForm {
    fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl ElementForm {
    /// Drain a multipart body.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == FILES_FIELD {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.files.push(UploadedFile { file_name, bytes });
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Build a form from text fields only.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: Vec::new(),
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// `only_notes` (or the editor's `onlyNotes`) set to `"1"`.
    pub fn only_notes(&self) -> bool {
        ["only_notes", "onlyNotes"]
            .iter()
            .filter_map(|key| self.text(key))
            .any(|v| unquote(v) == "1")
    }

    pub fn notes(&self) -> Option<String> {
        optional_text(self.text("notes"))
    }

    /// Shared element fields with a required name.
    pub fn element(&self) -> Result<ElementInput, CoreError> {
        let name = unquote(self.text("name").unwrap_or(""));
        validate_element_name(name)?;
        self.element_named(name)
    }

    /// Shared element fields where the name may be empty.
    pub fn element_unnamed(&self) -> Result<ElementInput, CoreError> {
        let name = unquote(self.text("name").unwrap_or(""));
        validate_name_length(name)?;
        self.element_named(name)
    }

    fn element_named(&self, name: &str) -> Result<ElementInput, CoreError> {
        Ok(ElementInput {
            name: name.to_string(),
            description: optional_text(self.text("description")),
            notes: self.notes(),
            flags: SecurityFlags {
                availability: self.flag("availability")?,
                confidentiality: self.flag("confidentiality")?,
                integrity: self.flag("integrity")?,
            },
        })
    }

    fn flag(&self, field: &str) -> Result<bool, CoreError> {
        parse_flag(field, self.text(field).unwrap_or(""))
    }

    pub fn optional_id(&self, field: &str) -> Result<Option<DbId>, CoreError> {
        parse_optional_id(field, self.text(field).unwrap_or(""))
    }

    pub fn required_id(&self, field: &str) -> Result<DbId, CoreError> {
        parse_required_id(field, self.text(field))
    }

    pub fn interface_type(&self) -> Result<InterfaceType, CoreError> {
        InterfaceType::from_name(unquote(self.text("type").unwrap_or("")))
    }

    /// The parameter batch. A missing field is an empty batch.
    pub fn parameters(&self) -> Result<Vec<ParameterEntry>, CoreError> {
        parse_parameter_batch(self.text("parameters").unwrap_or(""))
    }

    /// The image manifest, or `None` when the field was not sent.
    pub fn image_manifest(&self) -> Result<Option<Vec<ImageManifestEntry>>, CoreError> {
        self.text("images").map(parse_image_manifest).transpose()
    }
}
