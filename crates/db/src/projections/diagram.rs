//! Diagram view: what the canvas needs to draw one element.

use archgraph_core::image::image_url;
use archgraph_core::owner::OwnerRef;
use archgraph_core::types::DbId;
use serde::Serialize;
use sqlx::PgPool;

use crate::models::image::ImageFile;
use crate::models::parameter::Parameter;
use crate::repositories::{ImageRepo, ParameterRepo};

/// A parameter with its own scalar fields only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramParameter {
    pub id: DbId,
    pub name: String,
    pub value: Option<String>,
    pub secret: bool,
    pub parameter_type: Option<DbId>,
}

impl From<&Parameter> for DiagramParameter {
    fn from(p: &Parameter) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            value: p.value.clone(),
            secret: p.secret,
            parameter_type: p.parameter_type_id,
        }
    }
}

/// An image reference as the editor sends it back in its manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageView {
    pub uuid: DbId,
    /// Public URL of the file.
    pub file: String,
    pub default: bool,
}

impl From<&ImageFile> for ImageView {
    fn from(i: &ImageFile) -> Self {
        Self {
            uuid: i.id,
            file: image_url(&i.file_path),
            default: i.is_default,
        }
    }
}

/// Element row plus its direct parameters and images.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramView<T: Serialize> {
    #[serde(flatten)]
    pub element: T,
    pub parameters: Vec<DiagramParameter>,
    pub images: Vec<ImageView>,
}

impl<T: Serialize> DiagramView<T> {
    /// Load the parameters and images of `owner` around its row.
    pub async fn load(pool: &PgPool, element: T, owner: OwnerRef) -> Result<Self, sqlx::Error> {
        let parameters = ParameterRepo::list_by_owner(pool, owner).await?;
        let images = ImageRepo::list_by_owner(pool, owner).await?;
        Ok(Self {
            element,
            parameters: parameters.iter().map(DiagramParameter::from).collect(),
            images: images.iter().map(ImageView::from).collect(),
        })
    }
}
