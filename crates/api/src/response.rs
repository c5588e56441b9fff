//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Used by the standalone parameter and parameter-type endpoints. Element
/// endpoints return their projections bare, since the diagram editor
/// reads them that way.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
