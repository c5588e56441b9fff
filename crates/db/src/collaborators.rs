//! Lookups into data owned by other parts of the product.
//!
//! Detail projections embed an element's vulnerabilities, flow executions
//! and version. The diagram core never writes these, so they sit behind a
//! trait that tests (or a future remote service) can replace.

use archgraph_core::owner::OwnerRef;
use archgraph_core::types::DbId;

use crate::models::collaborator::CollaboratorRecord;
use crate::models::version::Version;
use crate::repositories::{CollaboratorRepo, CollaboratorTable, VersionRepo};
use crate::DbPool;

/// Read access to collaborator data attached to diagram elements.
#[async_trait::async_trait]
pub trait CollaboratorLookup: Send + Sync {
    /// Vulnerabilities recorded against an element.
    async fn vulnerabilities(&self, owner: OwnerRef)
        -> Result<Vec<CollaboratorRecord>, sqlx::Error>;

    /// Flow executions recorded against an element.
    async fn flow_executions(&self, owner: OwnerRef)
        -> Result<Vec<CollaboratorRecord>, sqlx::Error>;

    /// A version by id.
    async fn version(&self, id: DbId) -> Result<Option<Version>, sqlx::Error>;
}

/// [`CollaboratorLookup`] backed by the shared PostgreSQL tables.
#[derive(Clone)]
pub struct PgCollaborators {
    pool: DbPool,
}

impl PgCollaborators {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CollaboratorLookup for PgCollaborators {
    async fn vulnerabilities(
        &self,
        owner: OwnerRef,
    ) -> Result<Vec<CollaboratorRecord>, sqlx::Error> {
        CollaboratorRepo::list_for(&self.pool, CollaboratorTable::Vulnerabilities, owner).await
    }

    async fn flow_executions(
        &self,
        owner: OwnerRef,
    ) -> Result<Vec<CollaboratorRecord>, sqlx::Error> {
        CollaboratorRepo::list_for(&self.pool, CollaboratorTable::FlowExecutions, owner).await
    }

    async fn version(&self, id: DbId) -> Result<Option<Version>, sqlx::Error> {
        VersionRepo::find_by_id(&self.pool, id).await
    }
}
