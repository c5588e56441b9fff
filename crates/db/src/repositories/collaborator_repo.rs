//! Repository for records other services attach to diagram elements
//! (`vulnerabilities`, `flow_executions`).

use archgraph_core::owner::OwnerRef;
use archgraph_core::types::new_id;
use sqlx::PgPool;

use crate::models::collaborator::CollaboratorRecord;

/// Tables holding opaque per-element collaborator records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorTable {
    Vulnerabilities,
    FlowExecutions,
}

impl CollaboratorTable {
    fn table_name(self) -> &'static str {
        match self {
            Self::Vulnerabilities => "vulnerabilities",
            Self::FlowExecutions => "flow_executions",
        }
    }
}

/// Read access (and test seeding) for collaborator records.
pub struct CollaboratorRepo;

impl CollaboratorRepo {
    /// Attach a record to an element.
    pub async fn record(
        pool: &PgPool,
        table: CollaboratorTable,
        owner: OwnerRef,
        payload: &serde_json::Value,
    ) -> Result<CollaboratorRecord, sqlx::Error> {
        let owner_cols = owner.columns();
        let query = format!(
            "INSERT INTO {} (id, payload, component_id, subcomponent_id, port_id, interface_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, payload, created_at",
            table.table_name()
        );
        sqlx::query_as::<_, CollaboratorRecord>(&query)
            .bind(new_id())
            .bind(payload)
            .bind(owner_cols.component)
            .bind(owner_cols.subcomponent)
            .bind(owner_cols.port)
            .bind(owner_cols.interface)
            .fetch_one(pool)
            .await
    }

    /// Records of one table attached to an element, oldest first.
    pub async fn list_for(
        pool: &PgPool,
        table: CollaboratorTable,
        owner: OwnerRef,
    ) -> Result<Vec<CollaboratorRecord>, sqlx::Error> {
        let query = format!(
            "SELECT id, payload, created_at FROM {} WHERE {} = $1 ORDER BY id",
            table.table_name(),
            owner.kind().owner_column()
        );
        sqlx::query_as::<_, CollaboratorRecord>(&query)
            .bind(owner.id())
            .fetch_all(pool)
            .await
    }
}
