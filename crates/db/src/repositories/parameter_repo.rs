//! Repository for the `parameters` table.

use std::collections::HashSet;

use archgraph_core::owner::OwnerRef;
use archgraph_core::parameter::{
    partition_by_known_types, plan_parameter_sync, referenced_types, ParameterEntry,
    ResolvedParameter, SkipReason, SkippedParameter,
};
use archgraph_core::types::{new_id, DbId};
use sqlx::{Connection, PgConnection, PgPool};

use crate::models::parameter::{Parameter, ParameterInput, PARAMETER_COLUMNS};
use crate::repositories::ParameterTypeRepo;

/// [`PARAMETER_COLUMNS`] qualified with the `p` alias, for joined queries.
const QUALIFIED_COLUMNS: &str = "p.id, p.name, p.value, p.secret, p.parameter_type_id, \
    p.component_id, p.subcomponent_id, p.port_id, p.interface_id, p.created_at, p.updated_at";

/// Outcome of replacing an owner's parameter set.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParameterSyncReport {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Entries that were not saved, with the reason.
    pub skipped: Vec<SkippedParameter>,
}

/// Provides CRUD operations for parameters.
pub struct ParameterRepo;

impl ParameterRepo {
    /// Insert a parameter for the owner named in `input`.
    pub async fn create(
        conn: &mut PgConnection,
        input: &ParameterInput,
    ) -> Result<Parameter, sqlx::Error> {
        let owner = input.owner.columns();
        let query = format!(
            "INSERT INTO parameters \
                (id, name, value, secret, parameter_type_id, \
                 component_id, subcomponent_id, port_id, interface_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PARAMETER_COLUMNS}"
        );
        sqlx::query_as::<_, Parameter>(&query)
            .bind(new_id())
            .bind(&input.name)
            .bind(&input.value)
            .bind(input.secret)
            .bind(input.parameter_type_id)
            .bind(owner.component)
            .bind(owner.subcomponent)
            .bind(owner.port)
            .bind(owner.interface)
            .fetch_one(conn)
            .await
    }

    /// Find a parameter by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Parameter>, sqlx::Error> {
        let query = format!("SELECT {PARAMETER_COLUMNS} FROM parameters WHERE id = $1");
        sqlx::query_as::<_, Parameter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List parameters in creation order.
    ///
    /// With a `version`, only parameters whose owner belongs to that version
    /// are returned, whichever kind of element the owner is.
    pub async fn list(pool: &PgPool, version: Option<DbId>) -> Result<Vec<Parameter>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} FROM parameters p \
             LEFT JOIN components c ON c.id = p.component_id \
             LEFT JOIN subcomponents s ON s.id = p.subcomponent_id \
             LEFT JOIN ports po ON po.id = p.port_id \
             LEFT JOIN interfaces i ON i.id = p.interface_id \
             WHERE $1::uuid IS NULL \
                OR c.version_id = $1 \
                OR s.version_id = $1 \
                OR po.version_id = $1 \
                OR i.version_id = $1 \
             ORDER BY p.id"
        );
        sqlx::query_as::<_, Parameter>(&query)
            .bind(version)
            .fetch_all(pool)
            .await
    }

    /// List the parameters attached to one element, in creation order.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner: OwnerRef,
    ) -> Result<Vec<Parameter>, sqlx::Error> {
        let column = owner.kind().owner_column();
        let query = format!(
            "SELECT {PARAMETER_COLUMNS} FROM parameters WHERE {column} = $1 ORDER BY id"
        );
        sqlx::query_as::<_, Parameter>(&query)
            .bind(owner.id())
            .fetch_all(pool)
            .await
    }

    /// Replace every field of a parameter, including its owner.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &ParameterInput,
    ) -> Result<Option<Parameter>, sqlx::Error> {
        let owner = input.owner.columns();
        let query = format!(
            "UPDATE parameters SET \
                name = $2, \
                value = $3, \
                secret = $4, \
                parameter_type_id = $5, \
                component_id = $6, \
                subcomponent_id = $7, \
                port_id = $8, \
                interface_id = $9, \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {PARAMETER_COLUMNS}"
        );
        sqlx::query_as::<_, Parameter>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.value)
            .bind(input.secret)
            .bind(input.parameter_type_id)
            .bind(owner.component)
            .bind(owner.subcomponent)
            .bind(owner.port)
            .bind(owner.interface)
            .fetch_optional(conn)
            .await
    }

    /// Delete a parameter by id.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parameters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Make `owner`'s parameters match `entries`.
    ///
    /// Entries whose parameter type does not exist, whose name is too long,
    /// or whose row the database rejects are skipped and logged. Everything
    /// else is applied as an in-place diff: the owner's current rows are
    /// locked, rows named by id are rewritten, new entries are inserted and
    /// the rest are deleted. Each row is written under its own savepoint, so
    /// one rejected entry does not undo the others. Run this on a transaction
    /// so a connection failure leaves the previous set untouched.
    pub async fn sync_for_owner(
        conn: &mut PgConnection,
        owner: OwnerRef,
        entries: Vec<ParameterEntry>,
    ) -> Result<ParameterSyncReport, sqlx::Error> {
        let type_ids = referenced_types(&entries);
        let known: HashSet<DbId> = ParameterTypeRepo::existing_ids(&mut *conn, &type_ids)
            .await?
            .into_iter()
            .collect();
        let (resolved, mut skipped) = partition_by_known_types(entries, &known);

        for entry in &skipped {
            tracing::warn!(
                owner = %owner,
                name = %entry.name,
                parameter_type = ?entry.parameter_type,
                reason = %entry.reason,
                "Skipping parameter",
            );
        }

        let column = owner.kind().owner_column();
        let existing: Vec<DbId> = sqlx::query_scalar(&format!(
            "SELECT id FROM parameters WHERE {column} = $1 ORDER BY id FOR UPDATE"
        ))
        .bind(owner.id())
        .fetch_all(&mut *conn)
        .await?;

        let plan = plan_parameter_sync(&existing, resolved);
        let mut report = ParameterSyncReport {
            deleted: plan.deletes.len(),
            ..ParameterSyncReport::default()
        };

        if !plan.deletes.is_empty() {
            sqlx::query("DELETE FROM parameters WHERE id = ANY($1)")
                .bind(&plan.deletes)
                .execute(&mut *conn)
                .await?;
        }

        let writes = plan
            .updates
            .into_iter()
            .map(|(id, entry)| (Some(id), entry))
            .chain(plan.inserts.into_iter().map(|entry| (None, entry)));

        for (existing_id, entry) in writes {
            let parameter_type = Some(entry.parameter_type_id);
            let input = to_input(entry, owner);
            if Self::write_in_savepoint(&mut *conn, existing_id, &input).await? {
                match existing_id {
                    Some(_) => report.updated += 1,
                    None => report.inserted += 1,
                }
            } else {
                skipped.push(SkippedParameter::new(
                    input.name,
                    parameter_type,
                    SkipReason::Rejected,
                ));
            }
        }
        report.skipped = skipped;

        tracing::debug!(
            owner = %owner,
            inserted = report.inserted,
            updated = report.updated,
            deleted = report.deleted,
            skipped = report.skipped.len(),
            "Synced parameters",
        );

        Ok(report)
    }

    /// Insert or rewrite one parameter under a savepoint. Returns `false`
    /// when the database rejects the row; only that row is rolled back.
    async fn write_in_savepoint(
        conn: &mut PgConnection,
        existing_id: Option<DbId>,
        input: &ParameterInput,
    ) -> Result<bool, sqlx::Error> {
        let mut savepoint = conn.begin().await?;
        let result = match existing_id {
            Some(id) => Self::update(&mut *savepoint, id, input).await.map(|_| ()),
            None => Self::create(&mut *savepoint, input).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                savepoint.commit().await?;
                Ok(true)
            }
            Err(sqlx::Error::Database(db_err)) => {
                savepoint.rollback().await?;
                tracing::warn!(
                    owner = %input.owner,
                    name = %input.name,
                    error = %db_err,
                    "Skipping parameter rejected by the database",
                );
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }
}

fn to_input(entry: ResolvedParameter, owner: OwnerRef) -> ParameterInput {
    ParameterInput {
        name: entry.name,
        value: Some(entry.value),
        secret: entry.secret,
        parameter_type_id: entry.parameter_type_id,
        owner,
    }
}
