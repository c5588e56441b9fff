//! Parameter batches submitted with an element create/update.
//!
//! The batch replaces the owner's parameter set. Entries are resolved
//! against the known parameter types first: entries with an unknown type or
//! an unusable name are skipped, not fatal. The survivors are then diffed against the owner's
//! current parameters so the change can be applied in place inside one
//! transaction.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::element::MAX_NAME_LEN;
use crate::error::CoreError;
use crate::form::unquote;
use crate::types::DbId;

/// Name given to a parameter submitted without one.
pub const DEFAULT_PARAMETER_NAME: &str = "Default parameter";

// ---------------------------------------------------------------------------
// Batch entries
// ---------------------------------------------------------------------------

/// One `{id?, name, value, secret, parameter_type}` item of a batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterEntry {
    /// Id of an existing parameter of the same owner, when the editor sends
    /// back what it previously received.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<DbId>,
    #[serde(default = "default_name", deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub secret: bool,
    /// Raw parameter type reference; resolved later.
    #[serde(default, deserialize_with = "lenient_id")]
    pub parameter_type: Option<DbId>,
}

fn default_name() -> String {
    DEFAULT_PARAMETER_NAME.to_string()
}

fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => default_name(),
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DbId>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => unquote(&s).parse().ok(),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => matches!(
            unquote(&s).to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        _ => false,
    })
}

/// Parse the JSON-encoded `parameters` form field.
///
/// A blank field is an empty batch. Anything that is not a JSON array of
/// objects is a validation error for the whole request.
pub fn parse_parameter_batch(raw: &str) -> Result<Vec<ParameterEntry>, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("Invalid parameters format: {e}")))
}

// ---------------------------------------------------------------------------
// Type resolution
// ---------------------------------------------------------------------------

/// A batch entry whose parameter type is known to exist.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameter {
    pub id: Option<DbId>,
    pub name: String,
    pub value: String,
    pub secret: bool,
    pub parameter_type_id: DbId,
}

/// Why a batch entry was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The parameter type is missing or does not exist.
    UnknownType,
    /// The name is longer than the column allows.
    NameTooLong,
    /// The row was rejected by the database.
    Rejected,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::UnknownType => "unknown parameter type",
            Self::NameTooLong => "name too long",
            Self::Rejected => "rejected by database",
        })
    }
}

/// A batch entry that was not saved.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedParameter {
    pub name: String,
    pub parameter_type: Option<DbId>,
    pub reason: SkipReason,
}

impl SkippedParameter {
    pub fn new(name: String, parameter_type: Option<DbId>, reason: SkipReason) -> Self {
        Self {
            name,
            parameter_type,
            reason,
        }
    }
}

/// Split a batch into entries that can be saved and entries to skip: those
/// with an unknown type or a name over [`MAX_NAME_LEN`] characters.
pub fn partition_by_known_types(
    entries: Vec<ParameterEntry>,
    known_types: &HashSet<DbId>,
) -> (Vec<ResolvedParameter>, Vec<SkippedParameter>) {
    let mut resolved = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for entry in entries {
        let Some(parameter_type_id) = entry.parameter_type.filter(|t| known_types.contains(t))
        else {
            skipped.push(SkippedParameter::new(
                entry.name,
                entry.parameter_type,
                SkipReason::UnknownType,
            ));
            continue;
        };
        if entry.name.chars().count() > MAX_NAME_LEN {
            skipped.push(SkippedParameter::new(
                entry.name,
                entry.parameter_type,
                SkipReason::NameTooLong,
            ));
            continue;
        }
        resolved.push(ResolvedParameter {
            id: entry.id,
            name: entry.name,
            value: entry.value,
            secret: entry.secret,
            parameter_type_id,
        });
    }

    (resolved, skipped)
}

/// Distinct type ids referenced by a batch, for a single lookup query.
pub fn referenced_types(entries: &[ParameterEntry]) -> Vec<DbId> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter_map(|e| e.parameter_type)
        .filter(|id| seen.insert(*id))
        .collect()
}

// ---------------------------------------------------------------------------
// Sync planning
// ---------------------------------------------------------------------------

/// Changes that turn an owner's current parameters into the submitted batch.
#[derive(Debug, Default, PartialEq)]
pub struct SyncPlan {
    /// Existing parameters rewritten in place.
    pub updates: Vec<(DbId, ResolvedParameter)>,
    /// New parameters.
    pub inserts: Vec<ResolvedParameter>,
    /// Existing parameters absent from the batch.
    pub deletes: Vec<DbId>,
}

/// Diff the submitted batch against the ids currently owned.
///
/// An entry updates the existing parameter whose id it carries; entries
/// without an id, with an id the owner does not have, or repeating an id
/// already claimed earlier in the batch are inserted. Every existing
/// parameter not claimed is deleted, so applying the plan leaves the owner
/// with exactly the batch.
pub fn plan_parameter_sync(existing: &[DbId], incoming: Vec<ResolvedParameter>) -> SyncPlan {
    let existing_set: HashSet<DbId> = existing.iter().copied().collect();
    let mut claimed = HashSet::new();
    let mut plan = SyncPlan::default();

    for entry in incoming {
        match entry.id {
            Some(id) if existing_set.contains(&id) && claimed.insert(id) => {
                plan.updates.push((id, entry));
            }
            _ => plan.inserts.push(entry),
        }
    }

    plan.deletes = existing
        .iter()
        .copied()
        .filter(|id| !claimed.contains(id))
        .collect();

    plan
}
