//! JSON payloads handed to the Lua scripts in `lua/`.
//!
//! Ids travel as strings so Lua never has to format a float.

use serde::Serialize;

use crate::{errors::SocialError, id::EntityId};

/// Document that must exist for a script to proceed.
#[derive(Debug, Clone, Serialize)]
pub struct EntityRef {
    pub key: String,
    /// Entity name reported back in `entity_not_found` replies.
    pub entity: String,
    pub entity_id: String,
}

impl EntityRef {
    pub fn new(key: String, entity: &str, entity_id: EntityId) -> Self {
        Self {
            key,
            entity: entity.to_string(),
            entity_id: entity_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UniqueClaim {
    pub field: String,
    pub key: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexEntry {
    /// Sorted set scored by id.
    Sorted { key: String },
    /// List in insertion order.
    List { key: String },
}

#[derive(Debug, Serialize)]
pub struct InsertCommand {
    pub sequence_key: String,
    pub entity_key_prefix: String,
    pub payload_json: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unique_claims: Vec<UniqueClaim>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexEntry>,
}

impl InsertCommand {
    pub fn new<T: Serialize>(sequence_key: String, entity_key_prefix: String, payload: &T) -> Result<Self, SocialError> {
        let payload_json = serde_json::to_string(payload)
            .map_err(|err| SocialError::other(format!("failed to serialize payload: {err}")))?;
        Ok(Self {
            sequence_key,
            entity_key_prefix,
            payload_json,
            requires: Vec::new(),
            unique_claims: Vec::new(),
            indexes: Vec::new(),
        })
    }

    pub fn require(mut self, entity: EntityRef) -> Self {
        self.requires.push(entity);
        self
    }

    pub fn claim(mut self, field: &str, key: String) -> Self {
        self.unique_claims.push(UniqueClaim {
            field: field.to_string(),
            key,
        });
        self
    }

    pub fn index(mut self, entry: IndexEntry) -> Self {
        self.indexes.push(entry);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct Assignment {
    pub path: String,
    pub value_json: String,
}

/// Moves the claim on `field`. The script derives the current claim key from
/// the stored value under `claim_prefix`.
#[derive(Debug, Serialize)]
pub struct UniqueSwap {
    pub field: String,
    pub claim_prefix: String,
    pub new_key: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateCommand {
    pub target: EntityRef,
    pub assignments: Vec<Assignment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unique_swaps: Vec<UniqueSwap>,
}

impl UpdateCommand {
    pub fn new(target: EntityRef) -> Self {
        Self {
            target,
            assignments: Vec::new(),
            unique_swaps: Vec::new(),
        }
    }

    pub fn assign<T: Serialize>(mut self, path: &str, value: &T) -> Result<Self, SocialError> {
        let value_json = serde_json::to_string(value)
            .map_err(|err| SocialError::other(format!("failed to serialize {path}: {err}")))?;
        self.assignments.push(Assignment {
            path: path.to_string(),
            value_json,
        });
        Ok(self)
    }

    pub fn swap_unique(mut self, field: &str, claim_prefix: String, new_key: String) -> Self {
        self.unique_swaps.push(UniqueSwap {
            field: field.to_string(),
            claim_prefix,
            new_key,
        });
        self
    }
}

/// Children listed under `list_key` whose documents live at `{entity_key_prefix}:{id}`.
#[derive(Debug, Serialize)]
pub struct CascadeList {
    pub list_key: String,
    pub entity_key_prefix: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteCommand {
    pub target: EntityRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub drop_keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cascade: Option<CascadeList>,
}

#[derive(Debug, Serialize)]
pub struct ToggleSide {
    pub target: EntityRef,
    pub set_key: String,
    pub member: String,
    /// JSON path of the counter mirroring the set's cardinality.
    pub counter_path: String,
}

impl ToggleSide {
    pub fn new(target: EntityRef, set_key: String, member: EntityId, counter_path: &str) -> Self {
        Self {
            target,
            set_key,
            member: member.to_string(),
            counter_path: counter_path.to_string(),
        }
    }
}

/// Membership flip applied to every side in one script call.
#[derive(Debug, Serialize)]
pub struct ToggleCommand {
    pub sides: Vec<ToggleSide>,
}
