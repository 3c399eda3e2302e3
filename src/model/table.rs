//! Dining table model.

use serde::{Deserialize, Serialize};

use super::serde_helpers::default_true;

/// A dining table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_occupied: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct TableWire {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_occupied: bool,
}

impl From<TableWire> for Table {
    fn from(wire: TableWire) -> Self {
        Table {
            id: wire.id,
            name: wire.name,
            is_active: wire.is_active,
            is_occupied: wire.is_occupied,
        }
    }
}

/// Payload for creating a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTable {
    pub name: String,
}

/// Partial update payload for a table.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_occupied: Option<bool>,
}
