//! Inventory movement model: stock entrances and exits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers::blank_to_none;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "entrada")]
    Entrance,
    #[serde(rename = "salida")]
    Exit,
}

/// Reason code for a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementReason {
    #[serde(rename = "compra")]
    Purchase,
    #[serde(rename = "ajuste")]
    Correction,
    #[serde(rename = "merma")]
    Breakage,
    #[serde(rename = "devolucion")]
    Return,
    #[serde(rename = "otro")]
    Other,
}

/// A recorded stock movement.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryMovement {
    pub id: i64,
    pub product_id: i64,
    pub kind: MovementKind,
    pub quantity: i64,
    pub reason: MovementReason,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct InventoryMovementWire {
    pub id: i64,
    pub producto_id: i64,
    pub tipo: MovementKind,
    pub cantidad: i64,
    pub motivo: MovementReason,
    #[serde(default)]
    pub comentario: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
}

impl From<InventoryMovementWire> for InventoryMovement {
    fn from(wire: InventoryMovementWire) -> Self {
        InventoryMovement {
            id: wire.id,
            product_id: wire.producto_id,
            kind: wire.tipo,
            quantity: wire.cantidad,
            reason: wire.motivo,
            comment: blank_to_none(wire.comentario),
            created_at: wire.fecha_creacion,
        }
    }
}

/// Payload for recording a stock entrance or exit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewInventoryMovement {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "tipo")]
    pub kind: MovementKind,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "motivo")]
    pub reason: MovementReason,
    #[serde(rename = "comentario", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
