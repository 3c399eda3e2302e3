//! Order model: statuses, line items and the adjustment batch.
//!
//! Orders live under the backend's historical `/pedido` prefix and their wire
//! payloads are fully Spanish-named.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers::{money_string, option_money_string};
use crate::compute;

/// Lifecycle status of an order. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "en_proceso")]
    Processing,
    #[serde(rename = "cancelado")]
    Canceled,
    #[serde(rename = "entregado")]
    Delivered,
    #[serde(rename = "finalizado")]
    Finalized,
}

/// Dine-in vs takeaway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    #[serde(rename = "mesa")]
    DineIn,
    #[serde(rename = "para_llevar")]
    Takeaway,
}

/// An addition selected on one order line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemAddition {
    pub addition_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct OrderItemAdditionWire {
    pub agregado_id: i64,
    pub nombre: String,
    #[serde(with = "money_string")]
    pub precio: f64,
    pub cantidad: u32,
}

impl From<OrderItemAdditionWire> for OrderItemAddition {
    fn from(wire: OrderItemAdditionWire) -> Self {
        OrderItemAddition {
            addition_id: wire.agregado_id,
            name: wire.nombre,
            price: wire.precio,
            quantity: wire.cantidad,
        }
    }
}

/// One ordered line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    /// Per-line discount amount, when one was granted.
    pub discount: Option<f64>,
    /// Selected additions, in the backend's order.
    pub additions: Vec<OrderItemAddition>,
}

impl OrderItem {
    /// Line total: unit price × quantity plus additions, minus the per-line
    /// discount, never negative.
    pub fn line_total(&self) -> f64 {
        compute::line_total(
            self.unit_price,
            self.quantity,
            &self.additions,
            self.discount,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct OrderItemWire {
    pub producto_id: i64,
    pub nombre: String,
    pub cantidad: u32,
    #[serde(with = "money_string")]
    pub precio_unitario: f64,
    #[serde(default, with = "option_money_string")]
    pub descuento: Option<f64>,
    #[serde(default)]
    pub agregados: Vec<OrderItemAdditionWire>,
}

impl From<OrderItemWire> for OrderItem {
    fn from(wire: OrderItemWire) -> Self {
        OrderItem {
            product_id: wire.producto_id,
            name: wire.nombre,
            quantity: wire.cantidad,
            unit_price: wire.precio_unitario,
            discount: wire.descuento,
            additions: wire.agregados.into_iter().map(Into::into).collect(),
        }
    }
}

/// An order as the dashboard consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub kind: OrderKind,
    pub table_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Sum of line totals.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct OrderWire {
    pub id: i64,
    pub fecha_creacion: DateTime<Utc>,
    pub estado: OrderStatus,
    pub tipo: OrderKind,
    #[serde(default)]
    pub mesa_id: Option<i64>,
    #[serde(default)]
    pub cliente_id: Option<i64>,
    #[serde(default)]
    pub productos: Vec<OrderItemWire>,
}

impl From<OrderWire> for Order {
    fn from(wire: OrderWire) -> Self {
        Order {
            id: wire.id,
            created_at: wire.fecha_creacion,
            status: wire.estado,
            kind: wire.tipo,
            table_id: wire.mesa_id,
            customer_id: wire.cliente_id,
            items: wire.productos.into_iter().map(Into::into).collect(),
        }
    }
}

/// An addition selected on a new or adjusted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderItemAddition {
    #[serde(rename = "agregado_id")]
    pub addition_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// A line to add to an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderItem {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(
        rename = "descuento",
        with = "option_money_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<f64>,
    #[serde(rename = "agregados", skip_serializing_if = "Vec::is_empty")]
    pub additions: Vec<NewOrderItemAddition>,
}

/// An existing line with changed quantity or discount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedOrderItem {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(
        rename = "descuento",
        with = "option_money_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<f64>,
}

/// Payload for creating an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    #[serde(rename = "tipo")]
    pub kind: OrderKind,
    #[serde(rename = "mesa_id", skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    #[serde(rename = "cliente_id", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(rename = "productos")]
    pub items: Vec<NewOrderItem>,
}

/// Batch adjustment applied to an open order in one call: lines added,
/// lines modified and lines removed (by product id).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OrderAdjustment {
    #[serde(rename = "agregar", skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<NewOrderItem>,
    #[serde(rename = "modificar", skip_serializing_if = "Vec::is_empty")]
    pub modified: Vec<UpdatedOrderItem>,
    #[serde(rename = "eliminar", skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_wire_maps_spanish_fields() {
        let wire: OrderWire = serde_json::from_str(
            r#"{
                "id": 31,
                "fecha_creacion": "2026-08-01T17:40:00Z",
                "estado": "en_proceso",
                "tipo": "mesa",
                "mesa_id": 4,
                "productos": [
                    {
                        "producto_id": 9,
                        "nombre": "Completo",
                        "cantidad": 2,
                        "precio_unitario": "3200.00",
                        "descuento": "400",
                        "agregados": [
                            {"agregado_id": 2, "nombre": "Palta", "precio": "800", "cantidad": 2}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let order = Order::from(wire);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.kind, OrderKind::DineIn);
        assert_eq!(order.table_id, Some(4));
        assert_eq!(order.customer_id, None);
        // 3200*2 + 800*2 - 400
        assert_eq!(order.items[0].line_total(), 7600.0);
        assert_eq!(order.subtotal(), 7600.0);
    }

    #[test]
    fn adjustment_serializes_only_populated_sections() {
        let adjustment = OrderAdjustment {
            removed: vec![9],
            ..OrderAdjustment::default()
        };
        let json = serde_json::to_string(&adjustment).unwrap();
        assert_eq!(json, r#"{"eliminar":[9]}"#);
    }

    #[test]
    fn status_round_trips_through_wire_names() {
        for (status, wire) in [
            (OrderStatus::Pending, "\"pendiente\""),
            (OrderStatus::Processing, "\"en_proceso\""),
            (OrderStatus::Canceled, "\"cancelado\""),
            (OrderStatus::Delivered, "\"entregado\""),
            (OrderStatus::Finalized, "\"finalizado\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            assert_eq!(
                serde_json::from_str::<OrderStatus>(wire).unwrap(),
                status
            );
        }
    }
}
