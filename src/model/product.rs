//! Product and addition models.

use serde::{Deserialize, Serialize};

use super::serde_helpers::{default_true, money_string};

/// An optional extra that can be attached to a product on an order line.
#[derive(Debug, Clone, PartialEq)]
pub struct Addition {
    pub id: i64,
    pub name: String,
    pub extra_price: f64,
    pub is_active: bool,
}

/// Wire shape of an addition. The backend names these fields in Spanish.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AdditionWire {
    pub id: i64,
    pub nombre: String,
    #[serde(with = "money_string")]
    pub precio: f64,
    #[serde(default = "default_true")]
    pub activo: bool,
}

impl From<AdditionWire> for Addition {
    fn from(wire: AdditionWire) -> Self {
        Addition {
            id: wire.id,
            name: wire.nombre,
            extra_price: wire.precio,
            is_active: wire.activo,
        }
    }
}

/// A sellable product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Backend stock count; `None` when the backend reports no figure.
    pub stock: Option<i64>,
    pub manages_inventory: bool,
    pub is_active: bool,
    pub category_id: Option<i64>,
    /// Available additions, in the backend's order.
    pub additions: Vec<Addition>,
}

impl Product {
    /// Effective stock for UI purposes: the backend value when inventory
    /// tracking is enabled and a figure exists, otherwise unbounded (`None`).
    pub fn effective_stock(&self) -> Option<i64> {
        if self.manages_inventory { self.stock } else { None }
    }
}

/// Wire shape of a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ProductWire {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "money_string")]
    pub price: f64,
    #[serde(default)]
    pub stock: Option<i64>,
    pub manages_inventory: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Additions keep their Spanish wire name and arrive in backend order.
    #[serde(default)]
    pub agregados: Vec<AdditionWire>,
}

impl From<ProductWire> for Product {
    fn from(wire: ProductWire) -> Self {
        Product {
            id: wire.id,
            name: wire.name,
            description: super::serde_helpers::blank_to_none(wire.description),
            price: wire.price,
            stock: wire.stock,
            manages_inventory: wire.manages_inventory,
            is_active: wire.is_active,
            category_id: wire.category_id,
            additions: wire.agregados.into_iter().map(Addition::from).collect(),
        }
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "money_string")]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    pub manages_inventory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

/// Partial update payload for a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "super::serde_helpers::option_money_string", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manages_inventory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(manages: bool, stock: Option<i64>, active: bool) -> Product {
        Product {
            id: 1,
            name: "Barros Luco".to_string(),
            description: None,
            price: 6500.0,
            stock,
            manages_inventory: manages,
            is_active: active,
            category_id: None,
            additions: Vec::new(),
        }
    }

    #[test]
    fn untracked_products_have_unbounded_stock() {
        assert_eq!(product(false, Some(3), true).effective_stock(), None);
        assert_eq!(product(true, Some(3), true).effective_stock(), Some(3));
        assert_eq!(product(true, None, true).effective_stock(), None);
    }

    #[test]
    fn wire_price_string_parses_and_additions_keep_order() {
        let wire: ProductWire = serde_json::from_str(
            r#"{
                "id": 9,
                "name": "Completo",
                "price": "3200.00",
                "managesInventory": true,
                "stock": 12,
                "agregados": [
                    {"id": 2, "nombre": "Palta", "precio": "800", "activo": true},
                    {"id": 1, "nombre": "Tomate", "precio": "500", "activo": false}
                ]
            }"#,
        )
        .unwrap();
        let product = Product::from(wire);
        assert_eq!(product.price, 3200.0);
        let names: Vec<_> = product.additions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Palta", "Tomate"]);
        assert!(!product.additions[1].is_active);
    }

    #[test]
    fn bad_wire_price_is_nan() {
        let wire: ProductWire = serde_json::from_str(
            r#"{"id": 9, "name": "Completo", "price": "??", "managesInventory": false}"#,
        )
        .unwrap();
        assert!(Product::from(wire).price.is_nan());
    }
}
