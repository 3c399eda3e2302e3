//! Expense and expense-type models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::serde_helpers::money_string;

/// A recorded expense.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub expense_type_id: i64,
    pub recorded_by_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ExpenseWire {
    pub id: i64,
    pub description: String,
    #[serde(with = "money_string")]
    pub amount: f64,
    pub date: NaiveDate,
    pub expense_type_id: i64,
    pub recorded_by_id: i64,
}

impl From<ExpenseWire> for Expense {
    fn from(wire: ExpenseWire) -> Self {
        Expense {
            id: wire.id,
            description: wire.description,
            amount: wire.amount,
            date: wire.date,
            expense_type_id: wire.expense_type_id,
            recorded_by_id: wire.recorded_by_id,
        }
    }
}

/// Payload for recording an expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    #[serde(with = "money_string")]
    pub amount: f64,
    pub date: NaiveDate,
    pub expense_type_id: i64,
}

/// Partial update payload for an expense.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        with = "super::serde_helpers::option_money_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_type_id: Option<i64>,
}

/// A static expense category.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ExpenseTypeWire {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ExpenseTypeWire> for ExpenseType {
    fn from(wire: ExpenseTypeWire) -> Self {
        ExpenseType {
            id: wire.id,
            name: wire.name,
            description: super::serde_helpers::blank_to_none(wire.description),
        }
    }
}

/// Payload for creating an expense type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpenseType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
