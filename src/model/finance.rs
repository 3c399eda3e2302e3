//! Financial summary models for the dashboard cards.

use serde::Deserialize;

use super::serde_helpers::money_string;

/// Totals for the finance dashboard, scoped to a start date.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceSummary {
    pub gross_sales: f64,
    pub expense_total: f64,
    pub net_total: f64,
    pub order_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct FinanceSummaryWire {
    #[serde(with = "money_string")]
    pub gross_sales: f64,
    #[serde(with = "money_string")]
    pub expense_total: f64,
    #[serde(with = "money_string")]
    pub net_total: f64,
    pub order_count: u64,
}

impl From<FinanceSummaryWire> for FinanceSummary {
    fn from(wire: FinanceSummaryWire) -> Self {
        FinanceSummary {
            gross_sales: wire.gross_sales,
            expense_total: wire.expense_total,
            net_total: wire.net_total,
            order_count: wire.order_count,
        }
    }
}

/// Running subtotal of today's sales.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSubtotal {
    pub subtotal: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SalesSubtotalWire {
    #[serde(with = "money_string")]
    pub subtotal: f64,
}

impl From<SalesSubtotalWire> for SalesSubtotal {
    fn from(wire: SalesSubtotalWire) -> Self {
        SalesSubtotal {
            subtotal: wire.subtotal,
        }
    }
}
