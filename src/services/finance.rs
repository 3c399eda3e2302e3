//! Financial summary reads.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    endpoint::UrlBuilder,
    error::ApiResult,
    format::format_iso_date,
    http::ApiClient,
    model::finance::{FinanceSummary, FinanceSummaryWire, SalesSubtotal, SalesSubtotalWire},
};

/// Service for `/finance/summary` and `/ventas/subtotal`.
#[derive(Debug, Clone)]
pub struct FinanceService {
    api: Arc<ApiClient>,
}

impl FinanceService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Totals since `start_date` (inclusive), for the dashboard cards.
    pub async fn summary(&self, start_date: NaiveDate) -> ApiResult<FinanceSummary> {
        let url = UrlBuilder::named("finance.summary")?
            .query_param("fecha_inicio", format_iso_date(start_date))
            .build()?;
        let wire: FinanceSummaryWire = self.api.get(&url).await?;
        Ok(FinanceSummary::from(wire))
    }

    /// Running subtotal of today's sales.
    pub async fn sales_subtotal(&self) -> ApiResult<SalesSubtotal> {
        let url = UrlBuilder::named("sales.subtotal")?.build()?;
        let wire: SalesSubtotalWire = self.api.get(&url).await?;
        Ok(SalesSubtotal::from(wire))
    }
}
