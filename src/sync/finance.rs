//! Financial summary queries.
//!
//! Summaries tolerate five minutes of staleness and refetch on a schedule.
//! The sales subtotal is always considered stale: it refetches on every
//! access and whenever the window regains focus.

use std::{future::Future, time::Duration};

use chrono::NaiveDate;

use crate::{
    error::{ApiError, ApiResult},
    format::format_iso_date,
    keys::{QueryKey, Resource},
    model::{FinanceSummary, SalesSubtotal},
    query::Query,
    services::FinanceService,
};

/// Staleness window for the finance summary cards.
pub const SUMMARY_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// Background refetch interval for the finance summary cards.
pub const SUMMARY_REFETCH_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Background refetch interval for the sales subtotal.
pub const SUBTOTAL_REFETCH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Finance summary scoped to a start date.
#[derive(Clone)]
pub struct FinanceSummaryQuery {
    service: FinanceService,
    start_date: NaiveDate,
}

impl FinanceSummaryQuery {
    pub fn new(service: FinanceService, start_date: NaiveDate) -> Self {
        Self {
            service,
            start_date,
        }
    }
}

impl Query for FinanceSummaryQuery {
    type Output = FinanceSummary;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::scoped(Resource::FinanceSummary, format_iso_date(self.start_date))
    }

    fn stale_time(&self) -> Option<Duration> {
        Some(SUMMARY_STALE_TIME)
    }

    fn refetch_interval(&self) -> Option<Duration> {
        Some(SUMMARY_REFETCH_INTERVAL)
    }

    fn run(&self) -> impl Future<Output = ApiResult<FinanceSummary>> + Send {
        let service = self.service.clone();
        let start_date = self.start_date;
        async move { service.summary(start_date).await }
    }
}

/// Running subtotal of today's sales. Always stale: every access refetches,
/// as does regaining window focus.
#[derive(Clone)]
pub struct SalesSubtotalQuery {
    service: FinanceService,
}

impl SalesSubtotalQuery {
    pub fn new(service: FinanceService) -> Self {
        Self { service }
    }
}

impl Query for SalesSubtotalQuery {
    type Output = SalesSubtotal;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::collection(Resource::SalesSubtotal)
    }

    fn stale_time(&self) -> Option<Duration> {
        Some(Duration::ZERO)
    }

    fn refetch_interval(&self) -> Option<Duration> {
        Some(SUBTOTAL_REFETCH_INTERVAL)
    }

    fn refetch_on_focus(&self) -> bool {
        true
    }

    fn run(&self) -> impl Future<Output = ApiResult<SalesSubtotal>> + Send {
        let service = self.service.clone();
        async move { service.sales_subtotal().await }
    }
}
