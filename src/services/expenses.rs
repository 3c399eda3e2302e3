//! Expense and expense-type CRUD.

use std::sync::Arc;

use crate::{
    endpoint::UrlBuilder,
    error::ApiResult,
    http::ApiClient,
    model::expense::{
        Expense, ExpenseType, ExpenseTypeWire, ExpenseWire, NewExpense, NewExpenseType,
        UpdateExpense,
    },
};

/// Service for the `/expenses` and `/expense-types` resources.
#[derive(Debug, Clone)]
pub struct ExpenseService {
    api: Arc<ApiClient>,
}

impl ExpenseService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Expense>> {
        let url = UrlBuilder::named("expenses.collection")?.build()?;
        let wire: Vec<ExpenseWire> = self.api.get(&url).await?;
        Ok(wire.into_iter().map(Expense::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Expense> {
        let url = UrlBuilder::named("expenses.entity")?
            .path_param("id", id)
            .build()?;
        let wire: ExpenseWire = self.api.get(&url).await?;
        Ok(Expense::from(wire))
    }

    pub async fn create(&self, data: &NewExpense) -> ApiResult<Expense> {
        let url = UrlBuilder::named("expenses.collection")?.build()?;
        let wire: ExpenseWire = self.api.post(&url, data).await?;
        Ok(Expense::from(wire))
    }

    pub async fn update(&self, id: i64, data: &UpdateExpense) -> ApiResult<Expense> {
        let url = UrlBuilder::named("expenses.entity")?
            .path_param("id", id)
            .build()?;
        let wire: ExpenseWire = self.api.patch(&url, data).await?;
        Ok(Expense::from(wire))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let url = UrlBuilder::named("expenses.entity")?
            .path_param("id", id)
            .build()?;
        self.api.delete(&url).await
    }

    pub async fn get_types(&self) -> ApiResult<Vec<ExpenseType>> {
        let url = UrlBuilder::named("expense-types.collection")?.build()?;
        let wire: Vec<ExpenseTypeWire> = self.api.get(&url).await?;
        Ok(wire.into_iter().map(ExpenseType::from).collect())
    }

    pub async fn create_type(&self, data: &NewExpenseType) -> ApiResult<ExpenseType> {
        let url = UrlBuilder::named("expense-types.collection")?.build()?;
        let wire: ExpenseTypeWire = self.api.post(&url, data).await?;
        Ok(ExpenseType::from(wire))
    }

    pub async fn delete_type(&self, id: i64) -> ApiResult<()> {
        let url = UrlBuilder::named("expense-types.entity")?
            .path_param("id", id)
            .build()?;
        self.api.delete(&url).await
    }
}
