//! Dining table CRUD.

use std::sync::Arc;

use crate::{
    endpoint::UrlBuilder,
    error::ApiResult,
    http::ApiClient,
    model::table::{NewTable, Table, TableWire, UpdateTable},
};

/// Service for the `/tables` resource.
#[derive(Debug, Clone)]
pub struct TableService {
    api: Arc<ApiClient>,
}

impl TableService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Table>> {
        let url = UrlBuilder::named("tables.collection")?.build()?;
        let wire: Vec<TableWire> = self.api.get(&url).await?;
        Ok(wire.into_iter().map(Table::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Table> {
        let url = UrlBuilder::named("tables.entity")?
            .path_param("id", id)
            .build()?;
        let wire: TableWire = self.api.get(&url).await?;
        Ok(Table::from(wire))
    }

    pub async fn create(&self, data: &NewTable) -> ApiResult<Table> {
        let url = UrlBuilder::named("tables.collection")?.build()?;
        let wire: TableWire = self.api.post(&url, data).await?;
        Ok(Table::from(wire))
    }

    pub async fn update(&self, id: i64, data: &UpdateTable) -> ApiResult<Table> {
        let url = UrlBuilder::named("tables.entity")?
            .path_param("id", id)
            .build()?;
        let wire: TableWire = self.api.patch(&url, data).await?;
        Ok(Table::from(wire))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let url = UrlBuilder::named("tables.entity")?
            .path_param("id", id)
            .build()?;
        self.api.delete(&url).await
    }
}
