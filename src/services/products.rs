//! Product CRUD, addition toggles and inventory movements.

use std::sync::Arc;

use futures::future::try_join_all;
use serde::Serialize;

use crate::{
    endpoint::UrlBuilder,
    error::ApiResult,
    http::ApiClient,
    model::inventory::{InventoryMovement, InventoryMovementWire, NewInventoryMovement},
    model::product::{NewProduct, Product, ProductWire, UpdateProduct},
};

#[derive(Serialize)]
struct ToggleAdditionRequest {
    activo: bool,
}

/// Service for the `/products` and `/inventory` resources.
#[derive(Debug, Clone)]
pub struct ProductService {
    api: Arc<ApiClient>,
}

impl ProductService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Product>> {
        let url = UrlBuilder::named("products.collection")?.build()?;
        let wire: Vec<ProductWire> = self.api.get(&url).await?;
        Ok(wire.into_iter().map(Product::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Product> {
        let url = UrlBuilder::named("products.entity")?
            .path_param("id", id)
            .build()?;
        let wire: ProductWire = self.api.get(&url).await?;
        Ok(Product::from(wire))
    }

    /// Fetch several products concurrently, e.g. to enrich the lines of an
    /// order. Fails on the first error.
    pub async fn get_many(&self, ids: &[i64]) -> ApiResult<Vec<Product>> {
        try_join_all(ids.iter().map(|id| self.get_by_id(*id))).await
    }

    pub async fn create(&self, data: &NewProduct) -> ApiResult<Product> {
        let url = UrlBuilder::named("products.collection")?.build()?;
        let wire: ProductWire = self.api.post(&url, data).await?;
        Ok(Product::from(wire))
    }

    pub async fn update(&self, id: i64, data: &UpdateProduct) -> ApiResult<Product> {
        let url = UrlBuilder::named("products.entity")?
            .path_param("id", id)
            .build()?;
        let wire: ProductWire = self.api.patch(&url, data).await?;
        Ok(Product::from(wire))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let url = UrlBuilder::named("products.entity")?
            .path_param("id", id)
            .build()?;
        self.api.delete(&url).await
    }

    /// Toggle an addition's availability. Returns the updated product.
    pub async fn set_addition_active(
        &self,
        product_id: i64,
        addition_id: i64,
        active: bool,
    ) -> ApiResult<Product> {
        let url = UrlBuilder::named("products.addition")?
            .path_param("id", product_id)
            .path_param("additionId", addition_id)
            .build()?;
        let wire: ProductWire = self
            .api
            .patch(&url, &ToggleAdditionRequest { activo: active })
            .await?;
        Ok(Product::from(wire))
    }

    /// Record a stock entrance or exit with a reason code and an optional
    /// free-text comment.
    pub async fn create_movement(
        &self,
        data: &NewInventoryMovement,
    ) -> ApiResult<InventoryMovement> {
        let url = UrlBuilder::named("inventory.movements")?.build()?;
        let wire: InventoryMovementWire = self.api.post(&url, data).await?;
        Ok(InventoryMovement::from(wire))
    }
}
