//! Order operations, including the batch adjustment and status changes.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    endpoint::UrlBuilder,
    error::ApiResult,
    http::ApiClient,
    model::order::{NewOrder, Order, OrderAdjustment, OrderStatus, OrderWire},
};

#[derive(Serialize)]
struct SetStatusRequest {
    estado: OrderStatus,
}

/// Service for the `/pedido` resource.
#[derive(Debug, Clone)]
pub struct OrderService {
    api: Arc<ApiClient>,
}

impl OrderService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Order>> {
        let url = UrlBuilder::named("orders.collection")?.build()?;
        let wire: Vec<OrderWire> = self.api.get(&url).await?;
        Ok(wire.into_iter().map(Order::from).collect())
    }

    /// Open orders only, for the floor view.
    pub async fn get_open(&self) -> ApiResult<Vec<Order>> {
        let url = UrlBuilder::named("orders.collection")?
            .query_param(
                "estado",
                vec!["pendiente".to_string(), "en_proceso".to_string()],
            )
            .build()?;
        let wire: Vec<OrderWire> = self.api.get(&url).await?;
        Ok(wire.into_iter().map(Order::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Order> {
        let url = UrlBuilder::named("orders.entity")?
            .path_param("id", id)
            .build()?;
        let wire: OrderWire = self.api.get(&url).await?;
        Ok(Order::from(wire))
    }

    /// Entity read with line items expanded, cached under the detail key.
    pub async fn get_detail(&self, id: i64) -> ApiResult<Order> {
        let url = UrlBuilder::named("orders.entity")?
            .path_param("id", id)
            .query_param("expand", "productos")
            .build()?;
        let wire: OrderWire = self.api.get(&url).await?;
        Ok(Order::from(wire))
    }

    pub async fn create(&self, data: &NewOrder) -> ApiResult<Order> {
        let url = UrlBuilder::named("orders.collection")?.build()?;
        let wire: OrderWire = self.api.post(&url, data).await?;
        Ok(Order::from(wire))
    }

    /// Apply a batch of added/modified/removed line items in one call.
    pub async fn adjust(&self, id: i64, adjustment: &OrderAdjustment) -> ApiResult<Order> {
        let url = UrlBuilder::named("orders.adjust")?
            .path_param("id", id)
            .build()?;
        let wire: OrderWire = self.api.post(&url, adjustment).await?;
        Ok(Order::from(wire))
    }

    pub async fn set_status(&self, id: i64, status: OrderStatus) -> ApiResult<Order> {
        let url = UrlBuilder::named("orders.status")?
            .path_param("id", id)
            .build()?;
        let wire: OrderWire = self
            .api
            .patch(&url, &SetStatusRequest { estado: status })
            .await?;
        Ok(Order::from(wire))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let url = UrlBuilder::named("orders.entity")?
            .path_param("id", id)
            .build()?;
        self.api.delete(&url).await
    }
}
