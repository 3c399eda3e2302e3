//! Client (customer) CRUD.

use std::sync::Arc;

use crate::{
    endpoint::UrlBuilder,
    error::ApiResult,
    http::ApiClient,
    model::client::{Client, ClientWire, NewClient, UpdateClient},
};

/// Service for the `/clients` resource.
#[derive(Debug, Clone)]
pub struct ClientService {
    api: Arc<ApiClient>,
}

impl ClientService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Client>> {
        let url = UrlBuilder::named("clients.collection")?.build()?;
        let wire: Vec<ClientWire> = self.api.get(&url).await?;
        Ok(wire.into_iter().map(Client::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Client> {
        let url = UrlBuilder::named("clients.entity")?
            .path_param("id", id)
            .build()?;
        let wire: ClientWire = self.api.get(&url).await?;
        Ok(Client::from(wire))
    }

    pub async fn create(&self, data: &NewClient) -> ApiResult<Client> {
        let url = UrlBuilder::named("clients.collection")?.build()?;
        let wire: ClientWire = self.api.post(&url, data).await?;
        Ok(Client::from(wire))
    }

    pub async fn update(&self, id: i64, data: &UpdateClient) -> ApiResult<Client> {
        let url = UrlBuilder::named("clients.entity")?
            .path_param("id", id)
            .build()?;
        let wire: ClientWire = self.api.patch(&url, data).await?;
        Ok(Client::from(wire))
    }

    /// Deactivate a client. Clients are never hard-deleted; the backend flips
    /// the active flag.
    pub async fn deactivate(&self, id: i64) -> ApiResult<Client> {
        self.update(
            id,
            &UpdateClient {
                is_active: Some(false),
                ..UpdateClient::default()
            },
        )
        .await
    }
}
