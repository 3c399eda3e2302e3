//! Client queries and mutations.

use std::future::Future;

use crate::{
    error::{ApiError, ApiResult},
    keys::{QueryKey, Resource},
    model::{Client, NewClient, UpdateClient},
    mutation::{Mutation, MutationEffects},
    query::Query,
    services::ClientService,
};

/// Collection query for all clients.
#[derive(Clone)]
pub struct ClientsQuery {
    service: ClientService,
}

impl ClientsQuery {
    pub fn new(service: ClientService) -> Self {
        Self { service }
    }
}

impl Query for ClientsQuery {
    type Output = Vec<Client>;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::collection(Resource::Clients)
    }

    fn run(&self) -> impl Future<Output = ApiResult<Vec<Client>>> + Send {
        let service = self.service.clone();
        async move { service.get_all().await }
    }
}

/// Entity query for one client. Disabled until an id is supplied.
#[derive(Clone)]
pub struct ClientQuery {
    service: ClientService,
    id: Option<i64>,
}

impl ClientQuery {
    pub fn new(service: ClientService, id: Option<i64>) -> Self {
        Self { service, id }
    }
}

impl Query for ClientQuery {
    type Output = Client;
    type Error = ApiError;

    fn enabled(&self) -> bool {
        self.id.is_some()
    }

    fn key(&self) -> QueryKey {
        QueryKey::entity(Resource::Clients, self.id.unwrap_or(0))
    }

    fn run(&self) -> impl Future<Output = ApiResult<Client>> + Send {
        let service = self.service.clone();
        let id = self.id;
        async move {
            match id {
                Some(id) => service.get_by_id(id).await,
                None => Err(ApiError::Request("client id missing".to_string())),
            }
        }
    }
}

/// Create a client; invalidates the clients collection.
#[derive(Clone)]
pub struct CreateClientMutation {
    service: ClientService,
}

impl CreateClientMutation {
    pub fn new(service: ClientService) -> Self {
        Self { service }
    }
}

impl Mutation<NewClient> for CreateClientMutation {
    type Output = Client;
    type Error = ApiError;

    fn mutate(&self, input: NewClient) -> impl Future<Output = ApiResult<Client>> + Send {
        let service = self.service.clone();
        async move { service.create(&input).await }
    }

    fn effects(&self, _input: &NewClient, _output: &Client) -> MutationEffects {
        MutationEffects::created(Resource::Clients)
    }
}

/// Update a client; writes the entity slot and invalidates the collection.
#[derive(Clone)]
pub struct UpdateClientMutation {
    service: ClientService,
}

impl UpdateClientMutation {
    pub fn new(service: ClientService) -> Self {
        Self { service }
    }
}

impl Mutation<(i64, UpdateClient)> for UpdateClientMutation {
    type Output = Client;
    type Error = ApiError;

    fn mutate(&self, input: (i64, UpdateClient)) -> impl Future<Output = ApiResult<Client>> + Send {
        let service = self.service.clone();
        async move { service.update(input.0, &input.1).await }
    }

    fn effects(&self, input: &(i64, UpdateClient), output: &Client) -> MutationEffects {
        MutationEffects::updated(Resource::Clients, input.0, output.clone())
    }
}

/// Deactivate a client (clients are never hard-deleted). Follows the update
/// rule.
#[derive(Clone)]
pub struct DeactivateClientMutation {
    service: ClientService,
}

impl DeactivateClientMutation {
    pub fn new(service: ClientService) -> Self {
        Self { service }
    }
}

impl Mutation<i64> for DeactivateClientMutation {
    type Output = Client;
    type Error = ApiError;

    fn mutate(&self, id: i64) -> impl Future<Output = ApiResult<Client>> + Send {
        let service = self.service.clone();
        async move { service.deactivate(id).await }
    }

    fn effects(&self, id: &i64, output: &Client) -> MutationEffects {
        MutationEffects::updated(Resource::Clients, *id, output.clone())
    }
}
