//! Table queries and mutations.

use std::future::Future;

use crate::{
    error::{ApiError, ApiResult},
    keys::{QueryKey, Resource},
    model::{NewTable, Table, UpdateTable},
    mutation::{Mutation, MutationEffects},
    query::Query,
    services::TableService,
};

/// Collection query for all tables.
#[derive(Clone)]
pub struct TablesQuery {
    service: TableService,
}

impl TablesQuery {
    pub fn new(service: TableService) -> Self {
        Self { service }
    }
}

impl Query for TablesQuery {
    type Output = Vec<Table>;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::collection(Resource::Tables)
    }

    fn run(&self) -> impl Future<Output = ApiResult<Vec<Table>>> + Send {
        let service = self.service.clone();
        async move { service.get_all().await }
    }
}

/// Entity query for one table. Disabled until an id is supplied.
#[derive(Clone)]
pub struct TableQuery {
    service: TableService,
    id: Option<i64>,
}

impl TableQuery {
    pub fn new(service: TableService, id: Option<i64>) -> Self {
        Self { service, id }
    }
}

impl Query for TableQuery {
    type Output = Table;
    type Error = ApiError;

    fn enabled(&self) -> bool {
        self.id.is_some()
    }

    fn key(&self) -> QueryKey {
        QueryKey::entity(Resource::Tables, self.id.unwrap_or(0))
    }

    fn run(&self) -> impl Future<Output = ApiResult<Table>> + Send {
        let service = self.service.clone();
        let id = self.id;
        async move {
            match id {
                Some(id) => service.get_by_id(id).await,
                None => Err(ApiError::Request("table id missing".to_string())),
            }
        }
    }
}

/// Create a table; invalidates the tables collection.
#[derive(Clone)]
pub struct CreateTableMutation {
    service: TableService,
}

impl CreateTableMutation {
    pub fn new(service: TableService) -> Self {
        Self { service }
    }
}

impl Mutation<NewTable> for CreateTableMutation {
    type Output = Table;
    type Error = ApiError;

    fn mutate(&self, input: NewTable) -> impl Future<Output = ApiResult<Table>> + Send {
        let service = self.service.clone();
        async move { service.create(&input).await }
    }

    fn effects(&self, _input: &NewTable, _output: &Table) -> MutationEffects {
        MutationEffects::created(Resource::Tables)
    }
}

/// Update a table (rename, toggle active/occupied). Follows the update rule.
#[derive(Clone)]
pub struct UpdateTableMutation {
    service: TableService,
}

impl UpdateTableMutation {
    pub fn new(service: TableService) -> Self {
        Self { service }
    }
}

impl Mutation<(i64, UpdateTable)> for UpdateTableMutation {
    type Output = Table;
    type Error = ApiError;

    fn mutate(&self, input: (i64, UpdateTable)) -> impl Future<Output = ApiResult<Table>> + Send {
        let service = self.service.clone();
        async move { service.update(input.0, &input.1).await }
    }

    fn effects(&self, input: &(i64, UpdateTable), output: &Table) -> MutationEffects {
        MutationEffects::updated(Resource::Tables, input.0, output.clone())
    }
}

/// Delete a table; removes the entity slot and invalidates the collection.
#[derive(Clone)]
pub struct DeleteTableMutation {
    service: TableService,
}

impl DeleteTableMutation {
    pub fn new(service: TableService) -> Self {
        Self { service }
    }
}

impl Mutation<i64> for DeleteTableMutation {
    type Output = ();
    type Error = ApiError;

    fn mutate(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.delete(id).await }
    }

    fn effects(&self, id: &i64, _output: &()) -> MutationEffects {
        MutationEffects::deleted(Resource::Tables, *id)
    }
}
