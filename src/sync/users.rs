//! System user and POS staff queries and mutations.

use std::future::Future;

use crate::{
    error::{ApiError, ApiResult},
    keys::{QueryKey, Resource},
    model::{Employee, NewEmployee, NewUser, UpdateUser, User},
    mutation::{Mutation, MutationEffects},
    query::Query,
    services::UserService,
};

/// Collection query for all system users.
#[derive(Clone)]
pub struct UsersQuery {
    service: UserService,
}

impl UsersQuery {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

impl Query for UsersQuery {
    type Output = Vec<User>;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::collection(Resource::Users)
    }

    fn run(&self) -> impl Future<Output = ApiResult<Vec<User>>> + Send {
        let service = self.service.clone();
        async move { service.get_all().await }
    }
}

/// Entity query for one system user. Disabled until an id is supplied.
#[derive(Clone)]
pub struct UserQuery {
    service: UserService,
    id: Option<i64>,
}

impl UserQuery {
    pub fn new(service: UserService, id: Option<i64>) -> Self {
        Self { service, id }
    }
}

impl Query for UserQuery {
    type Output = User;
    type Error = ApiError;

    fn enabled(&self) -> bool {
        self.id.is_some()
    }

    fn key(&self) -> QueryKey {
        QueryKey::entity(Resource::Users, self.id.unwrap_or(0))
    }

    fn run(&self) -> impl Future<Output = ApiResult<User>> + Send {
        let service = self.service.clone();
        let id = self.id;
        async move {
            match id {
                Some(id) => service.get_by_id(id).await,
                None => Err(ApiError::Request("user id missing".to_string())),
            }
        }
    }
}

/// Collection query for POS staff.
#[derive(Clone)]
pub struct EmployeesQuery {
    service: UserService,
}

impl EmployeesQuery {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

impl Query for EmployeesQuery {
    type Output = Vec<Employee>;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::collection(Resource::Employees)
    }

    fn run(&self) -> impl Future<Output = ApiResult<Vec<Employee>>> + Send {
        let service = self.service.clone();
        async move { service.get_employees().await }
    }
}

/// Create a system user; invalidates the users collection.
#[derive(Clone)]
pub struct CreateUserMutation {
    service: UserService,
}

impl CreateUserMutation {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

impl Mutation<NewUser> for CreateUserMutation {
    type Output = User;
    type Error = ApiError;

    fn mutate(&self, input: NewUser) -> impl Future<Output = ApiResult<User>> + Send {
        let service = self.service.clone();
        async move { service.create(&input).await }
    }

    fn effects(&self, _input: &NewUser, _output: &User) -> MutationEffects {
        MutationEffects::created(Resource::Users)
    }
}

/// Update a system user. Follows the update rule.
#[derive(Clone)]
pub struct UpdateUserMutation {
    service: UserService,
}

impl UpdateUserMutation {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

impl Mutation<(i64, UpdateUser)> for UpdateUserMutation {
    type Output = User;
    type Error = ApiError;

    fn mutate(&self, input: (i64, UpdateUser)) -> impl Future<Output = ApiResult<User>> + Send {
        let service = self.service.clone();
        async move { service.update(input.0, &input.1).await }
    }

    fn effects(&self, input: &(i64, UpdateUser), output: &User) -> MutationEffects {
        MutationEffects::updated(Resource::Users, input.0, output.clone())
    }
}

/// Delete a system user; removes the entity slot and invalidates the
/// collection.
#[derive(Clone)]
pub struct DeleteUserMutation {
    service: UserService,
}

impl DeleteUserMutation {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

impl Mutation<i64> for DeleteUserMutation {
    type Output = ();
    type Error = ApiError;

    fn mutate(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.delete(id).await }
    }

    fn effects(&self, id: &i64, _output: &()) -> MutationEffects {
        MutationEffects::deleted(Resource::Users, *id)
    }
}

/// Create a POS staff member; invalidates the employees collection.
#[derive(Clone)]
pub struct CreateEmployeeMutation {
    service: UserService,
}

impl CreateEmployeeMutation {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

impl Mutation<NewEmployee> for CreateEmployeeMutation {
    type Output = Employee;
    type Error = ApiError;

    fn mutate(&self, input: NewEmployee) -> impl Future<Output = ApiResult<Employee>> + Send {
        let service = self.service.clone();
        async move { service.create_employee(&input).await }
    }

    fn effects(&self, _input: &NewEmployee, _output: &Employee) -> MutationEffects {
        MutationEffects::created(Resource::Employees)
    }
}
