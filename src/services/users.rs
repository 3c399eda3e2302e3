//! System user and POS staff CRUD.

use std::sync::Arc;

use crate::{
    endpoint::UrlBuilder,
    error::ApiResult,
    http::ApiClient,
    model::user::{
        Employee, EmployeeWire, NewEmployee, NewUser, UpdateUser, User, UserWire,
    },
};

/// Service for the `/users` and `/employees` resources.
#[derive(Debug, Clone)]
pub struct UserService {
    api: Arc<ApiClient>,
}

impl UserService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> ApiResult<Vec<User>> {
        let url = UrlBuilder::named("users.collection")?.build()?;
        let wire: Vec<UserWire> = self.api.get(&url).await?;
        Ok(wire.into_iter().map(User::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<User> {
        let url = UrlBuilder::named("users.entity")?
            .path_param("id", id)
            .build()?;
        let wire: UserWire = self.api.get(&url).await?;
        Ok(User::from(wire))
    }

    pub async fn create(&self, data: &NewUser) -> ApiResult<User> {
        let url = UrlBuilder::named("users.collection")?.build()?;
        let wire: UserWire = self.api.post(&url, data).await?;
        Ok(User::from(wire))
    }

    pub async fn update(&self, id: i64, data: &UpdateUser) -> ApiResult<User> {
        let url = UrlBuilder::named("users.entity")?
            .path_param("id", id)
            .build()?;
        let wire: UserWire = self.api.patch(&url, data).await?;
        Ok(User::from(wire))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let url = UrlBuilder::named("users.entity")?
            .path_param("id", id)
            .build()?;
        self.api.delete(&url).await
    }

    pub async fn get_employees(&self) -> ApiResult<Vec<Employee>> {
        let url = UrlBuilder::named("employees.collection")?.build()?;
        let wire: Vec<EmployeeWire> = self.api.get(&url).await?;
        Ok(wire.into_iter().map(Employee::from).collect())
    }

    pub async fn create_employee(&self, data: &NewEmployee) -> ApiResult<Employee> {
        let url = UrlBuilder::named("employees.collection")?.build()?;
        let wire: EmployeeWire = self.api.post(&url, data).await?;
        Ok(Employee::from(wire))
    }
}
