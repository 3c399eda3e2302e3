//! Expense and expense-type queries and mutations.

use std::future::Future;

use crate::{
    error::{ApiError, ApiResult},
    keys::{QueryKey, Resource},
    model::{Expense, ExpenseType, NewExpense, NewExpenseType, UpdateExpense},
    mutation::{Mutation, MutationEffects},
    query::Query,
    services::ExpenseService,
};

/// Collection query for all expenses.
#[derive(Clone)]
pub struct ExpensesQuery {
    service: ExpenseService,
}

impl ExpensesQuery {
    pub fn new(service: ExpenseService) -> Self {
        Self { service }
    }
}

impl Query for ExpensesQuery {
    type Output = Vec<Expense>;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::collection(Resource::Expenses)
    }

    fn run(&self) -> impl Future<Output = ApiResult<Vec<Expense>>> + Send {
        let service = self.service.clone();
        async move { service.get_all().await }
    }
}

/// Entity query for one expense. Disabled until an id is supplied.
#[derive(Clone)]
pub struct ExpenseQuery {
    service: ExpenseService,
    id: Option<i64>,
}

impl ExpenseQuery {
    pub fn new(service: ExpenseService, id: Option<i64>) -> Self {
        Self { service, id }
    }
}

impl Query for ExpenseQuery {
    type Output = Expense;
    type Error = ApiError;

    fn enabled(&self) -> bool {
        self.id.is_some()
    }

    fn key(&self) -> QueryKey {
        QueryKey::entity(Resource::Expenses, self.id.unwrap_or(0))
    }

    fn run(&self) -> impl Future<Output = ApiResult<Expense>> + Send {
        let service = self.service.clone();
        let id = self.id;
        async move {
            match id {
                Some(id) => service.get_by_id(id).await,
                None => Err(ApiError::Request("expense id missing".to_string())),
            }
        }
    }
}

/// Collection query for the expense-type taxonomy. The taxonomy is
/// effectively static, so it tolerates a long staleness window.
#[derive(Clone)]
pub struct ExpenseTypesQuery {
    service: ExpenseService,
}

impl ExpenseTypesQuery {
    pub fn new(service: ExpenseService) -> Self {
        Self { service }
    }
}

impl Query for ExpenseTypesQuery {
    type Output = Vec<ExpenseType>;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::collection(Resource::ExpenseTypes)
    }

    fn stale_time(&self) -> Option<std::time::Duration> {
        Some(std::time::Duration::from_secs(3600))
    }

    fn run(&self) -> impl Future<Output = ApiResult<Vec<ExpenseType>>> + Send {
        let service = self.service.clone();
        async move { service.get_types().await }
    }
}

/// Record an expense; invalidates the expenses collection.
#[derive(Clone)]
pub struct CreateExpenseMutation {
    service: ExpenseService,
}

impl CreateExpenseMutation {
    pub fn new(service: ExpenseService) -> Self {
        Self { service }
    }
}

impl Mutation<NewExpense> for CreateExpenseMutation {
    type Output = Expense;
    type Error = ApiError;

    fn mutate(&self, input: NewExpense) -> impl Future<Output = ApiResult<Expense>> + Send {
        let service = self.service.clone();
        async move { service.create(&input).await }
    }

    fn effects(&self, _input: &NewExpense, _output: &Expense) -> MutationEffects {
        MutationEffects::created(Resource::Expenses)
    }
}

/// Update an expense. Follows the update rule.
#[derive(Clone)]
pub struct UpdateExpenseMutation {
    service: ExpenseService,
}

impl UpdateExpenseMutation {
    pub fn new(service: ExpenseService) -> Self {
        Self { service }
    }
}

impl Mutation<(i64, UpdateExpense)> for UpdateExpenseMutation {
    type Output = Expense;
    type Error = ApiError;

    fn mutate(&self, input: (i64, UpdateExpense)) -> impl Future<Output = ApiResult<Expense>> + Send {
        let service = self.service.clone();
        async move { service.update(input.0, &input.1).await }
    }

    fn effects(&self, input: &(i64, UpdateExpense), output: &Expense) -> MutationEffects {
        MutationEffects::updated(Resource::Expenses, input.0, output.clone())
    }
}

/// Delete an expense; removes the entity slot and invalidates the
/// collection.
#[derive(Clone)]
pub struct DeleteExpenseMutation {
    service: ExpenseService,
}

impl DeleteExpenseMutation {
    pub fn new(service: ExpenseService) -> Self {
        Self { service }
    }
}

impl Mutation<i64> for DeleteExpenseMutation {
    type Output = ();
    type Error = ApiError;

    fn mutate(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.delete(id).await }
    }

    fn effects(&self, id: &i64, _output: &()) -> MutationEffects {
        MutationEffects::deleted(Resource::Expenses, *id)
    }
}

/// Create an expense type; invalidates the taxonomy collection.
#[derive(Clone)]
pub struct CreateExpenseTypeMutation {
    service: ExpenseService,
}

impl CreateExpenseTypeMutation {
    pub fn new(service: ExpenseService) -> Self {
        Self { service }
    }
}

impl Mutation<NewExpenseType> for CreateExpenseTypeMutation {
    type Output = ExpenseType;
    type Error = ApiError;

    fn mutate(&self, input: NewExpenseType) -> impl Future<Output = ApiResult<ExpenseType>> + Send {
        let service = self.service.clone();
        async move { service.create_type(&input).await }
    }

    fn effects(&self, _input: &NewExpenseType, _output: &ExpenseType) -> MutationEffects {
        MutationEffects::created(Resource::ExpenseTypes)
    }
}

/// Delete an expense type; removes the entity slot and invalidates the
/// taxonomy collection.
#[derive(Clone)]
pub struct DeleteExpenseTypeMutation {
    service: ExpenseService,
}

impl DeleteExpenseTypeMutation {
    pub fn new(service: ExpenseService) -> Self {
        Self { service }
    }
}

impl Mutation<i64> for DeleteExpenseTypeMutation {
    type Output = ();
    type Error = ApiError;

    fn mutate(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.delete_type(id).await }
    }

    fn effects(&self, id: &i64, _output: &()) -> MutationEffects {
        MutationEffects::deleted(Resource::ExpenseTypes, *id)
    }
}
