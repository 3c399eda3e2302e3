//! Order queries and mutations.
//!
//! Order adjustments move stock, so besides the standard update rule they
//! also invalidate the order's detail slot and the products collection.

use std::future::Future;

use crate::{
    error::{ApiError, ApiResult},
    keys::{QueryKey, Resource},
    model::{NewOrder, Order, OrderAdjustment, OrderStatus},
    mutation::{Mutation, MutationEffects},
    query::Query,
    services::OrderService,
};

/// Collection query for all orders.
#[derive(Clone)]
pub struct OrdersQuery {
    service: OrderService,
}

impl OrdersQuery {
    pub fn new(service: OrderService) -> Self {
        Self { service }
    }
}

impl Query for OrdersQuery {
    type Output = Vec<Order>;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::collection(Resource::Orders)
    }

    fn run(&self) -> impl Future<Output = ApiResult<Vec<Order>>> + Send {
        let service = self.service.clone();
        async move { service.get_all().await }
    }
}

/// Scoped collection query for open (pending/processing) orders.
#[derive(Clone)]
pub struct OpenOrdersQuery {
    service: OrderService,
}

impl OpenOrdersQuery {
    pub fn new(service: OrderService) -> Self {
        Self { service }
    }
}

impl Query for OpenOrdersQuery {
    type Output = Vec<Order>;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::scoped(Resource::Orders, "open")
    }

    fn run(&self) -> impl Future<Output = ApiResult<Vec<Order>>> + Send {
        let service = self.service.clone();
        async move { service.get_open().await }
    }
}

/// Entity query for one order. Disabled until an id is supplied.
#[derive(Clone)]
pub struct OrderQuery {
    service: OrderService,
    id: Option<i64>,
}

impl OrderQuery {
    pub fn new(service: OrderService, id: Option<i64>) -> Self {
        Self { service, id }
    }
}

impl Query for OrderQuery {
    type Output = Order;
    type Error = ApiError;

    fn enabled(&self) -> bool {
        self.id.is_some()
    }

    fn key(&self) -> QueryKey {
        QueryKey::entity(Resource::Orders, self.id.unwrap_or(0))
    }

    fn run(&self) -> impl Future<Output = ApiResult<Order>> + Send {
        let service = self.service.clone();
        let id = self.id;
        async move {
            match id {
                Some(id) => service.get_by_id(id).await,
                None => Err(ApiError::Request("order id missing".to_string())),
            }
        }
    }
}

/// Detail query for one order with expanded line items; cached separately
/// from the plain entity read.
#[derive(Clone)]
pub struct OrderDetailQuery {
    service: OrderService,
    id: Option<i64>,
}

impl OrderDetailQuery {
    pub fn new(service: OrderService, id: Option<i64>) -> Self {
        Self { service, id }
    }
}

impl Query for OrderDetailQuery {
    type Output = Order;
    type Error = ApiError;

    fn enabled(&self) -> bool {
        self.id.is_some()
    }

    fn key(&self) -> QueryKey {
        QueryKey::detail(Resource::Orders, self.id.unwrap_or(0))
    }

    fn run(&self) -> impl Future<Output = ApiResult<Order>> + Send {
        let service = self.service.clone();
        let id = self.id;
        async move {
            match id {
                Some(id) => service.get_detail(id).await,
                None => Err(ApiError::Request("order id missing".to_string())),
            }
        }
    }
}

/// Create an order; invalidates the orders collection and the open-orders
/// scope.
#[derive(Clone)]
pub struct CreateOrderMutation {
    service: OrderService,
}

impl CreateOrderMutation {
    pub fn new(service: OrderService) -> Self {
        Self { service }
    }
}

impl Mutation<NewOrder> for CreateOrderMutation {
    type Output = Order;
    type Error = ApiError;

    fn mutate(&self, input: NewOrder) -> impl Future<Output = ApiResult<Order>> + Send {
        let service = self.service.clone();
        async move { service.create(&input).await }
    }

    fn effects(&self, _input: &NewOrder, _output: &Order) -> MutationEffects {
        MutationEffects::created(Resource::Orders)
            .and_invalidate(QueryKey::scoped(Resource::Orders, "open"))
    }
}

/// Apply a batch of added/modified/removed line items in one call.
#[derive(Clone)]
pub struct AdjustOrderMutation {
    service: OrderService,
}

impl AdjustOrderMutation {
    pub fn new(service: OrderService) -> Self {
        Self { service }
    }
}

impl Mutation<(i64, OrderAdjustment)> for AdjustOrderMutation {
    type Output = Order;
    type Error = ApiError;

    fn mutate(
        &self,
        input: (i64, OrderAdjustment),
    ) -> impl Future<Output = ApiResult<Order>> + Send {
        let service = self.service.clone();
        async move { service.adjust(input.0, &input.1).await }
    }

    fn effects(&self, input: &(i64, OrderAdjustment), output: &Order) -> MutationEffects {
        // line items moved stock, so product lists must refetch too
        MutationEffects::updated(Resource::Orders, input.0, output.clone())
            .and_invalidate(QueryKey::detail(Resource::Orders, input.0))
            .and_invalidate(QueryKey::scoped(Resource::Orders, "open"))
            .and_invalidate(QueryKey::collection(Resource::Products))
    }
}

/// Change an order's status. Follows the update rule.
#[derive(Clone)]
pub struct SetOrderStatusMutation {
    service: OrderService,
}

impl SetOrderStatusMutation {
    pub fn new(service: OrderService) -> Self {
        Self { service }
    }
}

impl Mutation<(i64, OrderStatus)> for SetOrderStatusMutation {
    type Output = Order;
    type Error = ApiError;

    fn mutate(&self, input: (i64, OrderStatus)) -> impl Future<Output = ApiResult<Order>> + Send {
        let service = self.service.clone();
        async move { service.set_status(input.0, input.1).await }
    }

    fn effects(&self, input: &(i64, OrderStatus), output: &Order) -> MutationEffects {
        MutationEffects::updated(Resource::Orders, input.0, output.clone())
            .and_invalidate(QueryKey::detail(Resource::Orders, input.0))
            .and_invalidate(QueryKey::scoped(Resource::Orders, "open"))
    }
}

/// Delete an order; removes its entity and detail slots and invalidates the
/// collection.
#[derive(Clone)]
pub struct DeleteOrderMutation {
    service: OrderService,
}

impl DeleteOrderMutation {
    pub fn new(service: OrderService) -> Self {
        Self { service }
    }
}

impl Mutation<i64> for DeleteOrderMutation {
    type Output = ();
    type Error = ApiError;

    fn mutate(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.delete(id).await }
    }

    fn effects(&self, id: &i64, _output: &()) -> MutationEffects {
        MutationEffects::deleted(Resource::Orders, *id)
            .and_remove(QueryKey::detail(Resource::Orders, *id))
            .and_invalidate(QueryKey::scoped(Resource::Orders, "open"))
    }
}
