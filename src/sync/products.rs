//! Product queries and mutations, including inventory movements.

use std::future::Future;

use crate::{
    error::{ApiError, ApiResult},
    keys::{QueryKey, Resource},
    model::{InventoryMovement, NewInventoryMovement, NewProduct, Product, UpdateProduct},
    mutation::{Mutation, MutationEffects},
    query::Query,
    services::ProductService,
};

/// Collection query for all products.
#[derive(Clone)]
pub struct ProductsQuery {
    service: ProductService,
}

impl ProductsQuery {
    pub fn new(service: ProductService) -> Self {
        Self { service }
    }
}

impl Query for ProductsQuery {
    type Output = Vec<Product>;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        QueryKey::collection(Resource::Products)
    }

    fn run(&self) -> impl Future<Output = ApiResult<Vec<Product>>> + Send {
        let service = self.service.clone();
        async move { service.get_all().await }
    }
}

/// Entity query for one product. Disabled until an id is supplied.
#[derive(Clone)]
pub struct ProductQuery {
    service: ProductService,
    id: Option<i64>,
}

impl ProductQuery {
    pub fn new(service: ProductService, id: Option<i64>) -> Self {
        Self { service, id }
    }
}

impl Query for ProductQuery {
    type Output = Product;
    type Error = ApiError;

    fn enabled(&self) -> bool {
        self.id.is_some()
    }

    fn key(&self) -> QueryKey {
        QueryKey::entity(Resource::Products, self.id.unwrap_or(0))
    }

    fn run(&self) -> impl Future<Output = ApiResult<Product>> + Send {
        let service = self.service.clone();
        let id = self.id;
        async move {
            match id {
                Some(id) => service.get_by_id(id).await,
                None => Err(ApiError::Request("product id missing".to_string())),
            }
        }
    }
}

/// Create a product; invalidates the products collection.
#[derive(Clone)]
pub struct CreateProductMutation {
    service: ProductService,
}

impl CreateProductMutation {
    pub fn new(service: ProductService) -> Self {
        Self { service }
    }
}

impl Mutation<NewProduct> for CreateProductMutation {
    type Output = Product;
    type Error = ApiError;

    fn mutate(&self, input: NewProduct) -> impl Future<Output = ApiResult<Product>> + Send {
        let service = self.service.clone();
        async move { service.create(&input).await }
    }

    fn effects(&self, _input: &NewProduct, _output: &Product) -> MutationEffects {
        MutationEffects::created(Resource::Products)
    }
}

/// Update a product; writes the entity slot and invalidates the collection.
#[derive(Clone)]
pub struct UpdateProductMutation {
    service: ProductService,
}

impl UpdateProductMutation {
    pub fn new(service: ProductService) -> Self {
        Self { service }
    }
}

impl Mutation<(i64, UpdateProduct)> for UpdateProductMutation {
    type Output = Product;
    type Error = ApiError;

    fn mutate(
        &self,
        input: (i64, UpdateProduct),
    ) -> impl Future<Output = ApiResult<Product>> + Send {
        let service = self.service.clone();
        async move { service.update(input.0, &input.1).await }
    }

    fn effects(&self, input: &(i64, UpdateProduct), output: &Product) -> MutationEffects {
        MutationEffects::updated(Resource::Products, input.0, output.clone())
    }
}

/// Delete a product; removes the entity slot and invalidates the collection.
#[derive(Clone)]
pub struct DeleteProductMutation {
    service: ProductService,
}

impl DeleteProductMutation {
    pub fn new(service: ProductService) -> Self {
        Self { service }
    }
}

impl Mutation<i64> for DeleteProductMutation {
    type Output = ();
    type Error = ApiError;

    fn mutate(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.delete(id).await }
    }

    fn effects(&self, id: &i64, _output: &()) -> MutationEffects {
        MutationEffects::deleted(Resource::Products, *id)
    }
}

/// Toggle an addition's availability on a product. A status change, so it
/// follows the update rule.
#[derive(Clone)]
pub struct ToggleAdditionMutation {
    service: ProductService,
}

impl ToggleAdditionMutation {
    pub fn new(service: ProductService) -> Self {
        Self { service }
    }
}

/// (product id, addition id, active)
pub type ToggleAdditionInput = (i64, i64, bool);

impl Mutation<ToggleAdditionInput> for ToggleAdditionMutation {
    type Output = Product;
    type Error = ApiError;

    fn mutate(&self, input: ToggleAdditionInput) -> impl Future<Output = ApiResult<Product>> + Send {
        let service = self.service.clone();
        async move { service.set_addition_active(input.0, input.1, input.2).await }
    }

    fn effects(&self, input: &ToggleAdditionInput, output: &Product) -> MutationEffects {
        MutationEffects::updated(Resource::Products, input.0, output.clone())
    }
}

/// Record a stock entrance or exit. The movement changes the product's stock
/// server-side, so both the product entity and the collection refetch.
#[derive(Clone)]
pub struct CreateMovementMutation {
    service: ProductService,
}

impl CreateMovementMutation {
    pub fn new(service: ProductService) -> Self {
        Self { service }
    }
}

impl Mutation<NewInventoryMovement> for CreateMovementMutation {
    type Output = InventoryMovement;
    type Error = ApiError;

    fn mutate(
        &self,
        input: NewInventoryMovement,
    ) -> impl Future<Output = ApiResult<InventoryMovement>> + Send {
        let service = self.service.clone();
        async move { service.create_movement(&input).await }
    }

    fn effects(
        &self,
        input: &NewInventoryMovement,
        _output: &InventoryMovement,
    ) -> MutationEffects {
        MutationEffects::none()
            .and_invalidate(QueryKey::collection(Resource::Products))
            .and_invalidate(QueryKey::entity(Resource::Products, input.product_id))
    }
}
