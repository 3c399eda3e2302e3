//! Resource services: thin compositions of transport calls and wire
//! transforms.
//!
//! Each service maps domain operations (list, get, create, update, delete,
//! plus resource-specific actions) onto [`ApiClient`](crate::http::ApiClient)
//! requests and converts wire payloads to and from the application-level
//! shapes in [`crate::model`]. Transforms are deterministic and total; money
//! strings that fail to parse surface as `NaN`, never as silent zeros.

pub mod clients;
pub mod expenses;
pub mod finance;
pub mod orders;
pub mod products;
pub mod tables;
pub mod users;

pub use clients::ClientService;
pub use expenses::ExpenseService;
pub use finance::FinanceService;
pub use orders::OrderService;
pub use products::ProductService;
pub use tables::TableService;
pub use users::UserService;
