//! Per-resource query and mutation definitions.
//!
//! This is the layer the dashboard's screens consume: each resource gets
//! collection/entity queries keyed per [`crate::keys`] and mutations whose
//! [`MutationEffects`](crate::mutation::MutationEffects) encode the standard
//! cache rules — create invalidates the collection, update writes the entity
//! slot and invalidates the collection, delete removes the entity slot and
//! invalidates the collection.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use comanda_sync::prelude::*;
//! use comanda_sync::services::ClientService;
//! use comanda_sync::sync::clients::{ClientsQuery, CreateClientMutation};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Arc::new(ApiClient::from_environment(ApiEnvironment::Development)?);
//! let service = ClientService::new(api);
//! let runtime = SyncRuntime::with_defaults();
//!
//! let clients = runtime.fetch(&ClientsQuery::new(service.clone())).await;
//! let created = runtime
//!     .mutate(
//!         &CreateClientMutation::new(service),
//!         NewClient {
//!             name: "Ana Rojas".to_string(),
//!             email: None,
//!             phone: None,
//!         },
//!     )
//!     .await;
//! # let _ = (clients, created);
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod expenses;
pub mod finance;
pub mod orders;
pub mod products;
pub mod tables;
pub mod users;
