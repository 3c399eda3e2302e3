#![doc = include_str!("../README.md")]

// Core modules
pub mod cache;
pub mod compute;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod global;
pub mod http;
pub mod keys;
mod log_utils;
pub mod model;
pub mod mutation;
pub mod query;
pub mod refresh;
pub mod runtime;
pub mod services;
pub mod state;
pub mod sync;
pub mod types;
pub mod validate;

// Re-export commonly used items at crate root for convenience
pub use global::init;
pub use runtime::{RuntimeConfig, SyncRuntime};

pub mod prelude {
    //! The prelude exports the most common types and functions for using
    //! comanda-sync.

    // Runtime and its global initializer
    pub use crate::global::{init, runtime};
    pub use crate::runtime::{RuntimeConfig, SyncRuntime, SyncRuntimeHandles};

    // The query/mutation traits and their state enums
    pub use crate::mutation::{Mutation, MutationEffects, MutationState, run_mutation};
    pub use crate::query::Query;
    pub use crate::state::{AsyncState, QueryState};

    // Cache and keys for manual cache management
    pub use crate::cache::QueryCache;
    pub use crate::keys::{QueryKey, Resource};
    pub use crate::refresh::RefreshRegistry;

    // Transport and configuration
    pub use crate::config::{ApiEnvironment, REQUEST_TIMEOUT};
    pub use crate::endpoint::UrlBuilder;
    pub use crate::http::ApiClient;

    // Error types
    pub use crate::error::{ApiError, ApiResult, ErrorDetail, ValidationError};

    // Domain model
    pub use crate::model::{
        Addition, Client, Employee, Expense, ExpenseType, FinanceSummary, InventoryMovement,
        MovementKind, MovementReason, NewClient, NewExpense, NewInventoryMovement, NewOrder,
        NewOrderItem, NewProduct, NewTable, NewUser, Order, OrderAdjustment, OrderItem,
        OrderKind, OrderStatus, Product, SalesSubtotal, StaffRole, SystemRole, Table, User,
    };

    // Derived-value computations and formatting
    pub use crate::compute::{
        DiscountMode, StockStatus, discount_amount, line_total, order_total, stock_status,
    };
    pub use crate::format::{format_currency, format_iso_date, parse_currency, today};
}
