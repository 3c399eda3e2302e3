//! Application-level domain entities and their wire representations.
//!
//! The backend is the system of record; this layer holds transient,
//! invalidatable copies. Wire structs (`*Wire`, `*Request`) mirror the REST
//! payloads exactly — including the backend's habit of transmitting money as
//! strings and its mixed Spanish/English field naming — and are converted at
//! the service boundary into the application-level shapes the dashboard
//! consumes. Response payload structs reject unknown fields so schema drift
//! surfaces as a decode error instead of silent data loss.

pub mod client;
pub mod expense;
pub mod finance;
pub mod inventory;
pub mod order;
pub mod product;
pub mod serde_helpers;
pub mod table;
pub mod user;

pub use client::{Client, NewClient, UpdateClient};
pub use expense::{Expense, ExpenseType, NewExpense, NewExpenseType, UpdateExpense};
pub use finance::{FinanceSummary, SalesSubtotal};
pub use inventory::{InventoryMovement, MovementKind, MovementReason, NewInventoryMovement};
pub use order::{
    NewOrder, NewOrderItem, NewOrderItemAddition, Order, OrderAdjustment, OrderItem,
    OrderItemAddition, OrderKind, OrderStatus, UpdatedOrderItem,
};
pub use product::{Addition, NewProduct, Product, UpdateProduct};
pub use table::{NewTable, Table, UpdateTable};
pub use user::{Employee, NewEmployee, NewUser, StaffRole, SystemRole, UpdateUser, User};
