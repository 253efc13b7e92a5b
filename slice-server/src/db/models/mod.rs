//! Database models
//!
//! Typed records as stored in SurrealDB plus the API view structs
//! returned to clients (record ids flattened to strings, camelCase
//! field names for wire compatibility).

pub mod inventory;
pub mod order;
pub mod user;

pub use inventory::{InventoryRecord, InventoryView};
pub use order::{OrderCreate, OrderRecord, OrderView};
pub use user::{UserCreate, UserRecord};
