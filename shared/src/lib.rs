//! Shared types for the Slice ordering system
//!
//! Domain types and pure logic used by both the server and clients:
//! the ingredient catalog, pizza selection model, price calculation,
//! order status sequence and the step-by-step pizza builder.

pub mod builder;
pub mod catalog;
pub mod pizza;
pub mod pricing;
pub mod util;

// Re-exports
pub use builder::{BuilderError, BuilderStep, DraftOrder, PizzaBuilder};
pub use catalog::{storage_key, IngredientCategory};
pub use pizza::{OrderStatus, PizzaSelection};
pub use pricing::calculate_price;
pub use serde::{Deserialize, Serialize};
