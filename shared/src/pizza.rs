//! Pizza selection and order status types

use crate::catalog::{storage_key, IngredientCategory};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A customer's ingredient selection
///
/// Base, sauce and cheese are single-valued and mandatory; veggies and
/// meat are optional multi-selects. Field names match the wire format
/// used by existing clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaSelection {
    pub base: String,
    pub sauce: String,
    pub cheese: String,
    #[serde(default)]
    pub veggies: Vec<String>,
    #[serde(default)]
    pub meat: Vec<String>,
}

impl PizzaSelection {
    /// True when every mandatory field is populated
    pub fn is_complete(&self) -> bool {
        !self.base.is_empty() && !self.sauce.is_empty() && !self.cheese.is_empty()
    }

    /// Every (category, storage key) pair consumed by this selection,
    /// one entry per unit ordered.
    pub fn storage_keys(&self) -> Vec<(IngredientCategory, String)> {
        let mut keys = vec![
            (IngredientCategory::Bases, storage_key(&self.base)),
            (IngredientCategory::Sauces, storage_key(&self.sauce)),
            (IngredientCategory::Cheeses, storage_key(&self.cheese)),
        ];
        for veggie in &self.veggies {
            keys.push((IngredientCategory::Veggies, storage_key(veggie)));
        }
        for meat in &self.meat {
            keys.push((IngredientCategory::Meats, storage_key(meat)));
        }
        keys
    }
}

/// Order lifecycle status
///
/// The sequence is fixed: pending → received → kitchen → delivery →
/// completed. `pending` is entered when checkout creates the order;
/// payment verification moves it to `received`; the admin console
/// advances it from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Received,
    Kitchen,
    Delivery,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Received => "received",
            OrderStatus::Kitchen => "kitchen",
            OrderStatus::Delivery => "delivery",
            OrderStatus::Completed => "completed",
        }
    }

    /// The next status in the sequence, or None once completed
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Received),
            OrderStatus::Received => Some(OrderStatus::Kitchen),
            OrderStatus::Kitchen => Some(OrderStatus::Delivery),
            OrderStatus::Delivery => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    /// Forward-only transition check.
    ///
    /// The admin status endpoint deliberately does not enforce this (it
    /// writes whatever status it is given, which allows overrides);
    /// clients that want the strict rule can call this before submitting.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        target > *self
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "received" => Ok(OrderStatus::Received),
            "kitchen" => Ok(OrderStatus::Kitchen),
            "delivery" => Ok(OrderStatus::Delivery),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
