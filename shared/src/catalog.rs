//! Ingredient Catalog
//!
//! The five ingredient families and the mapping from display names (what
//! the menu shows) to storage keys (what the inventory records use).
//! The mapping is an explicit table rather than pure string munging so
//! names like "Bell Peppers" resolve to their historical storage key
//! ("peppers") instead of a guessed one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five ingredient families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Bases,
    Sauces,
    Cheeses,
    Veggies,
    Meats,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 5] = [
        IngredientCategory::Bases,
        IngredientCategory::Sauces,
        IngredientCategory::Cheeses,
        IngredientCategory::Veggies,
        IngredientCategory::Meats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Bases => "bases",
            IngredientCategory::Sauces => "sauces",
            IngredientCategory::Cheeses => "cheeses",
            IngredientCategory::Veggies => "veggies",
            IngredientCategory::Meats => "meats",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown ingredient category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for IngredientCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bases" => Ok(IngredientCategory::Bases),
            "sauces" => Ok(IngredientCategory::Sauces),
            "cheeses" => Ok(IngredientCategory::Cheeses),
            "veggies" => Ok(IngredientCategory::Veggies),
            "meats" => Ok(IngredientCategory::Meats),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Display name → storage key table
///
/// Keys match the inventory records that existing deployments already
/// hold, so renames on the menu side must be reflected here.
const STORAGE_KEYS: &[(&str, &str)] = &[
    // Bases
    ("Thin Crust", "thin"),
    ("Thick Crust", "thick"),
    ("Stuffed Crust", "stuffed"),
    ("Whole Wheat", "wholewheat"),
    ("Gluten Free", "glutenfree"),
    // Sauces
    ("Marinara", "marinara"),
    ("BBQ", "bbq"),
    ("Alfredo", "alfredo"),
    ("Pesto", "pesto"),
    ("Buffalo", "buffalo"),
    // Cheeses
    ("Mozzarella", "mozzarella"),
    ("Cheddar", "cheddar"),
    ("Parmesan", "parmesan"),
    ("Feta", "feta"),
    // Veggies
    ("Mushrooms", "mushrooms"),
    ("Bell Peppers", "peppers"),
    ("Onions", "onions"),
    ("Tomatoes", "tomatoes"),
    ("Olives", "olives"),
    ("Spinach", "spinach"),
    ("Jalapeños", "jalapenos"),
    // Meats
    ("Pepperoni", "pepperoni"),
    ("Chicken", "chicken"),
    ("Beef", "beef"),
    ("Sausage", "sausage"),
];

/// Resolve a display name to its inventory storage key.
///
/// Falls back to case-folded, whitespace-stripped form for names not in
/// the table (e.g. ingredients added later through the admin console).
pub fn storage_key(display_name: &str) -> String {
    if let Some((_, key)) = STORAGE_KEYS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(display_name.trim()))
    {
        return (*key).to_string();
    }
    display_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
