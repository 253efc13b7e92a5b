//! Price Calculation
//!
//! Deterministic price function for a pizza selection. Uses rust_decimal
//! internally, stores as f64.

use crate::pizza::PizzaSelection;
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Base pizza price (includes base, sauce and cheese)
const BASE_PRICE: Decimal = Decimal::from_parts(899, 0, 0, false, 2);
/// Per-veggie topping price
const VEGGIE_UNIT_PRICE: Decimal = Decimal::from_parts(150, 0, 0, false, 2);
/// Per-meat topping price
const MEAT_UNIT_PRICE: Decimal = Decimal::from_parts(250, 0, 0, false, 2);

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Price of a selection: base + 1.50 per veggie + 2.50 per meat.
///
/// Pure and deterministic; recomputed on every selection change and again
/// server-side when the order is created.
pub fn calculate_price(selection: &PizzaSelection) -> f64 {
    let veggies = Decimal::from(selection.veggies.len() as i64);
    let meats = Decimal::from(selection.meat.len() as i64);
    to_f64(BASE_PRICE + veggies * VEGGIE_UNIT_PRICE + meats * MEAT_UNIT_PRICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(veggies: &[&str], meat: &[&str]) -> PizzaSelection {
        PizzaSelection {
            base: "Thin Crust".to_string(),
            sauce: "Marinara".to_string(),
            cheese: "Mozzarella".to_string(),
            veggies: veggies.iter().map(|s| s.to_string()).collect(),
            meat: meat.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn plain_pizza_costs_base_price() {
        assert_eq!(calculate_price(&selection(&[], &[])), 8.99);
    }

    #[test]
    fn toppings_add_unit_prices() {
        // 8.99 + 2 * 1.50 + 1 * 2.50
        assert_eq!(
            calculate_price(&selection(&["Mushrooms", "Onions"], &["Pepperoni"])),
            14.99
        );
        // 8.99 + 7 * 1.50 + 4 * 2.50
        assert_eq!(
            calculate_price(&selection(
                &["Mushrooms", "Bell Peppers", "Onions", "Tomatoes", "Olives", "Spinach", "Jalapeños"],
                &["Pepperoni", "Chicken", "Beef", "Sausage"],
            )),
            29.49
        );
    }

    #[test]
    fn price_is_deterministic() {
        let sel = selection(&["Olives"], &["Chicken", "Beef"]);
        let first = calculate_price(&sel);
        for _ in 0..10 {
            assert_eq!(calculate_price(&sel), first);
        }
    }
}
