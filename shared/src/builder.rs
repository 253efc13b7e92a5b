//! Pizza Builder
//!
//! Five-step linear selection state machine: base → sauce → cheese →
//! veggies → meat. Steps 1–3 are mandatory single selections; steps 4–5
//! are optional multi-selects with toggle semantics. The builder is pure
//! client-side state; nothing is persisted until checkout takes the
//! draft it produces.

use crate::pizza::PizzaSelection;
use crate::pricing::calculate_price;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five builder steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuilderStep {
    Base,
    Sauce,
    Cheese,
    Veggies,
    Meat,
}

impl BuilderStep {
    /// 1-based step number as shown in the UI
    pub fn number(&self) -> u8 {
        match self {
            BuilderStep::Base => 1,
            BuilderStep::Sauce => 2,
            BuilderStep::Cheese => 3,
            BuilderStep::Veggies => 4,
            BuilderStep::Meat => 5,
        }
    }

    fn next(&self) -> Option<BuilderStep> {
        match self {
            BuilderStep::Base => Some(BuilderStep::Sauce),
            BuilderStep::Sauce => Some(BuilderStep::Cheese),
            BuilderStep::Cheese => Some(BuilderStep::Veggies),
            BuilderStep::Veggies => Some(BuilderStep::Meat),
            BuilderStep::Meat => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    /// The current step's mandatory field is unset
    #[error("Step {0} is incomplete")]
    IncompleteStep(u8),
    /// finish() called before reaching the last step
    #[error("Builder is still on step {0} of 5")]
    NotFinished(u8),
}

/// A priced draft handed off to checkout; not yet persisted anywhere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftOrder {
    pub pizza: PizzaSelection,
    pub total: f64,
}

/// Accumulates an ingredient selection across the five steps
#[derive(Debug, Clone, Default)]
pub struct PizzaBuilder {
    step: BuilderStep,
    selection: PizzaSelection,
}

impl Default for BuilderStep {
    fn default() -> Self {
        BuilderStep::Base
    }
}

impl PizzaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> BuilderStep {
        self.step
    }

    pub fn selection(&self) -> &PizzaSelection {
        &self.selection
    }

    /// Running total for the current selection
    pub fn total(&self) -> f64 {
        calculate_price(&self.selection)
    }

    pub fn select_base(&mut self, base: impl Into<String>) {
        self.selection.base = base.into();
    }

    pub fn select_sauce(&mut self, sauce: impl Into<String>) {
        self.selection.sauce = sauce.into();
    }

    pub fn select_cheese(&mut self, cheese: impl Into<String>) {
        self.selection.cheese = cheese.into();
    }

    /// Add the veggie if absent, remove it if present
    pub fn toggle_veggie(&mut self, veggie: &str) {
        toggle(&mut self.selection.veggies, veggie);
    }

    /// Add the meat if absent, remove it if present
    pub fn toggle_meat(&mut self, meat: &str) {
        toggle(&mut self.selection.meat, meat);
    }

    /// Whether "Next" is allowed from the current step.
    ///
    /// Steps 1–3 require their field to be set; steps 4–5 are always
    /// advanceable (toppings are optional).
    pub fn can_advance(&self) -> bool {
        match self.step {
            BuilderStep::Base => !self.selection.base.is_empty(),
            BuilderStep::Sauce => !self.selection.sauce.is_empty(),
            BuilderStep::Cheese => !self.selection.cheese.is_empty(),
            BuilderStep::Veggies | BuilderStep::Meat => true,
        }
    }

    /// Move to the next step; errors if the current one is incomplete.
    /// Advancing from the last step is a no-op (use [`finish`]).
    ///
    /// [`finish`]: PizzaBuilder::finish
    pub fn advance(&mut self) -> Result<BuilderStep, BuilderError> {
        if !self.can_advance() {
            return Err(BuilderError::IncompleteStep(self.step.number()));
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Terminal action on step 5: hand the priced draft to checkout
    pub fn finish(self) -> Result<DraftOrder, BuilderError> {
        if self.step != BuilderStep::Meat {
            return Err(BuilderError::NotFinished(self.step.number()));
        }
        let total = calculate_price(&self.selection);
        Ok(DraftOrder {
            pizza: self.selection,
            total,
        })
    }
}

fn toggle(items: &mut Vec<String>, item: &str) {
    if let Some(pos) = items.iter().position(|i| i == item) {
        items.remove(pos);
    } else {
        items.push(item.to_string());
    }
}
