//! Interaction mix and the pure selection function.

use serde::{Deserialize, Serialize};

/// Upper bound of the value drawn for each iteration.
pub const DRAW_RANGE: f64 = 100.0;

/// The three mutually exclusive interaction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// New stock acquisition: add a batch of previously unseen entries.
    RareInventory,
    /// Stock replenishment: add copies to the least-stocked entries.
    FrequentInventory,
    /// Customer purchase of sampled editor picks.
    FrequentCustomer,
}

impl Interaction {
    /// Whether this interaction is counted as a customer interaction.
    pub fn is_customer(self) -> bool {
        matches!(self, Interaction::FrequentCustomer)
    }
}

impl std::fmt::Display for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interaction::RareInventory => write!(f, "rare-inventory"),
            Interaction::FrequentInventory => write!(f, "frequent-inventory"),
            Interaction::FrequentCustomer => write!(f, "frequent-customer"),
        }
    }
}

/// Percentages of the two inventory interactions; customer interactions
/// take the remainder up to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionMix {
    /// Percentage of iterations running [`Interaction::RareInventory`]
    pub rare_inventory_percent: f64,
    /// Percentage of iterations running [`Interaction::FrequentInventory`]
    pub frequent_inventory_percent: f64,
}

impl Default for InteractionMix {
    fn default() -> Self {
        Self {
            rare_inventory_percent: 10.0,
            frequent_inventory_percent: 30.0,
        }
    }
}

impl InteractionMix {
    /// Create a mix from the two inventory percentages.
    pub fn new(rare_inventory_percent: f64, frequent_inventory_percent: f64) -> Self {
        Self {
            rare_inventory_percent,
            frequent_inventory_percent,
        }
    }

    /// A mix that only ever selects customer interactions.
    pub fn customer_only() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Percentage of iterations running customer interactions.
    pub fn customer_percent(&self) -> f64 {
        DRAW_RANGE - self.rare_inventory_percent - self.frequent_inventory_percent
    }

    /// Check that both percentages are finite, non-negative and sum to at most 100.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("rare_inventory_percent", self.rare_inventory_percent),
            ("frequent_inventory_percent", self.frequent_inventory_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }

        let sum = self.rare_inventory_percent + self.frequent_inventory_percent;
        if sum > DRAW_RANGE {
            return Err(format!(
                "inventory interaction percentages sum to {sum}, which exceeds {DRAW_RANGE}"
            ));
        }
        Ok(())
    }

    /// Ordered `(upper bound, interaction)` table of cumulative thresholds.
    ///
    /// The last bound is `f64::INFINITY` so every draw falls into some row.
    pub fn threshold_table(&self) -> [(f64, Interaction); 3] {
        let rare_bound = self.rare_inventory_percent;
        let frequent_bound = rare_bound + self.frequent_inventory_percent;
        [
            (rare_bound, Interaction::RareInventory),
            (frequent_bound, Interaction::FrequentInventory),
            (f64::INFINITY, Interaction::FrequentCustomer),
        ]
    }

    /// Select the interaction for a value drawn from `[0, 100)`.
    pub fn select(&self, draw: f64) -> Interaction {
        select_interaction(&self.threshold_table(), draw)
    }
}

/// Pick the first row of `table` whose upper bound is strictly above `draw`.
///
/// Falls back to [`Interaction::FrequentCustomer`] when no bound matches.
pub fn select_interaction(table: &[(f64, Interaction)], draw: f64) -> Interaction {
    table
        .iter()
        .find(|(upper, _)| draw < *upper)
        .map(|(_, interaction)| *interaction)
        .unwrap_or(Interaction::FrequentCustomer)
}
