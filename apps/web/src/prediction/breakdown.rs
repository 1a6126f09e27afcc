//! Illustrative salary breakdown.
//!
//! These are fixed heuristic amounts shown next to the estimate. They are NOT
//! derived from the model and do not sum to its prediction.

use serde::Serialize;

use crate::encoding::FeatureVector;

pub const BASE_SALARY: u64 = 30_000;
pub const EXPERIENCE_BONUS_PER_YEAR: u64 = 2_000;
pub const EDUCATION_BONUS: [u64; 4] = [0, 5_000, 10_000, 15_000];
pub const ROLE_BONUS: [u64; 5] = [0, 5_000, 10_000, 15_000, 20_000];
pub const LOCATION_BONUS: [u64; 5] = [0, 10_000, 8_000, 12_000, 5_000];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownComponent {
    pub label: &'static str,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryBreakdown {
    pub components: Vec<BreakdownComponent>,
}

impl SalaryBreakdown {
    pub fn from_features(features: &FeatureVector) -> Self {
        let component = |label, amount| BreakdownComponent { label, amount };
        Self {
            components: vec![
                component("Base", BASE_SALARY),
                component(
                    "Experience",
                    u64::from(features.experience()) * EXPERIENCE_BONUS_PER_YEAR,
                ),
                component("Education", lookup(&EDUCATION_BONUS, features.education_code())),
                component("Role", lookup(&ROLE_BONUS, features.role_code())),
                component("Location", lookup(&LOCATION_BONUS, features.location_code())),
            ],
        }
    }

    #[cfg(test)]
    pub fn amounts(&self) -> Vec<u64> {
        self.components.iter().map(|c| c.amount).collect()
    }

    pub fn max_amount(&self) -> u64 {
        self.components.iter().map(|c| c.amount).max().unwrap_or(0)
    }
}

// Encoder codes are always in range; anything else contributes nothing.
fn lookup(table: &[u64], code: usize) -> u64 {
    table.get(code).copied().unwrap_or(0)
}
