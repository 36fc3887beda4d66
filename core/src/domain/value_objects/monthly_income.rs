//! Per-month income totals for a host's year.

use serde::{Deserialize, Serialize};

pub const MONTHS_IN_YEAR: usize = 12;

/// Twelve income buckets, January through December
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlyIncome {
    buckets: [f64; MONTHS_IN_YEAR],
}

impl MonthlyIncome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the bucket of `month` (1 = January). Out of range months are ignored.
    pub fn add(&mut self, month: u32, amount: f64) {
        if let Some(bucket) = Self::index(month).and_then(|i| self.buckets.get_mut(i)) {
            *bucket += amount;
        }
    }

    /// Income for `month` (1 = January), zero when out of range
    pub fn get(&self, month: u32) -> f64 {
        Self::index(month)
            .and_then(|i| self.buckets.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.buckets.iter().sum()
    }

    pub fn as_array(&self) -> &[f64; MONTHS_IN_YEAR] {
        &self.buckets
    }

    /// `(month, income)` pairs with 1-based months
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, amount)| (i as u32 + 1, *amount))
    }

    fn index(month: u32) -> Option<usize> {
        (1..=MONTHS_IN_YEAR as u32)
            .contains(&month)
            .then(|| month as usize - 1)
    }
}
