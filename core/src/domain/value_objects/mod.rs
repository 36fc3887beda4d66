//! Value objects produced by domain services.

pub mod monthly_income;

pub use monthly_income::{MonthlyIncome, MONTHS_IN_YEAR};
