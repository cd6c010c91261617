//! Grouped totals, percentages, and pie slices.

use std::collections::BTreeMap;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Chart colours assigned to pie slices by rank.
pub const PALETTE: [&str; 6] = [
    "#8b5cf6", "#06b6d4", "#10b981", "#f59e0b", "#ef4444", "#6366f1",
];

/// Group label used for blank category values.
pub const UNKNOWN: &str = "Unknown";

/// Returns the trimmed label, or `"Unknown"` when it is blank.
#[must_use]
pub fn group_label(label: &str) -> &str {
    let label = label.trim();
    if label.is_empty() { UNKNOWN } else { label }
}

/// Rounds half away from zero to `dp` decimal places.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `part / total * 100` rounded to 2 places, or zero when `total` is zero.
#[must_use]
pub fn percentage_of(part: Decimal, total: Decimal) -> Decimal {
    ratio_percent(part, total, 2)
}

/// Returns `part / total * 100` rounded to `dp` places, or zero when `total` is zero.
#[must_use]
pub fn ratio_percent(part: Decimal, total: Decimal, dp: u32) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    let ratio = part
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(total))
        .or_else(|| {
            part.checked_div(total)
                .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or(if part.is_sign_negative() == total.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        });
    round_half_up(ratio, dp)
}

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSlice {
    /// Category label.
    pub name: String,
    /// Category total.
    pub value: Decimal,
    /// Share of the dimension total, 0-100.
    pub percentage: Decimal,
    /// Palette colour by rank.
    pub color: String,
}

/// Totals grouped by a category label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown {
    groups: BTreeMap<String, Decimal>,
}

impl Breakdown {
    /// Creates an empty breakdown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the group `label`; blank labels group under `"Unknown"`.
    pub fn add(&mut self, label: &str, value: Decimal) {
        let group = self
            .groups
            .entry(group_label(label).to_string())
            .or_default();
        *group = group.saturating_add(value);
    }

    /// Counts one occurrence of `label`.
    pub fn increment(&mut self, label: &str) {
        self.add(label, Decimal::ONE);
    }

    /// Sum of every group.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.groups
            .values()
            .fold(Decimal::ZERO, |sum, value| sum.saturating_add(*value))
    }

    /// Total for one group, zero when absent.
    #[must_use]
    pub fn get(&self, label: &str) -> Decimal {
        self.groups.get(label).copied().unwrap_or_default()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if nothing was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group totals keyed by label.
    #[must_use]
    pub fn totals(&self) -> BTreeMap<String, Decimal> {
        self.groups.clone()
    }

    /// Group totals as whole counts.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<String, u64> {
        self.groups
            .iter()
            .map(|(label, value)| (label.clone(), value.to_u64().unwrap_or_default()))
            .collect()
    }

    /// Percentage share of each group, 2 decimal places.
    #[must_use]
    pub fn percentages(&self) -> BTreeMap<String, Decimal> {
        let total = self.total();
        self.groups
            .iter()
            .map(|(label, value)| (label.clone(), percentage_of(*value, total)))
            .collect()
    }

    /// Percentage share of each group as a one-decimal string, such as `"45.0"`.
    #[must_use]
    pub fn percentage_labels(&self) -> BTreeMap<String, String> {
        let total = self.total();
        self.groups
            .iter()
            .map(|(label, value)| {
                let share = ratio_percent(*value, total, 1);
                (label.clone(), format!("{share:.1}"))
            })
            .collect()
    }

    /// Groups sorted by total descending, ties by label.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, Decimal)> {
        let mut ranked: Vec<(&str, Decimal)> = self
            .groups
            .iter()
            .map(|(label, value)| (label.as_str(), *value))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Pie slices in rank order, coloured by rank.
    #[must_use]
    pub fn pie_slices(&self) -> Vec<PieSlice> {
        let total = self.total();
        self.ranked()
            .into_iter()
            .zip(PALETTE.iter().cycle())
            .map(|((label, value), color)| PieSlice {
                name: label.to_string(),
                value,
                percentage: percentage_of(value, total),
                color: (*color).to_string(),
            })
            .collect()
    }
}
