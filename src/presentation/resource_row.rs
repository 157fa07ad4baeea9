//! Row renderer for allocation candidates.
//!
//! Pure function from a [`ResourceWithLoadRatios`] to the data a list widget
//! needs: the name cell, an availability bar, and the overtime cell.

use serde::Serialize;

use crate::domain::models::ResourceWithLoadRatios;

/// Availability below this is shown as low.
pub const AVAILABILITY_INTERMEDIATE: f64 = 0.25;
/// Availability at or above this is shown as good.
pub const AVAILABILITY_GOOD: f64 = 0.50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityTier {
    Low,
    Medium,
    Good,
}

impl AvailabilityTier {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio < AVAILABILITY_INTERMEDIATE {
            Self::Low
        } else if ratio < AVAILABILITY_GOOD {
            Self::Medium
        } else {
            Self::Good
        }
    }

    /// Bar fill colour.
    pub fn rgba(self) -> &'static str {
        match self {
            Self::Low => "rgba(150,0,0,0.3)",
            Self::Medium => "rgba(255,255,0,0.5)",
            Self::Good => "rgba(102,204,0,0.3)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Good => "good",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityBar {
    /// Fill width in percent, clamped to 0..=100.
    pub width_percent: f64,
    /// Unclamped percentage text, e.g. `"37.50%"`.
    pub label: String,
    pub tier: AvailabilityTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OvertimeCell {
    /// Value at two decimals.
    pub text: String,
    /// Set when the value is not zero at two decimals.
    pub negative_marker: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRow {
    pub name: String,
    pub availability: AvailabilityBar,
    pub overtime: OvertimeCell,
}

/// Rounds to hundredths, half away from zero, as an integer count.
fn hundredths(value: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let rounded = (value * 100.0).round() as i64;
    rounded
}

fn two_decimals(value: f64) -> String {
    let h = hundredths(value);
    let sign = if h < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, h.abs() / 100, h.abs() % 100)
}

pub fn availability_bar(ratio: f64) -> AvailabilityBar {
    let percent = ratio * 100.0;
    AvailabilityBar {
        width_percent: percent.clamp(0.0, 100.0),
        label: format!("{}%", two_decimals(percent)),
        tier: AvailabilityTier::for_ratio(ratio),
    }
}

pub fn overtime_cell(overtime: f64) -> OvertimeCell {
    OvertimeCell {
        text: two_decimals(overtime),
        negative_marker: hundredths(overtime) != 0,
    }
}

pub fn render_resource_row(row: &ResourceWithLoadRatios) -> ResourceRow {
    ResourceRow {
        name: row.resource.short_description(),
        availability: availability_bar(row.ratios.availability),
        overtime: overtime_cell(row.ratios.overtime),
    }
}
