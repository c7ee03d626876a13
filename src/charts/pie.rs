//! Donut chart geometry

use std::f64::consts::{FRAC_PI_2, TAU};

/// One slice of a donut chart; angles in radians
#[derive(Debug, Clone, PartialEq)]
pub struct DonutSlice {
    pub label: String,
    pub value: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl DonutSlice {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }

    /// Share of the whole, in percent
    pub fn percent(&self) -> f64 {
        self.sweep / TAU * 100.0
    }

    /// Whether `angle` falls inside the slice, for any winding of `angle`
    pub fn contains_angle(&self, angle: f64) -> bool {
        if self.sweep <= 0.0 {
            return false;
        }
        let offset = (angle - self.start_angle).rem_euclid(TAU);
        offset < self.sweep
    }
}

/// Slices starting at the top and running clockwise in screen space.
///
/// A zero total yields no slices, which renders as the empty state.
pub fn donut_slices<S: AsRef<str>>(data: &[(S, f64)]) -> Vec<DonutSlice> {
    let total: f64 = data
        .iter()
        .map(|(_, v)| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = -FRAC_PI_2;
    data.iter()
        .map(|(label, value)| {
            let value = if value.is_finite() && *value > 0.0 { *value } else { 0.0 };
            let sweep = value / total * TAU;
            let slice = DonutSlice {
                label: label.as_ref().to_string(),
                value,
                start_angle: angle,
                sweep,
            };
            angle += sweep;
            slice
        })
        .collect()
}
