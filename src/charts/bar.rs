//! Bar chart geometry

/// Smallest height a non-zero bar is drawn at, in percent
pub const MIN_BAR_PERCENT: f64 = 2.0;

fn scale_of(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| v.is_finite()).fold(1.0, f64::max)
}

fn height(value: f64, scale: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        0.0
    } else {
        (value / scale * 100.0).max(MIN_BAR_PERCENT)
    }
}

/// Height of each bar as a percent of the tallest (scale never below 1)
pub fn bar_heights(values: &[f64]) -> Vec<f64> {
    let scale = scale_of(values.iter().copied());
    values.iter().map(|v| height(*v, scale)).collect()
}

/// One row of a range comparison chart: a reference band and the user's value
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBar {
    pub label: String,
    pub min: f64,
    /// Width of the band above `min`, never negative
    pub band: f64,
    pub user: f64,
}

impl RangeBar {
    pub fn new(label: impl Into<String>, min: f64, max: f64, user: f64) -> Self {
        Self {
            label: label.into(),
            min,
            band: (max - min).max(0.0),
            user,
        }
    }

    pub fn range_max(&self) -> f64 {
        self.min + self.band
    }
}

/// Drawn proportions of a [`RangeBar`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBarGeometry {
    /// Height of the reference bar (0 to `range_max`), percent
    pub range_height: f64,
    /// Share of the reference bar covered by the band, percent
    pub band_share: f64,
    /// Height of the user's bar, percent
    pub user_height: f64,
}

/// Geometry for every row, all scaled against the largest row
pub fn range_bars(rows: &[RangeBar]) -> Vec<RangeBarGeometry> {
    let scale = scale_of(rows.iter().map(|r| r.range_max().max(r.user)));

    rows.iter()
        .map(|row| {
            let range_max = row.range_max();
            RangeBarGeometry {
                range_height: height(range_max, scale),
                band_share: if row.band > 0.0 && range_max > 0.0 {
                    row.band / range_max * 100.0
                } else {
                    0.0
                },
                user_height: height(row.user, scale),
            }
        })
        .collect()
}

/// Horizontal bar of `width` cells for a percent height
pub fn text_bar(percent: f64, width: usize) -> String {
    if percent <= 0.0 || width == 0 {
        return String::new();
    }
    let cells = ((percent.min(100.0) / 100.0) * width as f64).round().max(1.0) as usize;
    "█".repeat(cells.min(width))
}
