//! Chart geometry
//!
//! Pure functions from numbers to proportions. Rendering lives in `tui` and
//! `display`; nothing here knows about terminals.

pub mod bar;
pub mod pie;

pub use bar::{bar_heights, range_bars, text_bar, RangeBar, RangeBarGeometry, MIN_BAR_PERCENT};
pub use pie::{donut_slices, DonutSlice};
