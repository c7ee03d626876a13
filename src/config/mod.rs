//! Configuration module for UpScale
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - The course curriculum, loaded once at startup

pub mod curriculum;
pub mod paths;
pub mod settings;

pub use curriculum::load_curriculum;
pub use paths::UpscalePaths;
pub use settings::{BudgetStyle, Settings};
