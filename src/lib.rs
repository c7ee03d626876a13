//! UpScale - financial literacy in the terminal
//!
//! This library provides the core functionality for the UpScale client. It
//! talks to the UpScale backend for stock data, news and the chat assistant,
//! and runs the budget calculator and the investing course locally.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, paths and the course curriculum
//! - `error`: Custom error types
//! - `models`: Core data models (budget, companies, news, course, chat)
//! - `api`: Backend and identity-provider clients over a pluggable HTTP transport
//! - `services`: Business logic (budget math, stock paging, news filters, course progress)
//! - `charts`: Pure chart data (pie slices, bars, price ranges)
//! - `activity`: Activity log of sessions, sign-ins and failures
//! - `export`: Budget report export (CSV, JSON, YAML)
//! - `display`: Terminal formatting for CLI output
//! - `cli`: Command handlers
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use upscale_cli::config::{load_curriculum, Settings, UpscalePaths};
//!
//! let paths = UpscalePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let curriculum = load_curriculum(&paths)?;
//! ```

pub mod activity;
pub mod api;
pub mod charts;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod tui;

pub use error::{UpscaleError, UpscaleResult};
