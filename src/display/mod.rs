//! Display formatting for terminal output
//!
//! Plain-text and table rendering of budget reports, stock pages, news
//! cards and course progress for the CLI.

pub mod budget;
pub mod course;
pub mod market;
pub mod text;

pub use budget::{
    format_budget_charts, format_budget_report, format_range_chart, format_reference_ranges,
};
pub use course::{
    format_course_details, format_leaderboard, format_lesson, format_progress, format_units,
};
pub use market::{format_article, format_articles, format_company_page, format_price_history, format_quote};
