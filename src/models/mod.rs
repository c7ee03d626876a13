//! Core data models for UpScale
//!
//! This module contains the data structures shared by every surface: money,
//! the budget form, companies and price bars, the course curriculum, news
//! articles, chat messages and session credentials.

pub mod budget;
pub mod chat;
pub mod company;
pub mod course;
pub mod money;
pub mod news;
pub mod session;

pub use budget::{
    default_reference_ranges, BudgetCategory, BudgetForm, BudgetGroup, RangeBand, RangeVerdict,
    ReferenceRanges,
};
pub use chat::{ChatMessage, Sender};
pub use company::{format_price, ChartImage, Company, FrameInterval, FramePeriod, PriceBar};
pub use course::{
    CourseDetails, Curriculum, LeaderboardEntry, Lesson, LessonId, LessonKind, QuizQuestion,
    Unit, LEADERBOARD,
};
pub use money::Money;
pub use news::{Article, ArticleSource, NewsCategory};
pub use session::{IdentityUser, SessionToken};
