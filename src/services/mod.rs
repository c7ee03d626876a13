//! Service layer for UpScale
//!
//! The service layer holds the application logic on top of the models:
//! budget arithmetic, course progress, the stock page controller, news
//! filtering, the chat session and session bootstrap.

pub mod budget;
pub mod chat;
pub mod course;
pub mod news;
pub mod session;
pub mod stocks;

pub use budget::{BudgetCalculator, BudgetReport, BudgetTotals, Guideline};
pub use chat::ChatSession;
pub use course::{Badge, CourseProgress, Quiz, QuizState};
pub use news::NewsFeed;
pub use session::{AuthService, Session};
pub use stocks::{PriceSlot, StockController, StockFeed, StockUpdate, StocksPage, UpdateSink};
