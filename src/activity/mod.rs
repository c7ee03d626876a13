//! Activity logging for UpScale
//!
//! Sessions, sign-ins, lesson completions, exports and every failed request
//! are appended to a line-delimited JSON log (JSONL). The TUI never prints;
//! this log is where its failures end up besides the status bar.
//!
//! ```rust,ignore
//! use upscale_cli::activity::{ActivityKind, ActivityLog};
//!
//! let log = ActivityLog::new(paths.activity_log());
//! log.record(ActivityKind::LessonCompleted, "bull-bear", None);
//! ```

mod entry;
mod logger;

pub use entry::{ActivityEntry, ActivityKind};
pub use logger::ActivityLog;

use crate::config::{Settings, UpscalePaths};

/// The log configured by the user's settings
pub fn open_activity_log(paths: &UpscalePaths, settings: &Settings) -> ActivityLog {
    if settings.activity_log {
        ActivityLog::new(paths.activity_log())
    } else {
        ActivityLog::disabled(paths.activity_log())
    }
}
