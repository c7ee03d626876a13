//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Network work is spawned onto the runtime handle; results come back as
//! [`Event`]s through the same channel as key presses.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;

use crate::activity::{ActivityKind, ActivityLog};
use crate::api::{BackendClient, FirebaseIdentity, HttpClient};
use crate::config::{BudgetStyle, Settings};
use crate::error::UpscaleResult;
use crate::models::{
    Article, BudgetCategory, BudgetForm, Curriculum, IdentityUser, LessonId,
};
use crate::services::course::LessonToggle;
use crate::services::{
    AuthService, BudgetCalculator, BudgetReport, ChatSession, CourseProgress, NewsFeed, Quiz,
    QuizState, Session, StockController, StockFeed, UpdateSink,
};

use super::dialogs::login::{LoginMode, LoginState};
use super::event::Event;
use super::widgets::TextInput;

/// How long a status message stays visible
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Home,
    Budget,
    Stocks,
    News,
    Learn,
    Chat,
}

impl ActiveView {
    pub const ALL: [ActiveView; 6] = [
        Self::Home,
        Self::Budget,
        Self::Stocks,
        Self::News,
        Self::Learn,
        Self::Chat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Budget => "Budget",
            Self::Stocks => "Stocks",
            Self::News => "News",
            Self::Learn => "Learn",
            Self::Chat => "Chat",
        }
    }

    /// The view bound to a number key
    pub fn from_key(c: char) -> Option<Self> {
        let index = c.to_digit(10)? as usize;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    fn offset(&self, by: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let index = Self::ALL.iter().position(|v| v == self).unwrap_or(0) as isize;
        Self::ALL[(index + by).rem_euclid(len) as usize]
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn prev(&self) -> Self {
        self.offset(-1)
    }
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// A text field has the keyboard; `q` and the number keys are typed
    Editing,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Login,
    CourseDetails,
    Leaderboard,
}

/// One selectable row of the learning center list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnRow {
    Unit(usize),
    Lesson(usize, usize),
    Quiz,
}

/// Main application state
pub struct App<'a> {
    /// Application settings
    pub settings: &'a Settings,

    pub curriculum: Arc<Curriculum>,

    pub log: ActivityLog,

    runtime: Handle,

    client: BackendClient,

    /// Backend session, created once before the UI starts
    pub session: Arc<Session>,

    events: mpsc::Sender<Event>,

    auth: Option<AuthService>,

    /// Signed-in identity, if any
    pub user: Option<IdentityUser>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active view
    pub active_view: ActiveView,

    /// Current input mode
    pub input_mode: InputMode,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Status message to display, with the time it was set
    pub status_message: Option<(String, Instant)>,

    pub budget_form: BudgetForm,
    pub budget_style: BudgetStyle,
    /// 0 is monthly income, then one row per category
    pub budget_index: usize,
    pub budget_input: TextInput,

    pub stocks: StockController,
    pub stock_index: usize,

    pub news: NewsFeed,
    pub news_search: TextInput,
    pub news_index: usize,
    news_requested: bool,

    pub progress: CourseProgress,
    pub learn_index: usize,
    pub quiz: Quiz,
    pub quiz_cursor: usize,

    pub chat: ChatSession,
    pub chat_input: TextInput,

    pub login: LoginState,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(
        settings: &'a Settings,
        curriculum: Arc<Curriculum>,
        log: ActivityLog,
        http: Arc<dyn HttpClient>,
        runtime: Handle,
        session: Session,
        events: mpsc::Sender<Event>,
    ) -> Self {
        let client = BackendClient::from_settings(settings, Arc::clone(&http));
        let session = Arc::new(session);

        let stock_events = events.clone();
        let sink: UpdateSink = Arc::new(move |update| {
            let _ = stock_events.send(Event::Stock(update));
        });
        let feed = StockFeed::new(
            client.clone(),
            Arc::clone(&session),
            runtime.clone(),
            sink,
            log.clone(),
        );

        let auth = settings.identity_api_key.as_ref().map(|key| {
            let provider = FirebaseIdentity::new(http, key.clone(), settings.request_timeout_ms);
            AuthService::new(Arc::new(provider), log.clone())
        });

        let mut progress = CourseProgress::new(Arc::clone(&curriculum));
        progress.resume();

        Self {
            settings,
            curriculum: Arc::clone(&curriculum),
            log,
            runtime,
            client,
            session,
            events,
            auth,
            user: None,
            should_quit: false,
            active_view: ActiveView::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            status_message: None,
            budget_form: BudgetForm::new(),
            budget_style: settings.budget_style,
            budget_index: 0,
            budget_input: TextInput::new(),
            stocks: StockController::new(settings.max_stock_page, feed),
            stock_index: 0,
            news: NewsFeed::new(),
            news_search: TextInput::new().label("Search").placeholder("title, description or source"),
            news_index: 0,
            news_requested: false,
            progress,
            learn_index: 0,
            quiz: Quiz::new(curriculum),
            quiz_cursor: 0,
            chat: ChatSession::new(),
            chat_input: TextInput::new().placeholder("Ask about budgeting, stocks, saving..."),
            login: LoginState::default(),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.stocks.cancel();
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Drop the status message once it has been shown long enough
    pub fn expire_status(&mut self) {
        if let Some((_, at)) = &self.status_message {
            if at.elapsed() >= STATUS_TTL {
                self.status_message = None;
            }
        }
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(m, _)| m.as_str())
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        if view == self.active_view {
            return;
        }
        if self.active_view == ActiveView::Stocks {
            self.stocks.cancel();
        }
        self.active_view = view;
        self.input_mode = InputMode::Normal;

        match view {
            ActiveView::Stocks => self.ensure_stocks_loaded(),
            ActiveView::News if !self.news_requested => self.fetch_news(),
            _ => {}
        }
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    /// Open the sign-in dialog in the given mode
    pub fn open_login(&mut self, mode: LoginMode) {
        self.login = LoginState::new(mode);
        self.open_dialog(ActiveDialog::Login);
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    // ----- Budget -----

    /// Number of editable budget rows (income plus categories)
    pub fn budget_row_count(&self) -> usize {
        BudgetCategory::ALL.len() + 1
    }

    /// Category behind a budget row; `None` is the income row
    pub fn budget_row(&self, index: usize) -> Option<BudgetCategory> {
        index
            .checked_sub(1)
            .and_then(|i| BudgetCategory::ALL.get(i).copied())
    }

    pub fn budget_report(&self) -> BudgetReport {
        BudgetCalculator::new(&self.settings.reference_ranges)
            .report(&self.budget_form, self.budget_style)
    }

    pub fn begin_budget_edit(&mut self) {
        let raw = match self.budget_row(self.budget_index) {
            Some(category) => self.budget_form.raw(category).to_string(),
            None => self.budget_form.monthly_income.clone(),
        };
        self.budget_input = TextInput::new().content(raw).focused(true);
        self.input_mode = InputMode::Editing;
    }

    pub fn commit_budget_edit(&mut self) {
        let raw = self.budget_input.value().trim().to_string();
        match self.budget_row(self.budget_index) {
            Some(category) => self.budget_form.set(category, raw),
            None => self.budget_form.set_income(raw),
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_budget_style(&mut self) {
        self.budget_style = match self.budget_style {
            BudgetStyle::Student => BudgetStyle::FiftyThirtyTwenty,
            BudgetStyle::FiftyThirtyTwenty => BudgetStyle::Student,
        };
    }

    // ----- Stocks -----

    fn ensure_stocks_loaded(&mut self) {
        let state = self.stocks.state();
        let stale = state.companies().is_empty() || state.is_loading() || !state.prices_settled();
        if stale {
            let result = self.stocks.reload();
            self.report(result);
        }
    }

    pub fn next_stock_page(&mut self) {
        let result = self.stocks.next();
        if let Ok(true) = result {
            self.stock_index = 0;
        }
        self.report(result);
    }

    pub fn prev_stock_page(&mut self) {
        let result = self.stocks.prev();
        if let Ok(true) = result {
            self.stock_index = 0;
        }
        self.report(result);
    }

    pub fn reload_stocks(&mut self) {
        let result = self.stocks.reload();
        self.report(result);
    }

    // ----- News -----

    /// Start (or retry) the news request
    pub fn fetch_news(&mut self) {
        if self.news.is_loading() {
            return;
        }
        self.news_requested = true;
        self.news.begin_fetch();

        let client = self.client.clone();
        let session = Arc::clone(&self.session);
        let everything = self.settings.news_everything;
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let result = client.news(session.token(), everything).await;
            let _ = events.send(Event::News(result));
        });
    }

    pub fn finish_news(&mut self, result: UpscaleResult<Vec<Article>>) {
        if let Err(e) = &result {
            self.log.record_failure(ActivityKind::RequestFailed, "news", e);
        }
        self.news.finish(result);
        self.clamp_news_index();
    }

    /// Push the search field's text into the filter
    pub fn sync_news_search(&mut self) {
        self.news.set_search(self.news_search.value());
        self.clamp_news_index();
    }

    pub fn cycle_news_category(&mut self) {
        let next = self.news.category().next();
        self.news.set_category(next);
        self.clamp_news_index();
    }

    pub fn clear_news_filters(&mut self) {
        self.news.clear_filters();
        self.news_search.clear();
        self.news_index = 0;
    }

    fn clamp_news_index(&mut self) {
        let count = self.news.filtered().len();
        self.news_index = self.news_index.min(count.saturating_sub(1));
    }

    // ----- Learn -----

    /// Rows of the unit list: units, lessons of the expanded unit, then the quiz
    pub fn learn_rows(&self) -> Vec<LearnRow> {
        let mut rows = Vec::new();
        for (unit_index, unit) in self.curriculum.units.iter().enumerate() {
            rows.push(LearnRow::Unit(unit_index));
            if self.progress.expanded_unit() == Some(unit.id) {
                rows.extend((0..unit.lessons.len()).map(|l| LearnRow::Lesson(unit_index, l)));
            }
        }
        rows.push(LearnRow::Quiz);
        rows
    }

    pub fn quiz_in_progress(&self) -> bool {
        !matches!(self.quiz.state(), QuizState::NotStarted)
    }

    /// Enter on the selected learning row
    pub fn activate_learn_row(&mut self) {
        let rows = self.learn_rows();
        let Some(row) = rows.get(self.learn_index).copied() else {
            return;
        };
        match row {
            LearnRow::Unit(unit_index) => {
                let unit_id = self.curriculum.units[unit_index].id;
                let result = self.progress.toggle_unit(unit_id);
                self.report(result);
            }
            LearnRow::Lesson(unit_index, lesson_index) => {
                let id: LessonId = self.curriculum.units[unit_index].lessons[lesson_index]
                    .id
                    .clone();
                match self.progress.open_lesson(&id) {
                    Ok(LessonToggle::Opened {
                        newly_completed: true,
                    }) => {
                        self.log
                            .record(ActivityKind::LessonCompleted, id.as_str(), None);
                        self.set_status(format!(
                            "Lesson completed ({}%)",
                            self.progress.overall_progress()
                        ));
                    }
                    Ok(_) => {}
                    Err(e) => self.set_status(e.to_string()),
                }
            }
            LearnRow::Quiz => self.start_quiz(),
        }
        let count = self.learn_rows().len();
        self.learn_index = self.learn_index.min(count.saturating_sub(1));
    }

    /// Expand the unit to continue with and select it
    pub fn resume_learning(&mut self) {
        if let Some(unit_id) = self.progress.resume() {
            let rows = self.learn_rows();
            self.learn_index = rows
                .iter()
                .position(|row| {
                    matches!(row, LearnRow::Unit(i) if self.curriculum.units[*i].id == unit_id)
                })
                .unwrap_or(0);
        }
    }

    pub fn start_quiz(&mut self) {
        self.quiz.restart();
        match self.quiz.start(&self.progress) {
            Ok(()) => self.quiz_cursor = 0,
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn select_quiz_answer(&mut self) {
        let result = self.quiz.select(self.quiz_cursor);
        self.report(result);
    }

    pub fn advance_quiz(&mut self) {
        match self.quiz.advance() {
            Ok(QuizState::Finished { score }) => {
                self.log.record(
                    ActivityKind::QuizFinished,
                    "final-quiz",
                    Some(format!("{}/{}", score, self.quiz.question_count())),
                );
            }
            Ok(_) => self.quiz_cursor = 0,
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn leave_quiz(&mut self) {
        self.quiz.restart();
        self.quiz_cursor = 0;
    }

    // ----- Chat -----

    pub fn begin_chat_input(&mut self) {
        self.chat_input.focused = true;
        self.input_mode = InputMode::Editing;
    }

    pub fn end_chat_input(&mut self) {
        self.chat_input.focused = false;
        self.input_mode = InputMode::Normal;
    }

    /// Send the typed message; blank input is ignored
    pub fn send_chat(&mut self) {
        let input = self.chat_input.value().to_string();
        match self.chat.begin_send(&input) {
            Ok(Some(text)) => {
                self.chat_input.clear();
                let client = self.client.clone();
                let session = Arc::clone(&self.session);
                let events = self.events.clone();
                self.runtime.spawn(async move {
                    let result = client.chat(session.token(), &text).await;
                    let _ = events.send(Event::Chat(result));
                });
            }
            Ok(None) => {}
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn receive_chat(&mut self, result: UpscaleResult<String>) {
        self.chat.receive(result, &self.log);
    }

    // ----- Identity -----

    pub fn submit_login(&mut self) {
        let Some(auth) = self.auth.clone() else {
            self.login.error = Some(
                "No identity API key configured (identity_api_key or UPSCALE_IDENTITY_API_KEY)"
                    .into(),
            );
            return;
        };
        let credentials = match self.login.credentials() {
            Ok(credentials) => credentials,
            Err(e) => {
                self.login.error = Some(e.to_string());
                return;
            }
        };
        self.login.pending = true;
        self.login.error = None;

        let mode = self.login.mode;
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let result = match mode {
                LoginMode::SignIn => auth.sign_in(&credentials).await,
                LoginMode::SignUp => auth.sign_up(&credentials).await,
            };
            let _ = events.send(Event::Identity(result));
        });
    }

    pub fn finish_login(&mut self, result: UpscaleResult<IdentityUser>) {
        self.login.pending = false;
        match result {
            Ok(user) => {
                self.set_status(format!("Signed in as {}", user.email));
                self.user = Some(user);
                if self.active_dialog == ActiveDialog::Login {
                    self.close_dialog();
                }
            }
            Err(e) => self.login.error = Some(e.to_string()),
        }
    }

    pub fn sign_out(&mut self) {
        if self.user.take().is_some() {
            self.set_status("Signed out");
        }
    }

    /// Show an error from a state transition in the status bar
    fn report<T>(&mut self, result: UpscaleResult<T>) {
        if let Err(e) = result {
            self.set_status(e.to_string());
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::api::http::testing::ScriptedHttpClient;
    use crate::config::curriculum::builtin_curriculum;
    use tempfile::TempDir;

    /// App wired to a scripted backend; keep the receiver to observe results
    pub struct Harness {
        pub settings: Settings,
        pub curriculum: Arc<Curriculum>,
        pub log: ActivityLog,
        pub http: Arc<ScriptedHttpClient>,
        pub sender: mpsc::Sender<Event>,
        pub receiver: mpsc::Receiver<Event>,
        _dir: TempDir,
    }

    impl Harness {
        pub fn new(http: ScriptedHttpClient) -> Self {
            let dir = TempDir::new().unwrap();
            let (sender, receiver) = mpsc::channel();
            Self {
                settings: Settings::default(),
                curriculum: Arc::new(builtin_curriculum().unwrap()),
                log: ActivityLog::new(dir.path().join("activity.log")),
                http: Arc::new(http),
                sender,
                receiver,
                _dir: dir,
            }
        }

        pub fn app(&self) -> App<'_> {
            App::new(
                &self.settings,
                Arc::clone(&self.curriculum),
                self.log.clone(),
                self.http.clone(),
                Handle::current(),
                Session::anonymous(),
                self.sender.clone(),
            )
        }
    }
}
