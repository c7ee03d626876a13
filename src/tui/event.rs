//! Event handling for the TUI
//!
//! Terminal input (key presses, resize) and results of network work spawned
//! onto the runtime arrive on one channel, so the main loop never blocks on
//! the network.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::UpscaleResult;
use crate::models::{Article, IdentityUser};
use crate::services::StockUpdate;

/// Everything the main loop reacts to
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
    /// A company page or one symbol's price
    Stock(StockUpdate),
    /// The news feed finished loading
    News(UpscaleResult<Vec<Article>>),
    /// The assistant replied (or failed to)
    Chat(UpscaleResult<String>),
    /// Sign-in or sign-up finished
    Identity(UpscaleResult<IdentityUser>),
    /// The input thread stopped
    InputClosed(String),
}

/// Event handler for terminal events
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let input = sender.clone();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                let polled = event::poll(timeout).and_then(|ready| {
                    if ready {
                        event::read().map(Some)
                    } else {
                        Ok(None)
                    }
                });
                let forwarded = match polled {
                    // Windows reports both press and release
                    Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        input.send(Event::Key(key))
                    }
                    Ok(Some(CrosstermEvent::Resize(width, height))) => {
                        input.send(Event::Resize(width, height))
                    }
                    Ok(_) => Ok(()),
                    Err(e) => {
                        let _ = input.send(Event::InputClosed(e.to_string()));
                        return;
                    }
                };
                if forwarded.is_err() {
                    return;
                }

                if last_tick.elapsed() >= tick_rate {
                    if input.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { sender, receiver }
    }

    /// A sender for background tasks to deliver their results
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.sender.clone()
    }

    /// Get the next event (blocking)
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}
