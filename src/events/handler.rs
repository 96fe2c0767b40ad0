//! Event handler implementation.
//!
//! Polls for terminal events and converts them to application events.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};

use super::Event;

/// The tick rate for the event loop in milliseconds.
const TICK_RATE_MS: u64 = 100;

/// Handles application events by polling crossterm for terminal events.
pub struct EventHandler {
    /// The tick rate duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the default tick rate.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(TICK_RATE_MS),
        }
    }

    /// Create a new event handler with a custom tick rate.
    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event.
    ///
    /// Blocks until an event is available or the tick rate elapses.
    /// Returns `Event::Tick` if nothing usable arrived.
    pub fn next(&self) -> std::io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }

        match event::read()? {
            // Windows reports both press and release; only presses drive the palette
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Ok(Event::Key(key_event))
            }
            CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
            _ => Ok(Event::Tick),
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
