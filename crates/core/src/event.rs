//! Event types for panedit.
//!
//! - `Event` - Application-level events (keyboard, resize, tick)
//! - `EventHandler` - Polling for terminal events

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Application event
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Tick event (periodic work such as auto-save)
    Tick,
}

/// Event handler for polling terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Wait for next event, or a tick when nothing arrives in time
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Only Press events; Release and Repeat would duplicate actions
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}
