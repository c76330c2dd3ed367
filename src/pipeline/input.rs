//! Input - crossterm events reduced to what the host cares about.

use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// `q`, `Esc` or `Ctrl+C`
    Quit,
    Resize(u16, u16),
    None,
}

/// Reduce a crossterm event.
pub fn classify(event: Event) -> HostEvent {
    match event {
        Event::Key(key) if is_quit_key(&key) => HostEvent::Quit,
        Event::Resize(width, height) => HostEvent::Resize(width, height),
        _ => HostEvent::None,
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Poll with timeout. `None` if nothing arrived.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<HostEvent>> {
    if poll(timeout)? {
        Ok(Some(classify(read()?)))
    } else {
        Ok(None)
    }
}

// =============================================================================
// TESTS
// =============================================================================
