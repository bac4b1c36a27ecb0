/// Terminal input decoder.
///
/// Drains crossterm events once per frame and turns them into `Command`s:
///   - Press / Repeat key events only (Release is dropped)
///   - bracketed paste arrives as one `Command::Paste`
///   - Ctrl+C always quits, whatever the screen
///
/// Typing is edge-triggered: every press is one command, so there is no
/// held-key bookkeeping.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::session::Command;

pub struct InputState {
    /// Commands decoded during the most recent `drain_events()`.
    commands: Vec<Command>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { commands: Vec::with_capacity(8) }
    }

    /// Read all pending terminal events without blocking.
    pub fn drain_events(&mut self) {
        self.commands.clear();
        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(cmd) = decode_key(key) {
                        self.commands.push(cmd);
                    }
                }
                Ok(Event::Paste(text)) => self.commands.push(Command::Paste(text)),
                _ => {}
            }
        }
    }

    /// Drop everything typed so far (used after a blocking word check).
    pub fn discard_pending(&mut self) {
        self.drain_events();
        let dropped = self.commands.len();
        self.commands.retain(|c| *c == Command::Quit);
        if dropped > 0 {
            log::debug!("discarded {dropped} inputs received while checking");
        }
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

/// Map one key event to a command. `None` for releases and unbound keys.
pub fn decode_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }
    let cmd = match key.code {
        KeyCode::Char(c) => Command::Char(c),
        KeyCode::Backspace => Command::Backspace,
        KeyCode::Delete => Command::Delete,
        KeyCode::Left => Command::Left,
        KeyCode::Right => Command::Right,
        KeyCode::Home => Command::Home,
        KeyCode::End => Command::End,
        KeyCode::Enter => Command::Enter,
        KeyCode::F(1) => Command::ToggleHelp,
        KeyCode::F(2) => Command::ToggleAbout,
        KeyCode::F(3) => Command::GiveUp,
        KeyCode::Esc => Command::Back,
        _ => return None,
    };
    Some(cmd)
}
