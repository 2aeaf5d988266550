//! Raw-mode terminal key capture.
//!
//! Runs a dedicated OS thread that blocks on crossterm events and forwards
//! them into a tokio channel; the async side never blocks on the terminal.
//! Key *release* events require the kitty keyboard protocol. Where the
//! terminal supports it the drive keys behave like a gamepad (held = go,
//! released = stop), elsewhere crossterm only delivers presses and the
//! operator stops with the space bar.

use std::io;
use std::thread;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// One operator key transition, as the event loop consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Press(char),
    Release(char),
    /// Escape or Ctrl+C: shut the remote down.
    Quit,
}

/// Puts the terminal in raw mode and spawns the capture thread.
///
/// The returned receiver yields [`KeyInput`]s until the operator quits, at
/// which point the thread restores the terminal and exits. Dropping the
/// receiver also ends the thread after its next event.
pub fn spawn_key_source() -> io::Result<mpsc::UnboundedReceiver<KeyInput>> {
    enable_raw_mode()?;
    // Release events need the enhancement flags; not every terminal honors
    // them, and that is fine (see module docs).
    if execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_err()
    {
        debug!("terminal does not report key releases; hold-to-drive unavailable");
    }

    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        loop {
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(e) => {
                    warn!("terminal event read failed: {e}");
                    break;
                }
            };

            let input = match ev {
                Event::Key(key) => match (key.code, key.kind) {
                    (KeyCode::Esc, KeyEventKind::Press) => Some(KeyInput::Quit),
                    (KeyCode::Char('c'), KeyEventKind::Press)
                        if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                    {
                        Some(KeyInput::Quit)
                    }
                    (KeyCode::Char(c), KeyEventKind::Press) => Some(KeyInput::Press(c)),
                    (KeyCode::Char(c), KeyEventKind::Release) => Some(KeyInput::Release(c)),
                    _ => None,
                },
                _ => None,
            };

            if let Some(input) = input {
                let quit = input == KeyInput::Quit;
                if tx.send(input).is_err() || quit {
                    break;
                }
            }
        }

        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        let _ = disable_raw_mode();
    });

    Ok(rx)
}
