//! WebSocket connection management for the rover link.
//!
//! One logical connection exists at a time. Each call to
//! [`ConnectionManager::connect`] starts a new *session* identified by a
//! generation number; bumping the generation is how older sessions are
//! retired. A stale session task may still be unwinding after a reconnect,
//! but it can no longer publish state, touch the outbox, or feed the
//! controller. That is what keeps a half-dead socket from ghosting events
//! into the current link.
//!
//! Outbound commands go through the [`Outbox`]: while a session is live it
//! holds the writer channel, otherwise [`Outbox::send`] is a silent no-op,
//! so input handlers never need to guard on connection state before
//! dispatching.
//!
//! State machine: `Disconnected → Connecting → Connected → Disconnected`,
//! with `Connecting → Disconnected` on a failed handshake. Published
//! through a `tokio::sync::watch` channel so the presentation layer can
//! react without polling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::warn;

use rover_core::{decode_message, encode_command, Command, ProtocolError};

use crate::application::controller::{CommandSink, Controller};
use crate::domain::logbook::{LogLevel, Logbook};

/// Connection lifecycle state, observable by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
}

// ── Outbox ────────────────────────────────────────────────────────────────────

/// The production [`CommandSink`]: forwards commands into the live session's
/// writer task, or silently drops them when there is none.
#[derive(Default)]
pub struct Outbox {
    tx: Mutex<Option<mpsc::UnboundedSender<Command>>>,
}

impl Outbox {
    fn attach(&self, tx: mpsc::UnboundedSender<Command>) {
        *self.tx.lock().expect("outbox lock poisoned") = Some(tx);
    }

    fn detach(&self) {
        *self.tx.lock().expect("outbox lock poisoned") = None;
    }

    /// Whether a session writer is currently attached.
    pub fn is_attached(&self) -> bool {
        self.tx.lock().expect("outbox lock poisoned").is_some()
    }
}

impl CommandSink for Outbox {
    fn send(&self, command: Command) {
        // No writer → no link → drop without complaint, by design.
        if let Some(tx) = &*self.tx.lock().expect("outbox lock poisoned") {
            let _ = tx.send(command);
        }
    }
}

// ── Connection manager ────────────────────────────────────────────────────────

/// Session bookkeeping shared with the spawned session tasks.
struct Shared {
    generation: AtomicU64,
    state: watch::Sender<LinkState>,
}

impl Shared {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Publishes a state transition, unless this session has been retired.
    fn publish(&self, generation: u64, state: LinkState) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.state.send_replace(state);
        true
    }
}

/// Owns the (single) rover connection and its lifecycle.
pub struct ConnectionManager {
    shared: Arc<Shared>,
    outbox: Arc<Outbox>,
    logbook: Arc<Logbook>,
    session: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectionManager {
    pub fn new(logbook: Arc<Logbook>) -> Self {
        let (state_tx, _state_rx) = watch::channel(LinkState::Disconnected);
        Self {
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                state: state_tx,
            }),
            outbox: Arc::new(Outbox::default()),
            logbook,
            session: Mutex::new(None),
        }
    }

    /// The sink the [`Controller`] dispatches through.
    pub fn outbox(&self) -> Arc<Outbox> {
        Arc::clone(&self.outbox)
    }

    /// Current connection state.
    pub fn state(&self) -> LinkState {
        *self.shared.state.subscribe().borrow()
    }

    /// A receiver the presentation layer can await state changes on.
    pub fn watch_state(&self) -> watch::Receiver<LinkState> {
        self.shared.state.subscribe()
    }

    /// Opens a new session to `url`, retiring any previous one first.
    ///
    /// On a successful open the session publishes `Connected` and triggers
    /// exactly one [`Controller::send_local_settings`] resync; on handshake
    /// failure it publishes `Disconnected` with a warning in the logbook.
    pub fn connect(&self, url: String, controller: Arc<Mutex<Controller>>) {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.retire_session();
        self.shared.state.send_replace(LinkState::Connecting);

        let handle = tokio::spawn(run_session(
            url,
            generation,
            Arc::clone(&self.shared),
            Arc::clone(&self.outbox),
            controller,
            Arc::clone(&self.logbook),
        ));
        *self.session.lock().expect("session lock poisoned") = Some(handle);
    }

    /// Closes the current session, if any. Idempotent: with no session this
    /// does nothing beyond confirming the `Disconnected` state.
    pub fn disconnect(&self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        self.retire_session();
        self.shared.state.send_replace(LinkState::Disconnected);
    }

    fn retire_session(&self) {
        if let Some(handle) = self.session.lock().expect("session lock poisoned").take() {
            handle.abort();
        }
        self.outbox.detach();
    }
}

// ── Session task ──────────────────────────────────────────────────────────────

async fn run_session(
    url: String,
    generation: u64,
    shared: Arc<Shared>,
    outbox: Arc<Outbox>,
    controller: Arc<Mutex<Controller>>,
    logbook: Arc<Logbook>,
) {
    let (ws, _response) = match connect_async(&url).await {
        Ok(ok) => ok,
        Err(e) => {
            if shared.publish(generation, LinkState::Disconnected) {
                logbook.append(LogLevel::Warn, format!("connection to {url} failed: {e}"));
            }
            return;
        }
    };

    // A reconnect may have retired this session mid-handshake.
    if !shared.is_current(generation) {
        return;
    }

    let (mut ws_tx, mut ws_rx) = ws.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Command>();
    outbox.attach(tx);
    shared.publish(generation, LinkState::Connected);
    logbook.append(LogLevel::Debug, format!("connected to {url}"));

    // Full resync: the rover's actuator state is unknown after any
    // (re)connect, so local intent is pushed wholesale.
    controller
        .lock()
        .expect("controller lock poisoned")
        .send_local_settings();

    // Writer: drains the outbox channel in dispatch order. The transport
    // preserves frame order end-to-end.
    let writer = tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            match encode_command(&command) {
                Ok(frame) => {
                    if ws_tx.send(WsMessage::Text(frame)).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("failed to encode command: {e}"),
            }
        }
    });

    // Reader: decodes inbound frames until close, error, or retirement.
    while let Some(frame) = ws_rx.next().await {
        if !shared.is_current(generation) {
            break;
        }
        match frame {
            Ok(WsMessage::Text(text)) => apply_frame(&text, &controller, &logbook),
            Ok(WsMessage::Close(_)) => {
                logbook.append(LogLevel::Debug, "link closed by rover");
                break;
            }
            // Ping/pong is answered by tungstenite; the rover sends no
            // binary frames.
            Ok(_) => {}
            Err(e) => {
                logbook.append(LogLevel::Warn, format!("link error: {e}"));
                break;
            }
        }
    }

    writer.abort();
    if shared.is_current(generation) {
        outbox.detach();
        shared.publish(generation, LinkState::Disconnected);
    }
}

/// Decodes one inbound frame and applies it, classifying anything that does
/// not parse. An unknown tag is an error-level event, never a silent drop.
fn apply_frame(raw: &str, controller: &Arc<Mutex<Controller>>, logbook: &Arc<Logbook>) {
    match decode_message(raw) {
        Ok(message) => controller
            .lock()
            .expect("controller lock poisoned")
            .apply_message(message),
        Err(e @ ProtocolError::UnknownTag { .. }) => {
            logbook.append(LogLevel::Error, format!("{e}"));
        }
        Err(e) => {
            logbook.append(LogLevel::Error, format!("undecodable frame: {e}"));
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
