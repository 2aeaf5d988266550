//! The cancellable gamepad poll task.
//!
//! Samples a [`PadDevice`] on a fixed period and feeds each frame to the
//! controller. The task is started when a pad becomes available and must be
//! cancelled when it goes away; a poll loop nobody stops would keep
//! rescheduling itself forever.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::application::controller::Controller;

use super::PadDevice;

/// Handle to a running poll task.
pub struct PadPoller {
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PadPoller {
    /// Starts polling `device` every `period`, feeding frames to
    /// `controller`.
    pub fn spawn(
        mut device: Box<dyn PadDevice>,
        controller: Arc<Mutex<Controller>>,
        period: Duration,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            // A stalled runtime must not cause a burst of stale frames.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if !flag.load(Ordering::SeqCst) {
                    break;
                }
                if let Some(sample) = device.sample() {
                    controller
                        .lock()
                        .expect("controller lock poisoned")
                        .pad_frame(sample);
                }
            }
            debug!("gamepad poll loop stopped");
        });

        Self { running, task }
    }

    /// Whether the poll task is still scheduled.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && !self.task.is_finished()
    }

    /// Stops the poll loop and waits for the task to finish unwinding.
    ///
    /// When this returns, no further frames will be sampled or applied;
    /// the task is gone, not merely asked to stop.
    pub async fn cancel(self) {
        self.running.store(false, Ordering::SeqCst);
        self.task.abort();
        // Joining after abort returns either Ok(()) (the loop saw the flag)
        // or a cancellation error; both mean the task has fully stopped.
        let _ = self.task.await;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
