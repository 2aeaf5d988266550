//! Scripted pad device for tests.
//!
//! Lets a test enqueue the exact frames a poll loop will observe, and count
//! how often it was sampled; that count is how the "no writes after
//! cancel" property is checked.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::application::gamepad::PadSample;

use super::PadDevice;

/// Shared handle for inspecting and feeding a [`MockPad`] from the test
/// while the poller owns the device.
#[derive(Default)]
pub struct MockPadState {
    queue: Mutex<VecDeque<PadSample>>,
    samples_taken: Mutex<u32>,
}

impl MockPadState {
    /// Enqueues a frame for the next poll.
    pub fn push_sample(&self, sample: PadSample) {
        self.queue.lock().expect("mock pad lock poisoned").push_back(sample);
    }

    /// How many times the poller has sampled the device so far.
    pub fn samples_taken(&self) -> u32 {
        *self.samples_taken.lock().expect("mock pad lock poisoned")
    }
}

/// A [`PadDevice`] that replays scripted frames.
pub struct MockPad {
    state: Arc<MockPadState>,
}

impl MockPad {
    /// Creates a mock pad and the shared state handle used to drive it.
    pub fn new() -> (Self, Arc<MockPadState>) {
        let state = Arc::new(MockPadState::default());
        (Self { state: Arc::clone(&state) }, state)
    }
}

impl PadDevice for MockPad {
    fn sample(&mut self) -> Option<PadSample> {
        *self
            .state
            .samples_taken
            .lock()
            .expect("mock pad lock poisoned") += 1;
        self.state
            .queue
            .lock()
            .expect("mock pad lock poisoned")
            .pop_front()
    }
}
