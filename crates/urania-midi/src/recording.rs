//! Recording output: captures every message instead of sending it.
//!
//! Used by tests and by the daemon's dry-run mode.

use std::sync::{Arc, Mutex};

use crate::{ControlChange, MidiError, MidiOutput};

#[derive(Clone)]
pub struct RecordingOutput {
    name: String,
    sent: Arc<Mutex<Vec<ControlChange>>>,
    fail_sends: Arc<Mutex<bool>>,
}

impl RecordingOutput {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_sends: Arc::new(Mutex::new(false)),
        }
    }

    /// Snapshot of everything sent so far, in order.
    pub fn sent(&self) -> Vec<ControlChange> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    /// Make subsequent sends fail, for fault-path tests.
    pub fn set_failing(&self, failing: bool) {
        *self.fail_sends.lock().unwrap() = failing;
    }
}

impl MidiOutput for RecordingOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&mut self, msg: ControlChange) -> Result<(), MidiError> {
        if *self.fail_sends.lock().unwrap() {
            return Err(MidiError::Send {
                name: self.name.clone(),
                message: "recording output set to fail".to_string(),
            });
        }
        if !msg.in_range() {
            return Err(MidiError::out_of_range(msg));
        }
        self.sent.lock().unwrap().push(msg);
        Ok(())
    }
}
