//! Process-wide observable reading state
//!
//! Every mutation goes through the watch sender, which serialises writers and
//! notifies subscribers only when the reading actually changed.

use tokio::sync::watch;

use crate::entities::{Reading, SampleQueryResult};

/// Single authoritative snapshot of the latest reading
#[derive(Debug)]
pub struct ReadingState {
    tx: watch::Sender<Reading>,
}

impl Default for ReadingState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingState {
    /// State holding the 120/80 placeholder stamped with the current time
    pub fn new() -> Self {
        Self::with_reading(Reading::default())
    }

    /// State holding an explicit initial reading
    pub fn with_reading(reading: Reading) -> Self {
        let (tx, _rx) = watch::channel(reading);
        Self { tx }
    }

    /// Copy of the current reading
    pub fn snapshot(&self) -> Reading {
        *self.tx.borrow()
    }

    /// Receiver that is notified on every change
    pub fn subscribe(&self) -> watch::Receiver<Reading> {
        self.tx.subscribe()
    }

    /// Merge a query result into the state. Returns whether the reading changed.
    pub fn apply(&self, result: &SampleQueryResult) -> bool {
        self.tx.send_if_modified(|reading| reading.merge(result))
    }

    /// Overwrite the systolic value without validation
    pub fn set_systolic(&self, systolic: u16) -> bool {
        self.tx.send_if_modified(|reading| {
            let changed = reading.systolic != systolic;
            reading.systolic = systolic;
            changed
        })
    }

    /// Overwrite the diastolic value without validation
    pub fn set_diastolic(&self, diastolic: u16) -> bool {
        self.tx.send_if_modified(|reading| {
            let changed = reading.diastolic != diastolic;
            reading.diastolic = diastolic;
            changed
        })
    }
}
