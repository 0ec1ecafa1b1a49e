//! Worker lifecycle state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Where a worker is in its single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Constructed, not yet started
    Idle,
    /// Service call in progress
    Running,
    /// Callback fired with the service's result
    Delivered,
    /// Callback fired with an empty result after a failure
    DeliveredWithError,
}

impl WorkerState {
    /// Whether the callback has fired.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkerState::Delivered | WorkerState::DeliveredWithError)
    }

    fn to_u8(self) -> u8 {
        match self {
            WorkerState::Idle => 0,
            WorkerState::Running => 1,
            WorkerState::Delivered => 2,
            WorkerState::DeliveredWithError => 3,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => WorkerState::Idle,
            1 => WorkerState::Running,
            2 => WorkerState::Delivered,
            _ => WorkerState::DeliveredWithError,
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkerState::Idle => "idle",
            WorkerState::Running => "running",
            WorkerState::Delivered => "delivered",
            WorkerState::DeliveredWithError => "delivered with error",
        };
        f.write_str(label)
    }
}

/// State shared between a worker's task and its handle.
#[derive(Debug)]
pub(super) struct SharedState {
    state: AtomicU8,
    interrupted: AtomicBool,
}

impl SharedState {
    pub(super) fn new() -> Self {
        Self {
            state: AtomicU8::new(WorkerState::Idle.to_u8()),
            interrupted: AtomicBool::new(false),
        }
    }

    pub(super) fn get(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(super) fn set(&self, state: WorkerState) {
        self.state.store(state.to_u8(), Ordering::Release);
    }

    pub(super) fn interrupt(&self) {
        self.interrupted.store(true, Ordering::Release);
    }

    pub(super) fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_through_shared_state() {
        let shared = SharedState::new();
        assert_eq!(shared.get(), WorkerState::Idle);

        for state in [
            WorkerState::Running,
            WorkerState::Delivered,
            WorkerState::DeliveredWithError,
        ] {
            shared.set(state);
            assert_eq!(shared.get(), state);
        }
    }

    #[test]
    fn terminal_states() {
        assert!(!WorkerState::Idle.is_terminal());
        assert!(!WorkerState::Running.is_terminal());
        assert!(WorkerState::Delivered.is_terminal());
        assert!(WorkerState::DeliveredWithError.is_terminal());
    }

    #[test]
    fn interrupt_flag() {
        let shared = SharedState::new();
        assert!(!shared.is_interrupted());
        shared.interrupt();
        assert!(shared.is_interrupted());
    }
}
