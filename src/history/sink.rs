//! Output sinks for the debug history.
//!
//! The recorder formats entries and hands them to a [`TraceSink`], one line
//! at a time, through a single-concurrency queue. Injecting the sink keeps
//! the recorder testable and avoids hard-wiring a console.

use std::sync::{Mutex, PoisonError};

/// Ordered, line-oriented output target for history entries.
///
/// Implementations only need to write; ordering and single-concurrency are
/// guaranteed by the recorder's queue.
pub trait TraceSink: Send + Sync {
    /// Write one formatted history line.
    fn write(&self, line: &str);
}

/// Default sink: emits history lines through `tracing` at debug level
/// under the `samloop::history` target.
#[derive(Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn write(&self, line: &str) {
        tracing::debug!(target: "samloop::history", "{}", line);
    }
}

/// Sink that collects lines in memory, in arrival order.
///
/// Useful in tests for asserting that the print queue preserves append
/// order.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far, in write order.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TraceSink for MemorySink {
    fn write(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
