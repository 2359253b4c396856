//! Debug instrumentation: step snapshots, the history recorder, structural
//! diffs, and pluggable print sinks.
//!
//! Everything here is observational. The recorder is inert unless the
//! engine was built with debug mode on, and it never feeds back into the
//! loop's control flow.

mod diff;
mod recorder;
mod sink;
mod snapshot;

pub use diff::model_diff;
pub use recorder::HistoryEntry;
pub use sink::{MemorySink, TraceSink, TracingSink};
pub use snapshot::StepSnapshot;

pub(crate) use recorder::HistoryRecorder;
