//! Append-only debug history with ordered, asynchronous printing.
//!
//! The recorder is purely observational: when debug mode is off every call
//! is a no-op, and when it is on the recorder never influences the loop's
//! control flow. Entries freeze their payload by cloning at record time and
//! capture a backtrace for diagnostic attribution; symbol resolution is
//! deferred until the entry is formatted for printing.

use super::sink::TraceSink;
use super::snapshot::StepSnapshot;
use crate::core::{ActionRequest, Model, Proposal, StateIdentity};
use crate::engine::Session;
use chrono::{DateTime, Utc};
use std::backtrace::Backtrace;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use uuid::Uuid;

/// One recorded loop step.
#[derive(Clone, Debug)]
pub struct HistoryEntry<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    /// Unique id of this entry.
    pub id: Uuid,
    /// Frozen payload of the step.
    pub snapshot: StepSnapshot<M, P, A, S>,
    /// Session the step belonged to.
    pub session: Session,
    /// When the step was recorded.
    pub timestamp: DateTime<Utc>,
    /// Call stack at record time; resolved lazily on display.
    pub backtrace: Arc<Backtrace>,
}

/// Debug history for one engine instance.
///
/// Printing goes through a single-concurrency queue: entries are sent over
/// an unbounded channel to one drain task, so displayed order always equals
/// append order even though backtrace resolution happens off the hot path.
/// When the recorder is constructed outside a tokio runtime it falls back
/// to writing synchronously in-line, which preserves order trivially.
pub(crate) struct HistoryRecorder<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    enabled: bool,
    entries: Mutex<Vec<HistoryEntry<M, P, A, S>>>,
    sink: Arc<dyn TraceSink>,
    queue: Option<mpsc::UnboundedSender<HistoryEntry<M, P, A, S>>>,
}

impl<M, P, A, S> HistoryRecorder<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    pub(crate) fn new(enabled: bool, sink: Arc<dyn TraceSink>) -> Self {
        let queue = if enabled {
            Handle::try_current().ok().map(|handle| {
                let (tx, mut rx) = mpsc::unbounded_channel::<HistoryEntry<M, P, A, S>>();
                let sink = Arc::clone(&sink);
                handle.spawn(async move {
                    while let Some(entry) = rx.recv().await {
                        sink.write(&format_entry(&entry));
                    }
                });
                tx
            })
        } else {
            None
        };

        Self {
            enabled,
            entries: Mutex::new(Vec::new()),
            sink,
            queue,
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append one step snapshot; no-op unless debug mode is on.
    pub(crate) fn record(&self, snapshot: StepSnapshot<M, P, A, S>, session: &Session) {
        if !self.enabled {
            return;
        }

        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            snapshot,
            session: session.clone(),
            timestamp: Utc::now(),
            backtrace: Arc::new(Backtrace::capture()),
        };

        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());

        match &self.queue {
            Some(queue) => {
                // Send can only fail once the drain task is gone, i.e. at
                // shutdown; losing a debug line there is acceptable.
                let _ = queue.send(entry);
            }
            None => self.sink.write(&format_entry(&entry)),
        }
    }

    /// Snapshot of all recorded entries, in append order.
    pub(crate) fn entries(&self) -> Vec<HistoryEntry<M, P, A, S>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn format_entry<M, P, A, S>(entry: &HistoryEntry<M, P, A, S>) -> String
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    format!(
        "[{}] [session {}] {}: {:?}",
        entry.timestamp.to_rfc3339(),
        entry.session.id(),
        entry.snapshot.kind(),
        entry.snapshot
    )
}
