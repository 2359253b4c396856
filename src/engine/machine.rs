//! The loop controller: one SAM step at a time, chained iteratively.

use crate::core::{ActionRequest, Model, Proposal, StateDefinition, StateIdentity};
use crate::engine::error::EngineError;
use crate::engine::session::Session;
use crate::history::{model_diff, HistoryEntry, HistoryRecorder, StepSnapshot, TraceSink};
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;

/// Converts an action request into an optional proposal.
///
/// This is the loop's only suspension point; the returned future may take
/// arbitrary real time to resolve and the engine waits for it indefinitely.
pub type ProposalFactory<A, P> = Arc<dyn Fn(A) -> BoxFuture<'static, Option<P>> + Send + Sync>;

/// Pure reducer applying a proposal to the model.
///
/// Receives owned clones; returning `None` rejects the proposal and leaves
/// the canonical model untouched.
pub type Presenter<P, M> = Arc<dyn Fn(P, M) -> Option<M> + Send + Sync>;

/// Observer invoked with the committed model and state after every
/// successful transition. Registered and removed by `Arc` identity.
pub type Subscription<M, S> = Arc<dyn Fn(&M, &S) + Send + Sync>;

fn same_callback<M, S>(a: &Subscription<M, S>, b: &Subscription<M, S>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Canonical model and committed state; exclusively owned by the loop.
struct Inner<M> {
    model: M,
    /// Index into `Shared::states` of the current state definition.
    current: usize,
}

struct Shared<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    factory: ProposalFactory<A, P>,
    presenter: Presenter<P, M>,
    states: Vec<StateDefinition<M, A, S>>,
    subscriptions: Mutex<Vec<Subscription<M, S>>>,
    recorder: HistoryRecorder<M, P, A, S>,
    initial_model: M,
    initial_state: S,
    /// Guards every synchronous section of a step; never held across the
    /// proposal factory's suspension.
    inner: Mutex<Inner<M>>,
}

/// A State-Action-Model orchestration engine.
///
/// The engine owns one canonical model, classifies it into exactly one
/// named state after every committed mutation, and drives the loop
/// action -> proposal -> model -> state, optionally chaining auto-derived
/// follow-up actions within the same session. Construct via
/// [`EngineBuilder`](crate::EngineBuilder).
///
/// # Concurrency policy
///
/// Independent `execute` calls are **not** serialized against each other.
/// Every synchronous section of a step (gate check; presenter, commit,
/// state match, and notification) is atomic, but the proposal factory is
/// awaited with no lock held, so a second session can commit while a first
/// one is suspended. The gate is re-checked atomically with the mutation,
/// which is what lets a state committed mid-suspension (an abort, say)
/// block the suspended step when it resumes. This preserves the documented
/// interleaving the design calls for instead of imposing a run queue.
///
/// # Failure policy
///
/// `execute` awaits its entire auto-chain and returns the first
/// [`EngineError::ActionBlocked`] any chained step produces; there are no
/// detached background failures apart from a chain started by the
/// constructor itself, which is spawned and logs its failure.
///
/// `Engine` is a cheap-clone handle; clones drive the same instance.
pub struct Engine<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    shared: Arc<Shared<M, P, A, S>>,
}

impl<M, P, A, S> Clone for Engine<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<M, P, A, S> Engine<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    pub(crate) fn from_parts(
        model: M,
        factory: ProposalFactory<A, P>,
        presenter: Presenter<P, M>,
        states: Vec<StateDefinition<M, A, S>>,
        subscriptions: Vec<Subscription<M, S>>,
        debug: bool,
        sink: Arc<dyn TraceSink>,
    ) -> Result<Self, EngineError> {
        let recorder = HistoryRecorder::new(debug, sink);
        let session = Session::new();
        recorder.record(
            StepSnapshot::ConstructorModel {
                initial_model: model.clone(),
            },
            &session,
        );

        // Startup consistency check: exactly one state must claim the
        // initial model. Zero is a gap, more than one is an overlap.
        let matched: Vec<usize> = states
            .iter()
            .enumerate()
            .filter(|(_, def)| def.matches(&model))
            .map(|(index, _)| index)
            .collect();
        let &[current] = matched.as_slice() else {
            return Err(EngineError::InvalidInitialModel {
                matched: matched.len(),
            });
        };

        let initial_state = states[current].state().clone();
        recorder.record(
            StepSnapshot::State {
                model: model.clone(),
                state: initial_state.clone(),
            },
            &session,
        );

        let shared = Arc::new(Shared {
            factory,
            presenter,
            states,
            subscriptions: Mutex::new(subscriptions),
            recorder,
            initial_model: model.clone(),
            initial_state: initial_state.clone(),
            inner: Mutex::new(Inner {
                model: model.clone(),
                current,
            }),
        });

        shared.notify(&model, &initial_state);

        // The initial state may itself derive an action, starting a chain
        // before any external `execute` call. The constructor is
        // synchronous, so that chain runs detached on the current runtime;
        // its failures are logged rather than returned.
        if let Some(action) = shared.states[current].derive_next(&model) {
            match Handle::try_current() {
                Ok(handle) => {
                    let chained = Arc::clone(&shared);
                    let from_state = initial_state.clone();
                    handle.spawn(async move {
                        if let Err(error) =
                            chained.run_session(action, Some(from_state), session).await
                        {
                            tracing::warn!(%error, "auto-chained session from construction failed");
                        }
                    });
                }
                Err(_) => {
                    tracing::warn!(
                        "initial state derives an action but no async runtime is available; chain skipped"
                    );
                }
            }
        }

        Ok(Self { shared })
    }

    /// Clone of the model supplied at construction, unaffected by any
    /// `execute` call since.
    pub fn initial_model(&self) -> M {
        self.shared.initial_model.clone()
    }

    /// Clone of the state identity matched at construction.
    pub fn initial_state(&self) -> S {
        self.shared.initial_state.clone()
    }

    /// Register an observer. Registering the same `Arc` twice is a no-op.
    pub fn subscribe(&self, subscription: Subscription<M, S>) {
        let mut subscriptions = self
            .shared
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if subscriptions
            .iter()
            .any(|existing| same_callback(existing, &subscription))
        {
            return;
        }
        subscriptions.push(subscription);
    }

    /// Remove an observer by `Arc` identity. Unknown references are a no-op.
    pub fn unsubscribe(&self, subscription: &Subscription<M, S>) {
        self.shared
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|existing| !same_callback(existing, subscription));
    }

    /// Snapshot of the debug history, in append order. Empty unless the
    /// engine was built with debug mode on.
    pub fn history(&self) -> Vec<HistoryEntry<M, P, A, S>> {
        self.shared.recorder.entries()
    }

    /// Open a new session and run the loop for `action`, following any
    /// auto-derived chain to completion.
    ///
    /// Soft halts (no proposal, presenter rejection, no matching state) end
    /// the session with `Ok(())`; only a gate rejection is an error.
    /// Subscribers observe the resulting model; `execute` does not return it.
    pub async fn execute(&self, action: A) -> Result<(), EngineError> {
        let session = Session::new();
        self.shared.run_session(action, None, session).await
    }
}

impl<M, P, A, S> Shared<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    /// Run a session to completion. Auto-chained steps are trampolined so
    /// chain length never grows the call stack.
    async fn run_session(
        &self,
        action: A,
        from_state: Option<S>,
        session: Session,
    ) -> Result<(), EngineError> {
        let mut pending = Some((action, from_state));
        while let Some((action, from_state)) = pending.take() {
            pending = self.step(action, from_state, &session).await?;
        }
        Ok(())
    }

    /// One SAM step. `Ok(Some(..))` carries the auto-derived follow-up,
    /// `Ok(None)` ends the session.
    async fn step(
        &self,
        action: A,
        from_state: Option<S>,
        session: &Session,
    ) -> Result<Option<(A, Option<S>)>, EngineError> {
        {
            let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            self.gate(&inner, &action, session)?;
        }
        self.recorder.record(
            StepSnapshot::Action {
                action: action.clone(),
                from_state,
            },
            session,
        );

        // The only suspension point. The factory gets its own clone of the
        // action, no lock is held, and the loop waits indefinitely.
        let Some(proposal) = (self.factory)(action.clone()).await else {
            self.recorder
                .record(StepSnapshot::NoProposal { action }, session);
            return Ok(None);
        };
        self.recorder.record(
            StepSnapshot::Proposal {
                action: action.clone(),
                proposal: proposal.clone(),
            },
            session,
        );

        self.commit(action, proposal, session)
    }

    /// Gate re-check, presenter, model replacement, state match, and
    /// notification: one atomic section with respect to other sessions.
    fn commit(
        &self,
        action: A,
        proposal: P,
        session: &Session,
    ) -> Result<Option<(A, Option<S>)>, EngineError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        // A concurrent session may have committed a different state while
        // the factory was suspended; the gate runs again before mutating.
        self.gate(&inner, &action, session)?;

        let old_model = inner.model.clone();
        let Some(model) = (self.presenter)(proposal.clone(), old_model.clone()) else {
            self.recorder.record(
                StepSnapshot::NoModel {
                    proposal,
                    model: old_model,
                },
                session,
            );
            return Ok(None);
        };
        inner.model = model.clone();

        let diff = if self.recorder.is_enabled() {
            model_diff(&old_model, &model)
        } else {
            String::new()
        };
        self.recorder.record(
            StepSnapshot::Mutation {
                old_model,
                new_model: model.clone(),
                diff,
            },
            session,
        );

        let Some(index) = self.states.iter().position(|def| def.matches(&model)) else {
            self.recorder.record(
                StepSnapshot::NoState {
                    model: model.clone(),
                },
                session,
            );
            // Intentionally not auto-corrected: the last committed state
            // stays in force for gate checks until a new model matches.
            tracing::warn!(
                session = %session.id(),
                "model matches no state definition; engine is stuck until a mutation produces a matching model"
            );
            return Ok(None);
        };
        inner.current = index;
        let state = self.states[index].state().clone();
        self.recorder.record(
            StepSnapshot::State {
                model: model.clone(),
                state: state.clone(),
            },
            session,
        );

        self.notify(&model, &state);

        Ok(self.states[index]
            .derive_next(&model)
            .map(|next| (next, Some(state))))
    }

    /// Action gate: reject before any proposal creation or mutation.
    fn gate(&self, inner: &Inner<M>, action: &A, session: &Session) -> Result<(), EngineError> {
        let def = &self.states[inner.current];
        if !def.admits(action.id()) {
            self.recorder.record(
                StepSnapshot::Disallowed {
                    action: action.clone(),
                    state: def.state().clone(),
                },
                session,
            );
            return Err(EngineError::ActionBlocked {
                action: action.id().to_string(),
                state: def.state().id().to_string(),
            });
        }
        Ok(())
    }

    /// Notify observers in registration order.
    fn notify(&self, model: &M, state: &S) {
        let subscriptions = self
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for subscription in subscriptions {
            subscription(model, state);
        }
    }
}
