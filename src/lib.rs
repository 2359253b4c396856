//! Samloop: a State-Action-Model orchestration engine
//!
//! Samloop drives the SAM loop: an externally raised action request is
//! converted into a proposal, the proposal is applied to a mutable model by
//! a pure presenter, the resulting model is classified into exactly one
//! named state, observers are notified, and the new state may auto-derive a
//! follow-up action that chains within the same session.
//!
//! # Core Concepts
//!
//! - **Action / Proposal / State identities**: tagged enums implementing
//!   [`ActionRequest`], [`Proposal`], and [`StateIdentity`]
//! - **State definitions**: ordered predicates over the model with optional
//!   action restrictions and auto-next-action functions
//! - **Defensive copies**: the engine owns the sole mutable model; every
//!   collaborator sees an independent clone or an immutable borrow
//! - **Debug history**: an optional append-only trace of every loop step
//!   with structural diffs and strictly ordered printing
//!
//! # Example
//!
//! ```rust
//! use samloop::{ActionRequest, EngineBuilder, Proposal, StateDefinition, StateIdentity};
//! use serde::Serialize;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Clone, Debug, Serialize, PartialEq)]
//! struct Counter {
//!     count: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! impl ActionRequest for CounterAction {
//!     fn id(&self) -> &str {
//!         match self {
//!             Self::Increment => "increment",
//!         }
//!     }
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterProposal {
//!     Add(u32),
//! }
//!
//! impl Proposal for CounterProposal {
//!     fn id(&self) -> &str {
//!         match self {
//!             Self::Add(_) => "add",
//!         }
//!     }
//! }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum CounterState {
//!     ShowCount,
//!     MaxCount,
//! }
//!
//! impl StateIdentity for CounterState {
//!     fn id(&self) -> &str {
//!         match self {
//!             Self::ShowCount => "show-count",
//!             Self::MaxCount => "max-count",
//!         }
//!     }
//! }
//!
//! let engine = EngineBuilder::new()
//!     .model(Counter { count: 0 })
//!     .proposal_factory(|action: CounterAction| async move {
//!         match action {
//!             CounterAction::Increment => Some(CounterProposal::Add(1)),
//!         }
//!     })
//!     .presenter(|CounterProposal::Add(delta), model: Counter| {
//!         let next = model.count + delta;
//!         (next <= 10).then_some(Counter { count: next })
//!     })
//!     .state(StateDefinition::new(CounterState::ShowCount, |m: &Counter| m.count < 10))
//!     .state(StateDefinition::new(CounterState::MaxCount, |m: &Counter| m.count >= 10))
//!     .build()
//!     .unwrap();
//!
//! let seen: Arc<Mutex<Vec<(Counter, CounterState)>>> = Arc::default();
//! let sink = Arc::clone(&seen);
//! engine.subscribe(Arc::new(move |model: &Counter, state: &CounterState| {
//!     sink.lock().unwrap().push((model.clone(), state.clone()));
//! }));
//!
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_all()
//!     .build()
//!     .unwrap();
//! runtime.block_on(async {
//!     engine.execute(CounterAction::Increment).await.unwrap();
//! });
//!
//! let transitions = seen.lock().unwrap();
//! assert_eq!(
//!     transitions.last(),
//!     Some(&(Counter { count: 1 }, CounterState::ShowCount))
//! );
//! ```

pub mod core;
pub mod engine;
pub mod history;

// Re-export the public surface at the crate root. The `crate::` prefix
// keeps the module name from colliding with the `core` prelude crate.
pub use crate::core::{
    ActionRequest, Model, NextAction, Proposal, Restriction, StateDefinition, StateIdentity,
    StatePredicate,
};
pub use crate::engine::{
    BuildError, Engine, EngineBuilder, EngineError, Presenter, ProposalFactory, Session,
    Subscription,
};
pub use crate::history::{
    model_diff, HistoryEntry, MemorySink, StepSnapshot, TraceSink, TracingSink,
};
