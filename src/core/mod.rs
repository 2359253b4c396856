//! Core vocabulary of the SAM loop.
//!
//! This module contains the pure building blocks the engine composes:
//! - Identity traits tagging actions, proposals, and states
//! - The `Model` bound (clone-based defensive copies, serializable for diffs)
//! - Restriction policies and the action gate
//! - State definitions with predicates and auto-next-action functions
//!
//! Everything here is pure and synchronous; the asynchronous loop lives in
//! [`crate::engine`].

mod identity;
mod model;
mod restriction;
mod state;

pub use identity::{ActionRequest, Proposal, StateIdentity};
pub use model::Model;
pub use restriction::Restriction;
pub use state::{NextAction, StateDefinition, StatePredicate};
