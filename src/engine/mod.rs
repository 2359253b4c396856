//! The loop controller and its construction surface.
//!
//! [`Engine`] composes the core vocabulary into the SAM step sequence:
//! gate check, proposal creation (the only suspension point), gate
//! re-check, presenter, state matching, subscription notification, and
//! optional auto-chaining, all within one session, trampolined so chain
//! length never grows the call stack.

mod builder;
mod error;
mod machine;
mod session;

pub use builder::{BuildError, EngineBuilder};
pub use error::EngineError;
pub use machine::{Engine, Presenter, ProposalFactory, Subscription};
pub use session::Session;
