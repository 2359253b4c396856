//! Engine runtime and construction errors.
//!
//! Only two conditions are hard errors: an initial model that does not
//! classify into exactly one state, and an action rejected by the active
//! state's restriction policy. Soft halts (no proposal, presenter
//! rejection, no matching state) end the step without transitioning and are
//! recorded in the debug history instead of being raised.

use thiserror::Error;

/// Errors raised by the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The constructor-supplied model must match exactly one state
    /// definition; matching zero (a gap) or several (an overlap) both fail
    /// construction.
    #[error("invalid initial model: matched {matched} state definitions, expected exactly one")]
    InvalidInitialModel { matched: usize },

    /// The action gate rejected the action under the active state's
    /// restriction policy, before any proposal was created or the model
    /// touched.
    #[error("action '{action}' blocked by restriction policy of state '{state}'")]
    ActionBlocked { action: String, state: String },
}
