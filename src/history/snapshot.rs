//! Frozen snapshots of individual loop steps.

use crate::core::{ActionRequest, Model, Proposal, StateIdentity};

/// One step outcome of the SAM loop, with its payload frozen at record time.
///
/// Snapshots own clones of everything they reference, so later mutations of
/// the canonical model can never rewrite recorded history. One variant per
/// step kind: the happy path records `Action`, `Proposal`, `Mutation`, and
/// `State`; the remaining variants record halts and rejections with enough
/// context for postmortem diagnosis.
#[derive(Clone, Debug)]
pub enum StepSnapshot<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    /// The model supplied at construction, before initial state matching.
    ConstructorModel { initial_model: M },
    /// An action entered the loop. `from_state` is `None` for the first
    /// step of an externally triggered session.
    Action { action: A, from_state: Option<S> },
    /// The action gate rejected the action under the active state's policy.
    Disallowed { action: A, state: S },
    /// The proposal factory produced a proposal for the action.
    Proposal { action: A, proposal: P },
    /// The proposal factory declined; the step ended without transitioning.
    NoProposal { action: A },
    /// The presenter replaced the canonical model.
    Mutation {
        old_model: M,
        new_model: M,
        diff: String,
    },
    /// The presenter rejected the proposal; the model was left untouched.
    NoModel { proposal: P, model: M },
    /// A state definition matched the new model and was committed.
    State { model: M, state: S },
    /// No state definition matched; the engine is stuck at this model.
    NoState { model: M },
}

impl<M, P, A, S> StepSnapshot<M, P, A, S>
where
    M: Model,
    P: Proposal,
    A: ActionRequest,
    S: StateIdentity,
{
    /// Short tag naming the step kind, used in formatted history lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConstructorModel { .. } => "constructor-model",
            Self::Action { .. } => "action",
            Self::Disallowed { .. } => "disallow-action-proposal",
            Self::Proposal { .. } => "proposal",
            Self::NoProposal { .. } => "no-proposal",
            Self::Mutation { .. } => "mutation",
            Self::NoModel { .. } => "no-model",
            Self::State { .. } => "state",
            Self::NoState { .. } => "no-state",
        }
    }
}
