//! State definitions: named predicates over the model.
//!
//! A [`StateDefinition`] pairs a state identity with the predicate that
//! decides membership, an optional action restriction policy, and an
//! optional function deriving a follow-up action automatically. The engine
//! classifies the model by evaluating definitions in declaration order and
//! taking the first match, so declaration order is significant; predicate
//! sets should be mutually exclusive by construction.

use super::identity::{ActionRequest, StateIdentity};
use super::restriction::Restriction;
use std::fmt;
use std::sync::Arc;

/// Pure predicate deciding whether the model belongs to a state.
pub type StatePredicate<M> = Arc<dyn Fn(&M) -> bool + Send + Sync>;

/// Derives the next action automatically from the committed model.
pub type NextAction<M, A> = Arc<dyn Fn(&M) -> Option<A> + Send + Sync>;

/// One entry in the engine's ordered state list.
///
/// # Example
///
/// ```rust
/// use samloop::{StateDefinition, StateIdentity, ActionRequest};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum CounterState { ShowCount, MaxCount }
///
/// impl StateIdentity for CounterState {
///     fn id(&self) -> &str {
///         match self {
///             Self::ShowCount => "show-count",
///             Self::MaxCount => "max-count",
///         }
///     }
/// }
///
/// #[derive(Clone, Debug)]
/// struct Increment;
/// impl ActionRequest for Increment {
///     fn id(&self) -> &str { "increment" }
/// }
///
/// #[derive(Clone, Debug, serde::Serialize)]
/// struct Counter { count: u32 }
///
/// let max: StateDefinition<Counter, Increment, CounterState> =
///     StateDefinition::new(CounterState::MaxCount, |m: &Counter| m.count >= 10)
///         .disallow(["increment"]);
///
/// assert!(max.matches(&Counter { count: 10 }));
/// assert!(!max.admits("increment"));
/// assert!(max.admits("decrement"));
/// ```
pub struct StateDefinition<M, A, S> {
    state: S,
    predicate: StatePredicate<M>,
    restriction: Option<Restriction>,
    next_action: Option<NextAction<M, A>>,
}

impl<M, A, S: Clone> Clone for StateDefinition<M, A, S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            predicate: Arc::clone(&self.predicate),
            restriction: self.restriction.clone(),
            next_action: self.next_action.as_ref().map(Arc::clone),
        }
    }
}

impl<M, A, S: fmt::Debug> fmt::Debug for StateDefinition<M, A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("state", &self.state)
            .field("restriction", &self.restriction)
            .field("next_action", &self.next_action.is_some())
            .finish()
    }
}

impl<M, A, S> StateDefinition<M, A, S>
where
    A: ActionRequest,
    S: StateIdentity,
{
    /// Create a definition from a state identity and its membership predicate.
    pub fn new<F>(state: S, predicate: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        Self {
            state,
            predicate: Arc::new(predicate),
            restriction: None,
            next_action: None,
        }
    }

    /// Reject the listed action ids while this state is active.
    ///
    /// Replaces any previously set policy.
    pub fn disallow<I, T>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.restriction = Some(Restriction::disallow(actions));
        self
    }

    /// Admit only the listed action ids while this state is active.
    ///
    /// Replaces any previously set policy.
    pub fn strictly_allow<I, T>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.restriction = Some(Restriction::strictly_allow(actions));
        self
    }

    /// Derive a follow-up action automatically whenever this state commits.
    ///
    /// Returning `None` ends the session; returning `Some` chains another
    /// loop step within the same session.
    pub fn next_action<F>(mut self, derive: F) -> Self
    where
        F: Fn(&M) -> Option<A> + Send + Sync + 'static,
    {
        self.next_action = Some(Arc::new(derive));
        self
    }

    /// The state identity this definition names.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The restriction policy, if one is declared.
    pub fn restriction(&self) -> Option<&Restriction> {
        self.restriction.as_ref()
    }

    /// Evaluate the membership predicate.
    pub fn matches(&self, model: &M) -> bool {
        (self.predicate)(model)
    }

    /// Action gate: whether the given action id is admissible here.
    pub fn admits(&self, action_id: &str) -> bool {
        self.restriction
            .as_ref()
            .is_none_or(|policy| !policy.blocks(action_id))
    }

    /// Run the auto-next-action function, if declared.
    pub fn derive_next(&self, model: &M) -> Option<A> {
        self.next_action.as_ref().and_then(|derive| derive(model))
    }
}
