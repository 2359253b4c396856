//! Identity traits for actions, proposals, and states.
//!
//! Every value flowing through the SAM loop carries a stable string
//! discriminator. Implementors are expected to be enums, so that the
//! compiler enforces exhaustive handling of every kind.

use std::fmt::Debug;

/// Caller-issued intent to change the model.
///
/// The `id` is the stable discriminator used by restriction policies;
/// payload fields live on the implementing enum's variants.
///
/// # Example
///
/// ```rust
/// use samloop::ActionRequest;
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     ChangeCount(u32),
/// }
///
/// impl ActionRequest for CounterAction {
///     fn id(&self) -> &str {
///         match self {
///             Self::ChangeCount(_) => "change-count",
///         }
///     }
/// }
///
/// assert_eq!(CounterAction::ChangeCount(3).id(), "change-count");
/// ```
pub trait ActionRequest: Clone + Debug + Send + Sync + 'static {
    /// Stable discriminator for this action kind.
    fn id(&self) -> &str;
}

/// A vetted, concrete candidate mutation derived from an action.
pub trait Proposal: Clone + Debug + Send + Sync + 'static {
    /// Stable discriminator for this proposal kind.
    fn id(&self) -> &str;
}

/// Identity of a named state the model can be classified into.
///
/// `PartialEq` is required so callers can compare the committed state
/// against expectations in subscriptions and tests.
pub trait StateIdentity: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Stable discriminator for this state.
    fn id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestState {
        Ready,
        Counting,
    }

    impl StateIdentity for TestState {
        fn id(&self) -> &str {
            match self {
                Self::Ready => "ready",
                Self::Counting => "counting",
            }
        }
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Start,
        Decrement { by: u32 },
    }

    impl ActionRequest for TestAction {
        fn id(&self) -> &str {
            match self {
                Self::Start => "start",
                Self::Decrement { .. } => "decrement",
            }
        }
    }

    #[test]
    fn action_id_is_stable_across_payloads() {
        assert_eq!(TestAction::Decrement { by: 1 }.id(), "decrement");
        assert_eq!(TestAction::Decrement { by: 9 }.id(), "decrement");
        assert_eq!(TestAction::Start.id(), "start");
    }

    #[test]
    fn state_identity_is_comparable() {
        assert_eq!(TestState::Ready, TestState::Ready);
        assert_ne!(TestState::Ready, TestState::Counting);
        assert_eq!(TestState::Counting.id(), "counting");
    }
}
