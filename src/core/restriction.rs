//! Per-state action restriction policies.
//!
//! A state definition may carry a policy limiting which actions are
//! admissible while that state is active. The action gate evaluates the
//! policy against the action's discriminator before any proposal is
//! created or any mutation happens.

/// Restriction policy over action discriminators.
///
/// # Example
///
/// ```rust
/// use samloop::Restriction;
///
/// let ready = Restriction::strictly_allow(["start-countdown"]);
/// assert!(!ready.blocks("start-countdown"));
/// assert!(ready.blocks("decrement-count"));
///
/// let launched = Restriction::disallow(["decrement-count"]);
/// assert!(launched.blocks("decrement-count"));
/// assert!(!launched.blocks("reset-countdown"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Restriction {
    /// Every listed action id is rejected; everything else is admitted.
    Disallow(Vec<String>),
    /// Only the listed action ids are admitted; everything else is rejected.
    StrictlyAllow(Vec<String>),
}

impl Restriction {
    /// Build a `Disallow` policy from anything yielding action ids.
    pub fn disallow<I, T>(actions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Restriction::Disallow(actions.into_iter().map(Into::into).collect())
    }

    /// Build a `StrictlyAllow` policy from anything yielding action ids.
    pub fn strictly_allow<I, T>(actions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Restriction::StrictlyAllow(actions.into_iter().map(Into::into).collect())
    }

    /// Whether this policy rejects the given action id.
    pub fn blocks(&self, action_id: &str) -> bool {
        match self {
            Restriction::Disallow(ids) => ids.iter().any(|id| id == action_id),
            Restriction::StrictlyAllow(ids) => !ids.iter().any(|id| id == action_id),
        }
    }
}
