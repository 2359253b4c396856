//! Session correlation ids.

use serde::Serialize;
use uuid::Uuid;

/// Correlates one externally triggered action with every auto-chained
/// action it causes.
///
/// A fresh session is opened per `execute` call (and one for construction)
/// and stamped on every history entry the resulting chain records. Sessions
/// are never reused across calls.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Session {
    id: Uuid,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// The session's unique id.
    pub fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_are_unique() {
        assert_ne!(Session::new(), Session::new());
    }

    #[test]
    fn clones_share_the_id() {
        let session = Session::new();
        assert_eq!(session.clone().id(), session.id());
    }
}
