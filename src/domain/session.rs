use super::TxId;

/// Tracks whether the next submit creates a new transaction or updates an
/// existing one. Exactly one session exists per service instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    /// Next submit creates a new transaction
    #[default]
    Idle,
    /// Next submit updates the transaction with this id
    Editing(TxId),
}

impl EditSession {
    /// Start editing the given id, replacing any previous target.
    pub fn begin(&mut self, id: TxId) {
        *self = EditSession::Editing(id);
    }

    /// Return to idle: after a successful update, an explicit cancel, or
    /// deletion of the edited id.
    pub fn reset(&mut self) {
        *self = EditSession::Idle;
    }

    /// The id under edit, if any.
    pub fn editing(&self) -> Option<TxId> {
        match self {
            EditSession::Editing(id) => Some(*id),
            EditSession::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditSession::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let session = EditSession::default();
        assert!(session.is_idle());
        assert_eq!(session.editing(), None);
    }

    #[test]
    fn test_begin_from_any_state() {
        let mut session = EditSession::default();

        session.begin(3);
        assert_eq!(session.editing(), Some(3));

        // Beginning again retargets without passing through idle
        session.begin(5);
        assert_eq!(session.editing(), Some(5));
    }

    #[test]
    fn test_reset() {
        let mut session = EditSession::default();
        session.begin(3);
        session.reset();
        assert!(session.is_idle());

        // Resetting an idle session stays idle
        session.reset();
        assert!(session.is_idle());
    }
}
