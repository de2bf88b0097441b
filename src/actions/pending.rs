use std::collections::HashSet;

use crate::types::StudyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Like,
    Join,
    Accept,
    Reject,
    Finish,
    Delete,
    Comment,
}

/// One in-flight mutation: what it does and which study row it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionKey {
    pub kind: ActionKind,
    pub study_id: StudyId,
    pub member_id: Option<u64>,
}

impl ActionKey {
    pub fn new(kind: ActionKind, study_id: StudyId) -> Self {
        Self {
            kind,
            study_id,
            member_id: None,
        }
    }

    pub fn for_member(kind: ActionKind, study_id: StudyId, member_id: u64) -> Self {
        Self {
            kind,
            study_id,
            member_id: Some(member_id),
        }
    }
}

/// Mutations currently awaiting a response. A trigger whose key is present
/// stays disabled until the response arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingActions {
    in_flight: HashSet<ActionKey>,
}

impl PendingActions {
    /// Mark `key` in flight. Returns `false` if it already was.
    pub fn try_begin(&mut self, key: ActionKey) -> bool {
        self.in_flight.insert(key)
    }

    pub fn finish(&mut self, key: &ActionKey) {
        self.in_flight.remove(key);
    }

    pub fn is_pending(&self, key: &ActionKey) -> bool {
        self.in_flight.contains(key)
    }

    /// Any action in flight for this study row.
    pub fn is_busy(&self, study_id: StudyId, member_id: Option<u64>) -> bool {
        self.in_flight
            .iter()
            .any(|k| k.study_id == study_id && (k.member_id.is_none() || k.member_id == member_id))
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}
