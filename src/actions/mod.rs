//! User actions that mutate server state.
//!
//! Each action validates locally, asks for confirmation where the flow
//! requires it, sends one mutation, and reports the server's verdict. Local
//! state is only changed by the caller after a successful result.

pub mod comment;
pub mod join;
pub mod like;
pub mod pending;
pub mod respond;
pub mod study;

pub use comment::{COMMENT_MAX_CHARS, create_comment, delete_comment, validate_comment};
pub use join::join_study;
pub use like::{LikeOutcome, check_like_allowed, send_like_toggle, toggle_like};
pub use pending::{ActionKey, ActionKind, PendingActions};
pub use respond::respond_to_request;
pub use study::{delete_study, finish_study};

/// Yes/no prompt shown before a mutation.
pub trait Confirm {
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str, &str) -> bool,
{
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self(title, message)
    }
}

/// Outcome of an action that may be declined at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmed<T> {
    Done(T),
    Cancelled,
}

#[cfg(test)]
pub(crate) fn always_yes() -> impl FnMut(&str, &str) -> bool {
    |_: &str, _: &str| true
}

#[cfg(test)]
pub(crate) fn always_no() -> impl FnMut(&str, &str) -> bool {
    |_: &str, _: &str| false
}
