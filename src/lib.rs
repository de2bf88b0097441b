pub mod actions;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod detail;
pub mod display;
pub mod error;
pub mod feed;
pub mod pagination;
pub mod remote;
pub mod render;
pub mod study_form;
pub mod tabs;
pub mod tui;
pub mod types;

#[cfg(test)]
mod test_guards;

pub use auth::{AuthContext, CredentialStore};
pub use config::Config;
pub use error::{ErrorCategory, Result, WithRoomError};
pub use remote::{HttpStudyApi, StudyApi};
pub use tabs::Tab;
pub use types::{Comment, Study, StudyDetail, StudyId};
