mod comment;
mod config;
mod create;
mod dashboard;
mod feed;
mod my;
mod session;
mod study;

pub use comment::{cmd_comment_add, cmd_comment_delete};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use create::{cmd_create, draft_from_args};
pub use dashboard::cmd_dashboard;
pub use feed::{cmd_filter, cmd_home, cmd_list, cmd_search};
pub use my::cmd_my;
pub use session::{cmd_login, cmd_logout, cmd_whoami};
pub use study::{cmd_accept, cmd_delete, cmd_finish, cmd_join, cmd_like, cmd_reject, cmd_show};

use std::io::{self, BufRead, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::{Value, json};

use crate::actions::Confirm;
use crate::auth::CredentialStore;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;
use crate::remote::HttpStudyApi;
use crate::types::Study;

/// Build the API client from the stored configuration and token.
pub(crate) fn connect() -> Result<HttpStudyApi> {
    let config = Config::load()?;
    let auth = CredentialStore::open()?.load()?;
    HttpStudyApi::from_config(&config, auth)
}

/// Command result printed either as JSON or as human-readable text.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn study_json(study: &Study) -> Value {
    json!({
        "studyId": study.study_id,
        "title": study.title,
        "topic": study.topic,
        "difficulty": study.difficulty.map(|d| d.label()),
        "type": study.study_type.map(|t| t.wire_value()),
        "tags": study.display_tags(),
        "nowPeople": study.now_people,
        "recruitPeople": study.recruit_people,
        "interest": study.interest,
        "closed": study.is_closed(),
        "memberId": study.member_id,
        "nickName": study.nick_name,
    })
}

/// y/N prompt on the terminal. `--yes` answers every prompt with yes; with
/// no terminal attached every prompt is declined.
pub struct PromptConfirm {
    assume_yes: bool,
}

impl PromptConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for PromptConfirm {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if !io::stdin().is_terminal() {
            eprintln!(
                "{} {title}: {message} (pass --yes to confirm non-interactively)",
                "skipped".yellow()
            );
            return false;
        }

        eprint!("{} {message} [y/N] ", format!("{title}:").bold());
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes" | "예")
    }
}

/// Print the "cancelled" notice used by every confirmable command.
pub(crate) fn print_cancelled() {
    println!("{}", "취소되었습니다.".dimmed());
}
