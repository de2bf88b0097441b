use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use crate::feed::FilterCategory;
use crate::render::LayoutMode;
use crate::tabs::Tab;
use crate::types::{Difficulty, StudyType, Weekday};

#[derive(Parser)]
#[command(name = "withroom")]
#[command(about = "Find, create and run study groups on WITH ROOM")]
#[command(version)]
pub struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output switch for commands that print data.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store the access token issued by the OAuth callback
    Login {
        /// Access token
        #[arg(long)]
        token: String,
    },

    /// Log out and forget the stored token
    Logout,

    /// Show the login state and nickname
    Whoami {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// Show the home feed
    Home {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// List all studies
    #[command(visible_alias = "ls")]
    List {
        /// Page to show (8 studies per page)
        #[arg(short, long, default_value = "1")]
        page: usize,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// List studies matching filters
    Filter {
        /// Topic (개념학습, 응용/활용, 프로젝트, 챌린지, 자격증/시험, 취업/코테, 특강, 기타)
        #[arg(long)]
        topic: Option<String>,

        /// Difficulty (초급, 중급, 고급)
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,

        /// Meeting day (월..일)
        #[arg(long, value_parser = parse_weekday)]
        weekday: Option<Weekday>,

        /// Study type (online, offline)
        #[arg(long = "type", value_parser = parse_study_type)]
        study_type: Option<StudyType>,

        /// Recruiting state
        #[arg(long)]
        state: Option<String>,

        #[arg(short, long, default_value = "1")]
        page: usize,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Search studies by title
    Search {
        title: String,

        #[arg(short, long, default_value = "1")]
        page: usize,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Show one of your study lists
    My {
        /// created, participating, request-join, liked, join
        #[arg(short, long, default_value = "created", value_parser = parse_tab)]
        tab: Tab,

        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Card layout (wide, compact); defaults to the configured layout
        #[arg(long, value_parser = parse_layout)]
        layout: Option<LayoutMode>,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Show a study with its schedule and comments
    #[command(visible_alias = "s")]
    Show {
        id: u64,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Toggle interest in a study
    Like { id: u64 },

    /// Apply to join a study
    Join { id: u64 },

    /// Accept a join request
    Accept {
        id: u64,
        /// Applicant's member ID
        member: u64,
    },

    /// Reject a join request
    Reject {
        id: u64,
        /// Applicant's member ID
        member: u64,
    },

    /// Close a study you lead
    Finish { id: u64 },

    /// Delete a study you lead
    Delete { id: u64 },

    /// Manage comments on a study
    Comment {
        #[command(subcommand)]
        action: CommentAction,
    },

    /// Create a study
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Open the interactive dashboard
    #[command(visible_alias = "ui")]
    Dashboard {
        #[arg(long, value_parser = parse_layout)]
        layout: Option<LayoutMode>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CommentAction {
    /// Post a comment
    Add {
        id: u64,
        content: String,
        /// Hide your nickname
        #[arg(long)]
        anonymous: bool,
    },
    /// Delete a comment
    Delete { id: u64, comment_id: u64 },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Set a configuration value (domain, remote_timeout, layout)
    Set { key: String, value: String },
    /// Print one configuration value
    Get { key: String },
}

/// Fields of the study creation wizard.
#[derive(Args, Debug, Clone, Default)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: Option<String>,

    /// online or offline
    #[arg(long = "type", value_parser = parse_study_type)]
    pub study_type: Option<StudyType>,

    /// Number of members to recruit
    #[arg(long)]
    pub recruit: Option<u32>,

    #[arg(long)]
    pub topic: Option<String>,

    /// Meeting days, comma separated (e.g. "월,수")
    #[arg(long, value_delimiter = ',', value_parser = parse_weekday)]
    pub days: Vec<Weekday>,

    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<String>,

    /// Meeting frequency, e.g. "주 2회"
    #[arg(long)]
    pub period: Option<String>,

    /// Meeting time, e.g. "19:00"
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub introduction: Option<String>,

    #[arg(long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,

    /// Comma separated tags (at most 5)
    #[arg(long)]
    pub tags: Option<String>,

    /// Kakao open chat link
    #[arg(long)]
    pub chat_url: Option<String>,

    /// Cover image to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self, assume_yes: bool) -> crate::error::Result<()> {
        use crate::commands::{
            PromptConfirm, cmd_accept, cmd_comment_add, cmd_comment_delete, cmd_config_get,
            cmd_config_set, cmd_config_show, cmd_create, cmd_dashboard, cmd_delete, cmd_filter,
            cmd_finish, cmd_home, cmd_join, cmd_like, cmd_list, cmd_login, cmd_logout, cmd_my,
            cmd_reject, cmd_search, cmd_show, cmd_whoami,
        };

        let mut confirm = PromptConfirm::new(assume_yes);

        match self {
            Commands::Login { token } => cmd_login(token).await,
            Commands::Logout => cmd_logout().await,
            Commands::Whoami { output } => cmd_whoami(output).await,

            Commands::Home { output } => cmd_home(output).await,
            Commands::List { page, output } => cmd_list(page, output).await,
            Commands::Filter {
                topic,
                difficulty,
                weekday,
                study_type,
                state,
                page,
                output,
            } => {
                let mut selected = Vec::new();
                if let Some(topic) = topic {
                    selected.push((FilterCategory::Topic, topic));
                }
                if let Some(d) = difficulty {
                    selected.push((FilterCategory::Difficulty, d.label().to_string()));
                }
                if let Some(day) = weekday {
                    selected.push((FilterCategory::WeekDay, day.label().to_string()));
                }
                if let Some(t) = study_type {
                    selected.push((FilterCategory::Type, t.wire_value().to_string()));
                }
                if let Some(state) = state {
                    selected.push((FilterCategory::State, state));
                }
                cmd_filter(&selected, page, output).await
            }
            Commands::Search {
                title,
                page,
                output,
            } => cmd_search(&title, page, output).await,
            Commands::My {
                tab,
                page,
                layout,
                output,
            } => cmd_my(tab, page, layout, output).await,

            Commands::Show { id, output } => cmd_show(id, output).await,
            Commands::Like { id } => cmd_like(id, &mut confirm).await,
            Commands::Join { id } => cmd_join(id, &mut confirm).await,
            Commands::Accept { id, member } => cmd_accept(id, member, &mut confirm).await,
            Commands::Reject { id, member } => cmd_reject(id, member, &mut confirm).await,
            Commands::Finish { id } => cmd_finish(id, &mut confirm).await,
            Commands::Delete { id } => cmd_delete(id, &mut confirm).await,

            Commands::Comment { action } => match action {
                CommentAction::Add {
                    id,
                    content,
                    anonymous,
                } => cmd_comment_add(id, &content, anonymous).await,
                CommentAction::Delete { id, comment_id } => {
                    cmd_comment_delete(id, comment_id, &mut confirm).await
                }
            },

            Commands::Create(args) => cmd_create(args, &mut confirm).await,
            Commands::Dashboard { layout } => cmd_dashboard(layout).await,

            Commands::Config { action } => match action {
                ConfigAction::Show { output } => cmd_config_show(output),
                ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
                ConfigAction::Get { key } => cmd_config_get(&key),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T: FromStr>(
    s: &str,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    parse_with_validation(s, "difficulty", &["초급", "중급", "고급"])
}

fn parse_study_type(s: &str) -> Result<StudyType, String> {
    parse_with_validation(s, "type", &["online", "offline"])
}

fn parse_weekday(s: &str) -> Result<Weekday, String> {
    parse_with_validation(s, "weekday", &["월", "화", "수", "목", "금", "토", "일"])
}

fn parse_tab(s: &str) -> Result<Tab, String> {
    let names: Vec<&str> = Tab::ALL.iter().map(|t| t.as_str()).collect();
    parse_with_validation(s, "tab", &names)
}

fn parse_layout(s: &str) -> Result<LayoutMode, String> {
    parse_with_validation(s, "layout", &["wide", "compact"])
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "withroom", &mut io::stdout());
}
