//! Pure list/card rendering shared by the CLI and the dashboard.
//!
//! One renderer covers both layouts; [`LayoutMode`] only changes page size
//! and how much of each card is shown.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WithRoomError};
use crate::types::{Study, StudyId};

pub const CLOSED_LABEL: &str = "마감됨";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Wide,
    Compact,
}

impl LayoutMode {
    pub fn page_size(&self) -> usize {
        match self {
            LayoutMode::Wide => 6,
            LayoutMode::Compact => 4,
        }
    }

    pub fn toggle(&self) -> LayoutMode {
        match self {
            LayoutMode::Wide => LayoutMode::Compact,
            LayoutMode::Compact => LayoutMode::Wide,
        }
    }

    fn max_title_chars(&self) -> usize {
        match self {
            LayoutMode::Wide => 40,
            LayoutMode::Compact => 20,
        }
    }

    fn max_tags(&self) -> usize {
        match self {
            LayoutMode::Wide => 5,
            LayoutMode::Compact => 2,
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Wide => write!(f, "wide"),
            LayoutMode::Compact => write!(f, "compact"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = WithRoomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wide" => Ok(LayoutMode::Wide),
            "compact" => Ok(LayoutMode::Compact),
            other => Err(WithRoomError::Config(format!(
                "invalid layout '{other}' (expected wide or compact)"
            ))),
        }
    }
}

/// Identity of a rendered card. Request-join rows repeat a study once per
/// applicant, so the applicant is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardKey {
    pub study_id: StudyId,
    pub member_id: Option<u64>,
}

impl CardKey {
    pub fn of(study: &Study) -> Self {
        Self {
            study_id: study.study_id,
            member_id: study.member_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Open { now: u32, recruit: u32 },
    Closed,
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Open { now, recruit } => write!(f, "{now}/{recruit}"),
            Capacity::Closed => write!(f, "{CLOSED_LABEL}"),
        }
    }
}

/// Which affordances a card offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardVariant {
    #[default]
    Standard,
    /// Rows of the request-join tab
    JoinRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardActions {
    Join { enabled: bool },
    Respond {
        applicant: String,
        preferred_area: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyCardView {
    pub key: CardKey,
    pub title: String,
    pub liked: bool,
    pub tags: Vec<String>,
    pub difficulty: Option<&'static str>,
    pub study_type: Option<&'static str>,
    pub capacity: Capacity,
    pub actions: CardActions,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListContent {
    #[default]
    Loading,
    Error(String),
    Empty(String),
    Cards {
        layout: LayoutMode,
        cards: Vec<StudyCardView>,
    },
}

/// Decide what a list area shows: loading wins, then error, then the empty
/// message, then one card per visible study.
pub fn render_list(
    loading: bool,
    error: Option<&str>,
    visible: &[Study],
    empty_message: &str,
    variant: CardVariant,
    layout: LayoutMode,
) -> ListContent {
    if loading {
        return ListContent::Loading;
    }
    if let Some(error) = error {
        return ListContent::Error(error.to_string());
    }
    if visible.is_empty() {
        return ListContent::Empty(empty_message.to_string());
    }
    ListContent::Cards {
        layout,
        cards: visible
            .iter()
            .map(|study| render_card(study, variant, layout))
            .collect(),
    }
}

pub fn render_card(study: &Study, variant: CardVariant, layout: LayoutMode) -> StudyCardView {
    let capacity = if study.is_closed() {
        Capacity::Closed
    } else {
        Capacity::Open {
            now: study.now_people,
            recruit: study.recruit_people,
        }
    };

    let actions = match variant {
        CardVariant::Standard => CardActions::Join {
            enabled: study.can_join(),
        },
        CardVariant::JoinRequest => CardActions::Respond {
            applicant: study
                .nick_name
                .clone()
                .unwrap_or_else(|| "알 수 없음".to_string()),
            preferred_area: study.preferred_area.clone(),
        },
    };

    StudyCardView {
        key: CardKey::of(study),
        title: truncate(&study.title, layout.max_title_chars()),
        liked: study.interest,
        tags: study
            .display_tags()
            .into_iter()
            .take(layout.max_tags())
            .map(|t| format!("#{t}"))
            .collect(),
        difficulty: study.difficulty.map(|d| d.label()),
        study_type: study.study_type.map(|t| t.label()),
        capacity,
        actions,
    }
}

/// Shorten to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
