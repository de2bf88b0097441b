//! Study detail view state.

use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;

use crate::error::Result;
use crate::feed::StudyFilters;
use crate::remote::StudyApi;
use crate::types::{Schedule, StudyDetail, StudyId};

pub const DETAIL_LOAD_FAILED: &str = "스터디 정보를 불러오지 못했습니다.";

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("html tag regex should be valid"));
static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</p>").expect("line break regex should be valid")
});

#[derive(Debug, Clone)]
pub struct LoadedDetail {
    pub detail: StudyDetail,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub enum DetailState {
    Loading,
    Loaded(Box<LoadedDetail>),
    /// Load failed; the view offers a retry instead of waiting forever
    Failed(String),
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading)
    }

    pub fn can_retry(&self) -> bool {
        matches!(self, DetailState::Failed(_))
    }
}

/// Past its end day, or explicitly finished by the leader.
pub fn is_finished(schedule: &Schedule, finish_flag: Option<bool>, today: Date) -> bool {
    schedule.is_past_end(today) || finish_flag == Some(true)
}

/// The server's finish flag for a study, read from the unfiltered study list.
///
/// The detail endpoint does not carry it. Lookup failures count as "not
/// finished" so they never block the detail view.
pub async fn resolve_finish_flag(api: &impl StudyApi, study_id: StudyId) -> Option<bool> {
    match api.filter_feed(&StudyFilters::new()).await {
        Ok(studies) => studies
            .into_iter()
            .find(|s| s.study_id == study_id)
            .and_then(|s| s.finish),
        Err(e) => {
            tracing::warn!(study_id, error = %e, "could not look up finish flag");
            None
        }
    }
}

pub async fn fetch_detail(
    api: &impl StudyApi,
    study_id: StudyId,
    today: Date,
) -> Result<LoadedDetail> {
    let detail = api.study_detail(study_id).await?;
    let flag = resolve_finish_flag(api, study_id).await;
    let finished = is_finished(&detail.study_schedule_detail, flag, today);
    Ok(LoadedDetail { detail, finished })
}

/// Load the detail view, turning any failure into the `Failed` state.
pub async fn load_detail(api: &impl StudyApi, study_id: StudyId, today: Date) -> DetailState {
    match fetch_detail(api, study_id, today).await {
        Ok(loaded) => DetailState::Loaded(Box::new(loaded)),
        Err(e) => {
            tracing::warn!(study_id, error = %e, "study detail failed to load");
            DetailState::Failed(format!("{DETAIL_LOAD_FAILED} ({e})"))
        }
    }
}

/// Introduction HTML reduced to plain text for the terminal.
pub fn plain_text(html: &str) -> String {
    let with_breaks = BREAK_RE.replace_all(html, "\n");
    let stripped = TAG_RE.replace_all(&with_breaks, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
