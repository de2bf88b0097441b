use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{Result, WithRoomError};
use crate::types::Study;

/// User-facing message shown when a tab fails to load.
pub const FETCH_ERROR_MESSAGE: &str = "스터디 목록을 불러오는데 실패했습니다.";

/// One of the five "My Info" views of the user's relationship to studies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Created,
    Participating,
    RequestJoin,
    Liked,
    Join,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Created,
        Tab::Participating,
        Tab::RequestJoin,
        Tab::Liked,
        Tab::Join,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Tab::Created => "/study/mypage/info/mystudy",
            Tab::Participating => "/study/mypage/info/part",
            Tab::RequestJoin => "/study/mypage/info/request-join",
            Tab::Liked => "/study/mypage/info/interest",
            Tab::Join => "/study/mypage/info/join",
        }
    }

    pub fn response_field(&self) -> &'static str {
        match self {
            Tab::Created => "groupLeaderStudies",
            Tab::Participating => "participationStudies",
            Tab::RequestJoin => "responseSignUpStudies",
            Tab::Liked => "interestStudies",
            Tab::Join => "signUpStudies",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Created => "내가 만든 스터디",
            Tab::Participating => "참여 중 스터디",
            Tab::RequestJoin => "참여 신청 온 스터디",
            Tab::Liked => "관심 스터디",
            Tab::Join => "신청한 스터디",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            Tab::Created => "생성한 스터디가 없습니다.",
            Tab::Participating => "참여 중인 스터디가 없습니다.",
            Tab::RequestJoin => "참여 신청 온 스터디가 없습니다.",
            Tab::Liked => "관심 스터디가 없습니다.",
            Tab::Join => "참여 신청한 스터디가 없습니다.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Created => "created",
            Tab::Participating => "participating",
            Tab::RequestJoin => "request-join",
            Tab::Liked => "liked",
            Tab::Join => "join",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tab {
    type Err = WithRoomError;

    fn from_str(s: &str) -> Result<Self> {
        Tab::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                WithRoomError::Validation(format!(
                    "unknown tab '{s}' (expected created, participating, request-join, liked or join)"
                ))
            })
    }
}

/// Pull the tab's study array out of a response body.
///
/// A missing or null field is an empty tab, not an error.
pub fn extract_tab_studies(tab: Tab, body: &Value) -> Result<Vec<Study>> {
    match body.get(tab.response_field()) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(field @ Value::Array(_)) => {
            serde_json::from_value(field.clone()).map_err(|e| WithRoomError::MalformedResponse {
                endpoint: tab.endpoint().to_string(),
                detail: e.to_string(),
            })
        }
        Some(other) => Err(WithRoomError::MalformedResponse {
            endpoint: tab.endpoint().to_string(),
            detail: format!("'{}' is not an array: {other}", tab.response_field()),
        }),
    }
}

/// A fetch issued for one tab, tagged with the generation it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub tab: Tab,
    pub generation: u64,
}

/// Active tab and page of the dashboard.
///
/// Every tab selection or reload bumps `generation` so responses from an
/// earlier fetch can be recognized and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabState {
    pub active: Tab,
    pub page: usize,
    pub generation: u64,
}

impl Default for TabState {
    fn default() -> Self {
        Self {
            active: Tab::Created,
            page: 1,
            generation: 0,
        }
    }
}

impl TabState {
    pub fn select(&mut self, tab: Tab) -> FetchRequest {
        self.active = tab;
        self.page = 1;
        self.generation += 1;
        self.current_request()
    }

    /// Refetch the active tab, keeping the page.
    pub fn reload(&mut self) -> FetchRequest {
        self.generation += 1;
        self.current_request()
    }

    pub fn current_request(&self) -> FetchRequest {
        FetchRequest {
            tab: self.active,
            generation: self.generation,
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn is_current(&self, request: &FetchRequest) -> bool {
        request.tab == self.active && request.generation == self.generation
    }
}
