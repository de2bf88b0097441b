//! Home feed, the filterable study list, and title search.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, WithRoomError};
use crate::pagination;
use crate::types::Study;

/// Number of feed entries shown on the home screen.
pub const HOME_FEED_LIMIT: usize = 7;
/// The "more" affordance appears once the feed has more than this many studies.
pub const HOME_FEED_MORE_THRESHOLD: usize = 6;
/// Page size of the full study list.
pub const STUDY_LIST_PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeFeed {
    pub studies: Vec<Study>,
    pub has_more: bool,
}

impl HomeFeed {
    pub fn from_studies(mut all: Vec<Study>) -> Self {
        let has_more = all.len() > HOME_FEED_MORE_THRESHOLD;
        all.truncate(HOME_FEED_LIMIT);
        Self {
            studies: all,
            has_more,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterCategory {
    Topic,
    Difficulty,
    WeekDay,
    Type,
    State,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 5] = [
        FilterCategory::Topic,
        FilterCategory::Difficulty,
        FilterCategory::WeekDay,
        FilterCategory::Type,
        FilterCategory::State,
    ];

    /// Query parameter name sent to `/home/filter/info`.
    pub fn param(&self) -> &'static str {
        match self {
            FilterCategory::Topic => "topic",
            FilterCategory::Difficulty => "difficulty",
            FilterCategory::WeekDay => "weekDay",
            FilterCategory::Type => "type",
            FilterCategory::State => "state",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterCategory::Topic => "주제",
            FilterCategory::Difficulty => "난이도",
            FilterCategory::WeekDay => "요일",
            FilterCategory::Type => "유형",
            FilterCategory::State => "상태",
        }
    }

    /// Selectable values. Empty means free-form.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            FilterCategory::Topic => &[
                "개념학습",
                "응용/활용",
                "프로젝트",
                "챌린지",
                "자격증/시험",
                "취업/코테",
                "특강",
                "기타",
            ],
            FilterCategory::Difficulty => &["초급", "중급", "고급"],
            FilterCategory::WeekDay => &["월", "화", "수", "목", "금", "토", "일"],
            FilterCategory::Type => &["OFFLINE", "ONLINE"],
            FilterCategory::State => &[],
        }
    }

    fn accepts(&self, value: &str) -> bool {
        let options = self.options();
        options.is_empty() || options.contains(&value)
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.param())
    }
}

impl FromStr for FilterCategory {
    type Err = WithRoomError;

    fn from_str(s: &str) -> Result<Self> {
        FilterCategory::ALL
            .into_iter()
            .find(|c| c.param().eq_ignore_ascii_case(s))
            .ok_or_else(|| WithRoomError::Validation(format!("unknown filter '{s}'")))
    }
}

/// Selected value per filter category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyFilters {
    selected: BTreeMap<FilterCategory, String>,
}

impl StudyFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value`, or clear the category when `value` is already selected.
    pub fn toggle(&mut self, category: FilterCategory, value: &str) -> Result<()> {
        let value = value.trim();
        if self.selected.get(&category).map(String::as_str) == Some(value) {
            self.selected.remove(&category);
            return Ok(());
        }
        self.set(category, value)
    }

    pub fn set(&mut self, category: FilterCategory, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            self.selected.remove(&category);
            return Ok(());
        }
        if !category.accepts(value) {
            return Err(WithRoomError::Validation(format!(
                "'{value}' is not a valid {} ({}): choose one of {}",
                category.param(),
                category.label(),
                category.options().join(", ")
            )));
        }
        self.selected.insert(category, value.to_string());
        Ok(())
    }

    pub fn get(&self, category: FilterCategory) -> Option<&str> {
        self.selected.get(&category).map(String::as_str)
    }

    pub fn reset(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Query parameters for the non-empty filters, in category order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.selected
            .iter()
            .map(|(category, value)| (category.param(), value.clone()))
            .collect()
    }
}

/// The full study list with its current page.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyListState {
    pub studies: Vec<Study>,
    pub page: usize,
}

impl Default for StudyListState {
    fn default() -> Self {
        Self {
            studies: Vec::new(),
            page: 1,
        }
    }
}

impl StudyListState {
    /// Replace the list with fresh results (feed, filter or search) and go back to page 1.
    pub fn apply_results(&mut self, studies: Vec<Study>) {
        self.studies = studies;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = pagination::clamp_page(page, self.page_count());
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(&self.studies, STUDY_LIST_PAGE_SIZE)
    }

    pub fn visible(&self) -> &[Study] {
        pagination::slice(&self.studies, self.page, STUDY_LIST_PAGE_SIZE)
    }
}
