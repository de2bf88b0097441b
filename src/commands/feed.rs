//! Home feed, full list, filtered list and title search.

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, connect, study_json};
use crate::cli::OutputOptions;
use crate::display::{format_list, format_page_footer};
use crate::error::Result;
use crate::feed::{FilterCategory, HomeFeed, StudyFilters, StudyListState};
use crate::remote::StudyApi;
use crate::render::{CardVariant, LayoutMode, render_list};
use crate::types::Study;

const EMPTY_LIST: &str = "조건에 맞는 스터디가 없습니다.";

pub async fn cmd_home(output: OutputOptions) -> Result<()> {
    let api = connect()?;
    let feed = HomeFeed::from_studies(api.home_feed().await?);

    let content = render_list(
        false,
        None,
        &feed.studies,
        "등록된 스터디가 없습니다.",
        CardVariant::Standard,
        LayoutMode::Wide,
    );
    let mut text = format_list(&content);
    if feed.has_more {
        text.push_str(&format!("\n{}", "더보기: withroom list".dimmed()));
    }

    CommandOutput::new(json!({
        "studies": feed.studies.iter().map(study_json).collect::<Vec<_>>(),
        "hasMore": feed.has_more,
    }))
    .with_text(text)
    .print(output)
}

/// Filters from command-line selections; values are checked against each category.
pub(crate) fn build_filters(selected: &[(FilterCategory, String)]) -> Result<StudyFilters> {
    let mut filters = StudyFilters::new();
    for (category, value) in selected {
        filters.set(*category, value)?;
    }
    Ok(filters)
}

/// Filtered list; a failed filter request shows an empty list.
pub(crate) async fn filtered_studies(api: &impl StudyApi, filters: &StudyFilters) -> Vec<Study> {
    match api.filter_feed(filters).await {
        Ok(studies) => studies,
        Err(e) => {
            tracing::warn!(error = %e, "filter request failed");
            Vec::new()
        }
    }
}

fn print_page(studies: Vec<Study>, page: usize, output: OutputOptions) -> Result<()> {
    let mut list = StudyListState::default();
    list.apply_results(studies);
    list.set_page(page);

    let content = render_list(
        false,
        None,
        list.visible(),
        EMPTY_LIST,
        CardVariant::Standard,
        LayoutMode::Wide,
    );
    let mut text = format_list(&content);
    if let Some(footer) = format_page_footer(list.page, list.page_count()) {
        text.push('\n');
        text.push_str(&footer);
    }

    CommandOutput::new(json!({
        "page": list.page,
        "pageCount": list.page_count(),
        "total": list.studies.len(),
        "studies": list.visible().iter().map(study_json).collect::<Vec<_>>(),
    }))
    .with_text(text)
    .print(output)
}

pub async fn cmd_list(page: usize, output: OutputOptions) -> Result<()> {
    let api = connect()?;
    let studies = filtered_studies(&api, &StudyFilters::new()).await;
    print_page(studies, page, output)
}

pub async fn cmd_filter(
    selected: &[(FilterCategory, String)],
    page: usize,
    output: OutputOptions,
) -> Result<()> {
    let filters = build_filters(selected)?;
    let api = connect()?;
    let studies = filtered_studies(&api, &filters).await;
    print_page(studies, page, output)
}

pub async fn cmd_search(title: &str, page: usize, output: OutputOptions) -> Result<()> {
    let api = connect()?;
    let studies = api.search_title(title.trim()).await?;
    print_page(studies, page, output)
}
