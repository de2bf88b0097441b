use serde_json::json;

use super::{CommandOutput, connect, study_json};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::display::{format_list, format_page_footer};
use crate::error::{ErrorCategory, Result};
use crate::pagination;
use crate::remote::StudyApi;
use crate::render::{CardVariant, LayoutMode, ListContent, render_list};
use crate::tabs::{FETCH_ERROR_MESSAGE, Tab};
use crate::types::Study;

/// One rendered page of a "My Info" tab.
pub(crate) struct TabPage {
    pub content: ListContent,
    pub visible: Vec<Study>,
    pub page: usize,
    pub page_count: usize,
}

/// Fetch failures other than auth become the tab's error message instead
/// of aborting.
pub(crate) async fn tab_page(
    api: &impl StudyApi,
    tab: Tab,
    page: usize,
    layout: LayoutMode,
) -> Result<TabPage> {
    let variant = if tab == Tab::RequestJoin {
        CardVariant::JoinRequest
    } else {
        CardVariant::Standard
    };

    match api.my_studies(tab).await {
        Ok(studies) => {
            let page_count = pagination::page_count(&studies, layout.page_size());
            let page = pagination::clamp_page(page, page_count);
            let visible = pagination::slice(&studies, page, layout.page_size()).to_vec();
            let content = render_list(false, None, &visible, tab.empty_message(), variant, layout);
            Ok(TabPage {
                content,
                visible,
                page,
                page_count,
            })
        }
        Err(e) if e.category() == ErrorCategory::Auth => Err(e),
        Err(e) => {
            tracing::warn!(%tab, error = %e, "tab fetch failed");
            Ok(TabPage {
                content: render_list(
                    false,
                    Some(FETCH_ERROR_MESSAGE),
                    &[],
                    tab.empty_message(),
                    variant,
                    layout,
                ),
                visible: Vec::new(),
                page: 1,
                page_count: 0,
            })
        }
    }
}

pub async fn cmd_my(
    tab: Tab,
    page: usize,
    layout: Option<LayoutMode>,
    output: OutputOptions,
) -> Result<()> {
    let layout = match layout {
        Some(layout) => layout,
        None => Config::load()?.layout,
    };
    let api = connect()?;
    let result = tab_page(&api, tab, page, layout).await?;

    let mut text = format!("{}\n{}", tab.label(), format_list(&result.content));
    if let Some(footer) = format_page_footer(result.page, result.page_count) {
        text.push('\n');
        text.push_str(&footer);
    }

    let error = match &result.content {
        ListContent::Error(message) => Some(message.clone()),
        _ => None,
    };

    CommandOutput::new(json!({
        "tab": tab.as_str(),
        "page": result.page,
        "pageCount": result.page_count,
        "error": error,
        "studies": result.visible.iter().map(study_json).collect::<Vec<_>>(),
    }))
    .with_text(text)
    .print(output)
}
