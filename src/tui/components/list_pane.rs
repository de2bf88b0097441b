//! Study list area of the dashboard

use iocraft::prelude::*;

use super::study_card::{CardRow, StudyCard};
use crate::render::LayoutMode;
use crate::tui::theme::theme;

/// What the list area shows, already resolved from loading/error/empty state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListPaneContent {
    #[default]
    Loading,
    Message {
        text: String,
        is_error: bool,
    },
    Rows(Vec<CardRow>),
}

#[derive(Default, Props)]
pub struct ListPaneProps {
    pub content: ListPaneContent,
    pub layout: LayoutMode,
}

#[component]
pub fn ListPane(props: &ListPaneProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let body = match &props.content {
        ListPaneContent::Loading => centered("불러오는 중…".to_string(), theme.text_dimmed),
        ListPaneContent::Message { text, is_error } => centered(
            text.clone(),
            if *is_error { Color::Red } else { theme.text_dimmed },
        ),
        ListPaneContent::Rows(rows) => {
            let layout = props.layout;
            let rows = rows.clone();
            element! {
                View(
                    width: 100pct,
                    flex_direction: FlexDirection::Column,
                    overflow: Overflow::Hidden,
                ) {
                    #(rows.into_iter().map(|row| {
                        element! {
                            StudyCard(row: Some(row), layout: layout)
                        }
                    }))
                }
            }
            .into_any()
        }
    };

    element! {
        View(
            width: 100pct,
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border_focused,
        ) {
            #(Some(body))
        }
    }
}

fn centered(text: String, color: Color) -> AnyElement<'static> {
    element! {
        View(
            flex_grow: 1.0,
            width: 100pct,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
        ) {
            Text(content: text, color: color)
        }
    }
    .into_any()
}
