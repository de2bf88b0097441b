//! One study rendered as a bordered card.

use iocraft::prelude::*;

use crate::render::{CardActions, Capacity, LayoutMode, StudyCardView};
use crate::tui::theme::theme;

/// A card plus its row state in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    pub card: StudyCardView,
    pub selected: bool,
    /// A mutation for this card is in flight
    pub pending: bool,
}

#[derive(Default, Props)]
pub struct StudyCardProps {
    pub row: Option<CardRow>,
    pub layout: LayoutMode,
}

#[component]
pub fn StudyCard(props: &StudyCardProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let Some(row) = props.row.clone() else {
        return element!(View).into_any();
    };
    let card = row.card;
    let compact = props.layout == LayoutMode::Compact;

    let like_marker = if card.liked { "♥" } else { "♡" };
    let meta = [card.difficulty, card.study_type]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
    let difficulty_color = card
        .difficulty
        .map(|d| theme.difficulty_label_color(d))
        .unwrap_or(theme.text_dimmed);
    let (capacity_text, capacity_color) = match card.capacity {
        Capacity::Closed => (card.capacity.to_string(), theme.closed),
        Capacity::Open { .. } => (format!("👥 {}", card.capacity), theme.capacity),
    };
    let action_text = match &card.actions {
        _ if row.pending => "처리 중…".to_string(),
        CardActions::Join { enabled: true } => "[p] 참여 신청".to_string(),
        CardActions::Join { enabled: false } => "참여 불가".to_string(),
        CardActions::Respond {
            applicant,
            preferred_area,
        } => match preferred_area {
            Some(area) => format!("{applicant} ({area})  [a] 수락 [x] 거절"),
            None => format!("{applicant}  [a] 수락 [x] 거절"),
        },
    };
    let action_color = if row.pending {
        theme.pending
    } else {
        theme.text
    };

    element! {
        View(
            width: 100pct,
            flex_direction: FlexDirection::Column,
            border_style: if row.selected { BorderStyle::Double } else { BorderStyle::Round },
            border_color: if row.selected { theme.border_focused } else { theme.border },
            padding_left: 1,
            padding_right: 1,
        ) {
            View(flex_direction: FlexDirection::Row) {
                Text(content: format!("{like_marker} "), color: theme.liked)
                Text(
                    content: card.title.clone(),
                    color: if card.capacity == Capacity::Closed { theme.closed } else { theme.text },
                    weight: Weight::Bold,
                )
                View(flex_grow: 1.0)
                Text(content: capacity_text, color: capacity_color)
            }
            #(if compact {
                None
            } else {
                Some(element! {
                    Text(content: card.tags.join(" "), color: theme.tag)
                })
            })
            View(flex_direction: FlexDirection::Row) {
                Text(content: meta, color: difficulty_color)
                View(flex_grow: 1.0)
                Text(content: action_text, color: action_color)
            }
        }
    }
    .into_any()
}
