//! Yes/no confirmation dialog.

use iocraft::prelude::*;

use super::modal_overlay::ModalOverlay;
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct ConfirmDialogProps {
    pub title: String,
    pub message: String,
}

#[component]
pub fn ConfirmDialog(props: &ConfirmDialogProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        ModalOverlay(show_backdrop: true) {
            View(
                width: 60,
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Round,
                border_color: Color::Yellow,
                background_color: Color::Black,
                padding_left: 1,
                padding_right: 1,
            ) {
                Text(
                    content: props.title.clone(),
                    color: Color::Yellow,
                    weight: Weight::Bold,
                )
                View(padding_top: 1, padding_bottom: 1) {
                    Text(content: props.message.clone(), color: theme.text, wrap: TextWrap::Wrap)
                }
                Text(content: "[y] 확인  [n/Esc] 취소", color: theme.text_dimmed)
            }
        }
    }
}
