use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct PaginationBarProps {
    pub page: usize,
    pub page_count: usize,
}

/// `< 2 / 5 >` indicator, rendered only when there is more than one page.
#[component]
pub fn PaginationBar(props: &PaginationBarProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    if props.page_count <= 1 {
        return element!(View).into_any();
    }

    let prev = if props.page > 1 { "◀" } else { " " };
    let next = if props.page < props.page_count { "▶" } else { " " };

    element! {
        View(width: 100pct, justify_content: JustifyContent::Center) {
            Text(
                content: format!("{prev} {} / {} {next}", props.page, props.page_count),
                color: theme.text,
            )
        }
    }
    .into_any()
}
