//! Dashboard tab bar

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLabel {
    /// Number key that selects the tab
    pub key: char,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Default, Props)]
pub struct TabBarProps {
    pub tabs: Vec<TabLabel>,
    /// Right-aligned status text, e.g. the layout mode
    pub status: Option<String>,
}

#[component]
pub fn TabBar(props: &TabBarProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let status = props.status.clone().unwrap_or_default();

    element! {
        View(
            width: 100pct,
            padding_left: 1,
            padding_right: 1,
            border_edges: Edges::Bottom,
            border_style: BorderStyle::Single,
            border_color: theme.border,
        ) {
            #(props.tabs.iter().map(|tab| {
                element! {
                    Text(
                        content: format!("[{}] {}  ", tab.key, tab.label),
                        color: if tab.active { theme.tab_active } else { theme.text_dimmed },
                        weight: if tab.active { Weight::Bold } else { Weight::Normal },
                    )
                }
            }))
            View(flex_grow: 1.0)
            Text(content: status, color: theme.text_dimmed)
        }
    }
}
