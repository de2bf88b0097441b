//! Shared TUI components

pub mod confirm_dialog;
pub mod footer;
pub mod list_pane;
pub mod modal_overlay;
pub mod pagination;
pub mod study_card;
pub mod tab_bar;
pub mod toast;

pub use confirm_dialog::{ConfirmDialog, ConfirmDialogProps};
pub use footer::{Footer, FooterProps, Shortcut};
pub use list_pane::{ListPane, ListPaneContent, ListPaneProps};
pub use modal_overlay::{ModalOverlay, ModalOverlayProps};
pub use pagination::{PaginationBar, PaginationBarProps};
pub use study_card::{CardRow, StudyCard, StudyCardProps};
pub use tab_bar::{TabBar, TabBarProps, TabLabel};
pub use toast::{Toast, ToastLevel, render_toast};
