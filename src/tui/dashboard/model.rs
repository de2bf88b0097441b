//! Dashboard model types for testable state management
//!
//! State (`DashboardState`) is separated from view (`DashboardViewModel`).
//! `reduce_dashboard_state` is a pure function returning the next state and
//! at most one side effect for the view to run; results come back as
//! actions. Nothing here touches the network or the terminal.

use iocraft::prelude::{KeyCode, KeyModifiers};

use crate::actions::join::{JOIN_CLOSED, JOIN_REJECTED};
use crate::actions::like;
use crate::actions::{ActionKey, ActionKind, PendingActions};
use crate::error::{ErrorCategory, WithRoomError};
use crate::pagination;
use crate::render::{CardVariant, LayoutMode, ListContent, render_list};
use crate::tabs::{FETCH_ERROR_MESSAGE, FetchRequest, Tab, TabState};
use crate::tui::components::{CardRow, ListPaneContent, Shortcut, TabLabel, Toast};
use crate::types::{Study, StudyId};

const ALREADY_PENDING: &str = "이미 처리 중입니다.";

// ============================================================================
// State Types
// ============================================================================

/// A failure carried back into the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
    pub category: ErrorCategory,
    pub message: String,
}

impl From<WithRoomError> for ActionFailure {
    fn from(err: WithRoomError) -> Self {
        let message = match &err {
            WithRoomError::LoginRequired => "로그인이 필요합니다.".to_string(),
            _ if err.category() == ErrorCategory::Auth => {
                "로그인이 만료되었습니다. 다시 로그인해주세요.".to_string()
            }
            other => other.to_string(),
        };
        Self {
            category: err.category(),
            message,
        }
    }
}

pub type ActionResult<T> = std::result::Result<T, ActionFailure>;

/// What a confirmed dialog will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmTarget {
    Like {
        study_id: StudyId,
        currently_liked: bool,
    },
    Join {
        study_id: StudyId,
    },
    Respond {
        study_id: StudyId,
        member_id: u64,
        accept: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub target: ConfirmTarget,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub tabs: TabState,
    /// Studies of the active tab, as last fetched
    pub studies: Vec<Study>,
    pub is_loading: bool,
    /// Set when the last fetch of the active tab failed
    pub error: Option<String>,
    /// Index of the selected card within the current page
    pub selected_index: usize,
    pub layout: LayoutMode,
    pub pending: PendingActions,
    pub toast: Option<Toast>,
    pub confirm: Option<ConfirmPrompt>,
    pub should_exit: bool,
}

impl DashboardState {
    pub fn new(layout: LayoutMode) -> Self {
        Self {
            tabs: TabState::default(),
            studies: Vec::new(),
            is_loading: false,
            error: None,
            selected_index: 0,
            layout,
            pending: PendingActions::default(),
            toast: None,
            confirm: None,
            should_exit: false,
        }
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(&self.studies, self.layout.page_size())
    }

    pub fn visible(&self) -> &[Study] {
        pagination::slice(&self.studies, self.tabs.page, self.layout.page_size())
    }

    pub fn selected_study(&self) -> Option<&Study> {
        if self.is_loading || self.error.is_some() {
            return None;
        }
        self.visible().get(self.selected_index)
    }

    fn card_variant(&self) -> CardVariant {
        if self.tabs.active == Tab::RequestJoin {
            CardVariant::JoinRequest
        } else {
            CardVariant::Standard
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(LayoutMode::default())
    }
}

// ============================================================================
// Actions and Effects
// ============================================================================

#[derive(Debug, Clone)]
pub enum DashboardAction {
    /// Fetch the initial tab
    Init,
    SelectTab(Tab),
    NextTab,
    PrevTab,
    NextPage,
    PrevPage,
    MoveUp,
    MoveDown,
    Refresh,
    ToggleLayout,
    FetchCompleted {
        request: FetchRequest,
        result: ActionResult<Vec<Study>>,
    },

    LikeSelected,
    LikeCheckCompleted {
        study_id: StudyId,
        currently_liked: bool,
        result: ActionResult<()>,
    },
    LikeCompleted {
        study_id: StudyId,
        result: ActionResult<bool>,
    },
    JoinSelected,
    JoinCompleted {
        study_id: StudyId,
        result: ActionResult<bool>,
    },
    RespondSelected {
        accept: bool,
    },
    RespondCompleted {
        study_id: StudyId,
        member_id: u64,
        accept: bool,
        result: ActionResult<()>,
    },

    ConfirmYes,
    ConfirmNo,
    DismissToast,
    Quit,
}

/// Work the view must perform, reporting back with the matching `*Completed` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEffect {
    Fetch(FetchRequest),
    CheckLike {
        study_id: StudyId,
        currently_liked: bool,
    },
    ToggleLike {
        study_id: StudyId,
        currently_liked: bool,
    },
    Join {
        study_id: StudyId,
    },
    RespondJoin {
        study_id: StudyId,
        member_id: u64,
        accept: bool,
    },
}

// ============================================================================
// Reducer
// ============================================================================

fn fetch(mut state: DashboardState, request: FetchRequest) -> (DashboardState, Option<DashboardEffect>) {
    state.is_loading = true;
    state.error = None;
    state.selected_index = 0;
    (state, Some(DashboardEffect::Fetch(request)))
}

fn select_tab(mut state: DashboardState, tab: Tab) -> (DashboardState, Option<DashboardEffect>) {
    let request = state.tabs.select(tab);
    state.studies.clear();
    fetch(state, request)
}

fn set_page(mut state: DashboardState, page: usize) -> DashboardState {
    let page = pagination::clamp_page(page, state.page_count());
    if page != state.tabs.page {
        state.tabs.set_page(page);
        state.selected_index = 0;
    }
    state
}

fn failure_toast(failure: &ActionFailure) -> Toast {
    Toast::for_failure(failure.category, failure.message.clone())
}

pub fn reduce_dashboard_state(
    mut state: DashboardState,
    action: DashboardAction,
) -> (DashboardState, Option<DashboardEffect>) {
    match action {
        DashboardAction::Init => {
            let request = state.tabs.reload();
            fetch(state, request)
        }
        DashboardAction::SelectTab(tab) => select_tab(state, tab),
        DashboardAction::NextTab => {
            let tab = state.tabs.active.next();
            select_tab(state, tab)
        }
        DashboardAction::PrevTab => {
            let tab = state.tabs.active.prev();
            select_tab(state, tab)
        }
        DashboardAction::NextPage => {
            let page = state.tabs.page + 1;
            (set_page(state, page), None)
        }
        DashboardAction::PrevPage => {
            let page = state.tabs.page.saturating_sub(1);
            (set_page(state, page), None)
        }
        DashboardAction::MoveUp => {
            state.selected_index = state.selected_index.saturating_sub(1);
            (state, None)
        }
        DashboardAction::MoveDown => {
            let last = state.visible().len().saturating_sub(1);
            state.selected_index = (state.selected_index + 1).min(last);
            (state, None)
        }
        DashboardAction::Refresh => {
            let request = state.tabs.reload();
            fetch(state, request)
        }
        DashboardAction::ToggleLayout => {
            state.layout = state.layout.toggle();
            let page = state.tabs.page;
            state.selected_index = 0;
            (set_page(state, page), None)
        }
        DashboardAction::FetchCompleted { request, result } => {
            if !state.tabs.is_current(&request) {
                tracing::debug!(tab = %request.tab, generation = request.generation, "discarding stale fetch");
                return (state, None);
            }
            state.is_loading = false;
            match result {
                Ok(studies) => {
                    state.studies = studies;
                    state.error = None;
                    let page = state.tabs.page;
                    state = set_page(state, page);
                    let last = state.visible().len().saturating_sub(1);
                    state.selected_index = state.selected_index.min(last);
                }
                Err(failure) => {
                    state.studies.clear();
                    state.error = Some(FETCH_ERROR_MESSAGE.to_string());
                    if failure.category == ErrorCategory::Auth {
                        state.toast = Some(failure_toast(&failure));
                    }
                }
            }
            (state, None)
        }

        DashboardAction::LikeSelected => {
            let Some(study) = state.selected_study() else {
                return (state, None);
            };
            let (study_id, currently_liked) = (study.study_id, study.interest);
            if !state.pending.try_begin(ActionKey::new(ActionKind::Like, study_id)) {
                return (state, None);
            }
            (
                state,
                Some(DashboardEffect::CheckLike {
                    study_id,
                    currently_liked,
                }),
            )
        }
        DashboardAction::LikeCheckCompleted {
            study_id,
            currently_liked,
            result,
        } => {
            state
                .pending
                .finish(&ActionKey::new(ActionKind::Like, study_id));
            match result {
                Ok(()) => {
                    let (title, message) = like::confirm_text(currently_liked);
                    state.confirm = Some(ConfirmPrompt {
                        title: title.to_string(),
                        message: message.to_string(),
                        target: ConfirmTarget::Like {
                            study_id,
                            currently_liked,
                        },
                    });
                }
                Err(failure) => state.toast = Some(failure_toast(&failure)),
            }
            (state, None)
        }
        DashboardAction::LikeCompleted { study_id, result } => {
            state
                .pending
                .finish(&ActionKey::new(ActionKind::Like, study_id));
            match result {
                Ok(now_liked) => {
                    for study in state.studies.iter_mut().filter(|s| s.study_id == study_id) {
                        study.interest = now_liked;
                    }
                    state.toast = Some(Toast::success(if now_liked {
                        "관심이 등록되었습니다."
                    } else {
                        "관심이 취소되었습니다."
                    }));
                    if state.tabs.active == Tab::Liked {
                        let request = state.tabs.reload();
                        return fetch(state, request);
                    }
                }
                Err(failure) => state.toast = Some(failure_toast(&failure)),
            }
            (state, None)
        }

        DashboardAction::JoinSelected => {
            if state.tabs.active == Tab::RequestJoin {
                return (state, None);
            }
            let Some(study) = state.selected_study() else {
                return (state, None);
            };
            if state.pending.is_busy(study.study_id, study.member_id) {
                return (state, None);
            }
            if !study.can_join() {
                state.toast = Some(Toast::warning(JOIN_CLOSED));
                return (state, None);
            }
            let study_id = study.study_id;
            state.confirm = Some(ConfirmPrompt {
                title: "스터디 신청".to_string(),
                message: format!("'{}'에 참여 신청하시겠습니까?", study.title),
                target: ConfirmTarget::Join { study_id },
            });
            (state, None)
        }
        DashboardAction::JoinCompleted { study_id, result } => {
            state
                .pending
                .finish(&ActionKey::new(ActionKind::Join, study_id));
            state.toast = Some(match result {
                Ok(true) => Toast::success("스터디 신청 완료"),
                Ok(false) => Toast::warning(JOIN_REJECTED),
                Err(failure) => failure_toast(&failure),
            });
            (state, None)
        }

        DashboardAction::RespondSelected { accept } => {
            if state.tabs.active != Tab::RequestJoin {
                return (state, None);
            }
            let Some(study) = state.selected_study() else {
                return (state, None);
            };
            let Some(member_id) = study.member_id else {
                return (state, None);
            };
            if state.pending.is_busy(study.study_id, Some(member_id)) {
                return (state, None);
            }
            let applicant = study.nick_name.clone().unwrap_or_else(|| "신청자".to_string());
            let study_id = study.study_id;
            let (title, verb) = if accept {
                ("스터디 참여 요청 수락", "수락")
            } else {
                ("스터디 참여 요청 거절", "거절")
            };
            state.confirm = Some(ConfirmPrompt {
                title: title.to_string(),
                message: format!("{applicant}님의 참여 요청을 {verb}하시겠습니까?"),
                target: ConfirmTarget::Respond {
                    study_id,
                    member_id,
                    accept,
                },
            });
            (state, None)
        }
        DashboardAction::RespondCompleted {
            study_id,
            member_id,
            accept,
            result,
        } => {
            let kind = if accept {
                ActionKind::Accept
            } else {
                ActionKind::Reject
            };
            state
                .pending
                .finish(&ActionKey::for_member(kind, study_id, member_id));
            match result {
                Ok(()) => {
                    state.toast = Some(Toast::success(if accept {
                        "참여 요청을 수락했습니다."
                    } else {
                        "참여 요청을 거절했습니다."
                    }));
                    if state.tabs.active == Tab::RequestJoin {
                        let request = state.tabs.reload();
                        return fetch(state, request);
                    }
                    (state, None)
                }
                Err(failure) => {
                    state.toast = Some(failure_toast(&failure));
                    (state, None)
                }
            }
        }

        DashboardAction::ConfirmYes => {
            let Some(prompt) = state.confirm.take() else {
                return (state, None);
            };
            let (key, effect) = match prompt.target {
                ConfirmTarget::Like {
                    study_id,
                    currently_liked,
                } => (
                    ActionKey::new(ActionKind::Like, study_id),
                    DashboardEffect::ToggleLike {
                        study_id,
                        currently_liked,
                    },
                ),
                ConfirmTarget::Join { study_id } => (
                    ActionKey::new(ActionKind::Join, study_id),
                    DashboardEffect::Join { study_id },
                ),
                ConfirmTarget::Respond {
                    study_id,
                    member_id,
                    accept,
                } => (
                    ActionKey::for_member(
                        if accept {
                            ActionKind::Accept
                        } else {
                            ActionKind::Reject
                        },
                        study_id,
                        member_id,
                    ),
                    DashboardEffect::RespondJoin {
                        study_id,
                        member_id,
                        accept,
                    },
                ),
            };
            if !state.pending.try_begin(key) {
                state.toast = Some(Toast::info(ALREADY_PENDING));
                return (state, None);
            }
            (state, Some(effect))
        }
        DashboardAction::ConfirmNo => {
            state.confirm = None;
            (state, None)
        }
        DashboardAction::DismissToast => {
            state.toast = None;
            (state, None)
        }
        DashboardAction::Quit => {
            state.should_exit = true;
            (state, None)
        }
    }
}

// ============================================================================
// View Model
// ============================================================================

#[derive(Debug, Clone)]
pub struct DashboardViewModel {
    pub tabs: Vec<TabLabel>,
    pub content: ListPaneContent,
    pub layout: LayoutMode,
    pub page: usize,
    pub page_count: usize,
    pub show_pagination: bool,
    pub shortcuts: Vec<Shortcut>,
    pub toast: Option<Toast>,
    pub confirm: Option<ConfirmPrompt>,
}

pub fn compute_dashboard_view_model(state: &DashboardState) -> DashboardViewModel {
    let tabs = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| TabLabel {
            key: char::from_digit(i as u32 + 1, 10).unwrap_or('?'),
            label: tab.label(),
            active: *tab == state.tabs.active,
        })
        .collect();

    let content = match render_list(
        state.is_loading,
        state.error.as_deref(),
        state.visible(),
        state.tabs.active.empty_message(),
        state.card_variant(),
        state.layout,
    ) {
        ListContent::Loading => ListPaneContent::Loading,
        ListContent::Error(text) => ListPaneContent::Message {
            text,
            is_error: true,
        },
        ListContent::Empty(text) => ListPaneContent::Message {
            text,
            is_error: false,
        },
        ListContent::Cards { cards, .. } => ListPaneContent::Rows(
            cards
                .into_iter()
                .enumerate()
                .map(|(i, card)| CardRow {
                    pending: state
                        .pending
                        .is_busy(card.key.study_id, card.key.member_id),
                    selected: i == state.selected_index,
                    card,
                })
                .collect(),
        ),
    };

    let page_count = state.page_count();
    DashboardViewModel {
        tabs,
        content,
        layout: state.layout,
        page: state.tabs.page,
        page_count,
        show_pagination: page_count > 1,
        shortcuts: compute_shortcuts(state),
        toast: state.toast.clone(),
        confirm: state.confirm.clone(),
    }
}

fn compute_shortcuts(state: &DashboardState) -> Vec<Shortcut> {
    if state.confirm.is_some() {
        return vec![Shortcut::new("y", "확인"), Shortcut::new("n/Esc", "취소")];
    }
    let mut shortcuts = vec![
        Shortcut::new("1-5/Tab", "탭"),
        Shortcut::new("j/k", "이동"),
        Shortcut::new("←/→", "페이지"),
        Shortcut::new("l", "관심"),
    ];
    if state.tabs.active == Tab::RequestJoin {
        shortcuts.push(Shortcut::new("a", "수락"));
        shortcuts.push(Shortcut::new("x", "거절"));
    } else {
        shortcuts.push(Shortcut::new("p", "참여 신청"));
    }
    shortcuts.push(Shortcut::new("r", "새로고침"));
    shortcuts.push(Shortcut::new("m", "레이아웃"));
    shortcuts.push(Shortcut::new("q", "종료"));
    shortcuts
}

// ============================================================================
// Key Mapping
// ============================================================================

pub fn key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    state: &DashboardState,
) -> Option<DashboardAction> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(DashboardAction::Quit);
    }

    // The confirm dialog captures all input
    if state.confirm.is_some() {
        return match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(DashboardAction::ConfirmYes)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(DashboardAction::ConfirmNo)
            }
            _ => None,
        };
    }

    match code {
        KeyCode::Char(c @ '1'..='5') => {
            let index = c.to_digit(10).map(|d| d as usize - 1)?;
            Tab::ALL.get(index).copied().map(DashboardAction::SelectTab)
        }
        KeyCode::Tab => Some(DashboardAction::NextTab),
        KeyCode::BackTab => Some(DashboardAction::PrevTab),
        KeyCode::Right | KeyCode::Char(']') => Some(DashboardAction::NextPage),
        KeyCode::Left | KeyCode::Char('[') => Some(DashboardAction::PrevPage),
        KeyCode::Down | KeyCode::Char('j') => Some(DashboardAction::MoveDown),
        KeyCode::Up | KeyCode::Char('k') => Some(DashboardAction::MoveUp),
        KeyCode::Char('l') => Some(DashboardAction::LikeSelected),
        KeyCode::Char('p') => Some(DashboardAction::JoinSelected),
        KeyCode::Char('a') => Some(DashboardAction::RespondSelected { accept: true }),
        KeyCode::Char('x') => Some(DashboardAction::RespondSelected { accept: false }),
        KeyCode::Char('r') => Some(DashboardAction::Refresh),
        KeyCode::Char('m') => Some(DashboardAction::ToggleLayout),
        KeyCode::Esc if state.toast.is_some() => Some(DashboardAction::DismissToast),
        KeyCode::Char('q') | KeyCode::Esc => Some(DashboardAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn studies(range: std::ops::RangeInclusive<u64>) -> Vec<Study> {
        range
            .map(|id| Study {
                study_id: id,
                title: format!("study {id}"),
                now_people: 1,
                recruit_people: 4,
                ..Default::default()
            })
            .collect()
    }

    fn loaded(tab: Tab, items: Vec<Study>) -> DashboardState {
        let (state, effect) =
            reduce_dashboard_state(DashboardState::default(), DashboardAction::SelectTab(tab));
        let Some(DashboardEffect::Fetch(request)) = effect else {
            panic!("expected fetch effect");
        };
        reduce_dashboard_state(
            state,
            DashboardAction::FetchCompleted {
                request,
                result: Ok(items),
            },
        )
        .0
    }

    #[test]
    fn test_tab_switch_resets_page_and_fetches() {
        let mut state = loaded(Tab::Created, studies(1..=20));
        state = reduce_dashboard_state(state, DashboardAction::NextPage).0;
        state = reduce_dashboard_state(state, DashboardAction::NextPage).0;
        assert_eq!(state.tabs.page, 3);

        let (state, effect) = reduce_dashboard_state(state, DashboardAction::SelectTab(Tab::Liked));
        assert_eq!(state.tabs.page, 1);
        assert!(state.is_loading);
        assert!(matches!(
            effect,
            Some(DashboardEffect::Fetch(FetchRequest { tab: Tab::Liked, .. }))
        ));
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let (state, first) =
            reduce_dashboard_state(DashboardState::default(), DashboardAction::SelectTab(Tab::Join));
        let (state, _) = reduce_dashboard_state(state, DashboardAction::SelectTab(Tab::Liked));
        let Some(DashboardEffect::Fetch(stale)) = first else {
            panic!("expected fetch");
        };
        let (state, _) = reduce_dashboard_state(
            state,
            DashboardAction::FetchCompleted {
                request: stale,
                result: Ok(studies(1..=3)),
            },
        );
        assert!(state.is_loading);
        assert!(state.studies.is_empty());
    }

    #[test]
    fn test_pages_of_six_in_wide_layout() {
        let state = loaded(Tab::Created, studies(1..=9));
        let ids: Vec<u64> = state.visible().iter().map(|s| s.study_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(state.page_count(), 2);

        let state = reduce_dashboard_state(state, DashboardAction::NextPage).0;
        let ids: Vec<u64> = state.visible().iter().map(|s| s.study_id).collect();
        assert_eq!(ids, vec![7, 8, 9]);

        let state = reduce_dashboard_state(state, DashboardAction::NextPage).0;
        assert_eq!(state.tabs.page, 2);
    }

    #[test]
    fn test_empty_tab_shows_configured_message() {
        let state = loaded(Tab::Participating, Vec::new());
        let vm = compute_dashboard_view_model(&state);
        assert_eq!(
            vm.content,
            ListPaneContent::Message {
                text: "참여 중인 스터디가 없습니다.".to_string(),
                is_error: false
            }
        );
        assert!(!vm.show_pagination);
    }

    #[test]
    fn test_fetch_failure_shows_error_message() {
        let (state, effect) =
            reduce_dashboard_state(DashboardState::default(), DashboardAction::Init);
        let Some(DashboardEffect::Fetch(request)) = effect else {
            panic!("expected fetch");
        };
        let (state, _) = reduce_dashboard_state(
            state,
            DashboardAction::FetchCompleted {
                request,
                result: Err(ActionFailure {
                    category: ErrorCategory::Network,
                    message: "timeout".to_string(),
                }),
            },
        );
        let vm = compute_dashboard_view_model(&state);
        assert_eq!(
            vm.content,
            ListPaneContent::Message {
                text: FETCH_ERROR_MESSAGE.to_string(),
                is_error: true
            }
        );
    }

    #[test]
    fn test_like_flow_updates_after_confirmation_only() {
        let state = loaded(Tab::Participating, studies(1..=2));
        let (state, effect) = reduce_dashboard_state(state, DashboardAction::LikeSelected);
        assert_eq!(
            effect,
            Some(DashboardEffect::CheckLike {
                study_id: 1,
                currently_liked: false
            })
        );
        // Pending: a second press does nothing
        let (state, again) = reduce_dashboard_state(state, DashboardAction::LikeSelected);
        assert_eq!(again, None);

        let (state, _) = reduce_dashboard_state(
            state,
            DashboardAction::LikeCheckCompleted {
                study_id: 1,
                currently_liked: false,
                result: Ok(()),
            },
        );
        assert!(state.confirm.is_some());
        assert!(!state.studies[0].interest);

        let (state, effect) = reduce_dashboard_state(state, DashboardAction::ConfirmYes);
        assert_eq!(
            effect,
            Some(DashboardEffect::ToggleLike {
                study_id: 1,
                currently_liked: false
            })
        );
        assert!(!state.studies[0].interest);

        let (state, _) = reduce_dashboard_state(
            state,
            DashboardAction::LikeCompleted {
                study_id: 1,
                result: Ok(true),
            },
        );
        assert!(state.studies[0].interest);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn test_like_rejected_for_leader_shows_warning() {
        let state = loaded(Tab::Created, studies(1..=1));
        let (state, _) = reduce_dashboard_state(state, DashboardAction::LikeSelected);
        let (state, _) = reduce_dashboard_state(
            state,
            DashboardAction::LikeCheckCompleted {
                study_id: 1,
                currently_liked: false,
                result: Err(WithRoomError::Rejected(like::LEADER_CANNOT_LIKE.to_string()).into()),
            },
        );
        assert!(state.confirm.is_none());
        let toast = state.toast.expect("toast");
        assert_eq!(toast.message, like::LEADER_CANNOT_LIKE);
    }

    #[test]
    fn test_join_false_keeps_capacity() {
        let state = loaded(Tab::Liked, studies(1..=1));
        let (state, _) = reduce_dashboard_state(state, DashboardAction::JoinSelected);
        let (state, effect) = reduce_dashboard_state(state, DashboardAction::ConfirmYes);
        assert_eq!(effect, Some(DashboardEffect::Join { study_id: 1 }));
        let (state, _) = reduce_dashboard_state(
            state,
            DashboardAction::JoinCompleted {
                study_id: 1,
                result: Ok(false),
            },
        );
        assert_eq!(state.studies[0].now_people, 1);
        assert_eq!(state.toast.map(|t| t.message), Some(JOIN_REJECTED.to_string()));
    }

    #[test]
    fn test_closed_study_join_is_blocked() {
        let mut full = studies(1..=1);
        full[0].now_people = 4;
        let state = loaded(Tab::Liked, full);
        let (state, effect) = reduce_dashboard_state(state, DashboardAction::JoinSelected);
        assert_eq!(effect, None);
        assert!(state.confirm.is_none());
        assert_eq!(state.toast.map(|t| t.message), Some(JOIN_CLOSED.to_string()));
    }

    #[test]
    fn test_join_trigger_disabled_while_join_in_flight() {
        let state = loaded(Tab::Liked, studies(1..=1));
        let (state, _) = reduce_dashboard_state(state, DashboardAction::JoinSelected);
        let (state, effect) = reduce_dashboard_state(state, DashboardAction::ConfirmYes);
        assert_eq!(effect, Some(DashboardEffect::Join { study_id: 1 }));

        let (state, effect) = reduce_dashboard_state(state, DashboardAction::JoinSelected);
        assert_eq!(effect, None);
        assert!(state.confirm.is_none());

        let (state, _) = reduce_dashboard_state(
            state,
            DashboardAction::JoinCompleted {
                study_id: 1,
                result: Ok(true),
            },
        );
        let (state, _) = reduce_dashboard_state(state, DashboardAction::JoinSelected);
        assert!(state.confirm.is_some());
    }

    #[test]
    fn test_respond_trigger_disabled_while_request_in_flight() {
        let mut rows = studies(1..=1);
        rows[0].member_id = Some(9);
        let state = loaded(Tab::RequestJoin, rows);
        let (state, _) =
            reduce_dashboard_state(state, DashboardAction::RespondSelected { accept: true });
        let (state, _) = reduce_dashboard_state(state, DashboardAction::ConfirmYes);

        let (state, effect) =
            reduce_dashboard_state(state, DashboardAction::RespondSelected { accept: false });
        assert_eq!(effect, None);
        assert!(state.confirm.is_none());
    }

    #[test]
    fn test_confirm_for_busy_action_reports_pending() {
        let state = loaded(Tab::Liked, studies(1..=1));
        let (mut state, _) = reduce_dashboard_state(state, DashboardAction::JoinSelected);
        assert!(
            state
                .pending
                .try_begin(ActionKey::new(ActionKind::Join, 1))
        );
        let (state, effect) = reduce_dashboard_state(state, DashboardAction::ConfirmYes);
        assert_eq!(effect, None);
        assert_eq!(
            state.toast.map(|t| t.message),
            Some(ALREADY_PENDING.to_string())
        );
    }

    #[test]
    fn test_accept_refetches_request_tab() {
        let mut rows = studies(1..=1);
        rows[0].member_id = Some(9);
        rows[0].nick_name = Some("bob".to_string());
        let state = loaded(Tab::RequestJoin, rows);

        let (state, _) =
            reduce_dashboard_state(state, DashboardAction::RespondSelected { accept: true });
        let (state, effect) = reduce_dashboard_state(state, DashboardAction::ConfirmYes);
        assert_eq!(
            effect,
            Some(DashboardEffect::RespondJoin {
                study_id: 1,
                member_id: 9,
                accept: true
            })
        );
        let (state, effect) = reduce_dashboard_state(
            state,
            DashboardAction::RespondCompleted {
                study_id: 1,
                member_id: 9,
                accept: true,
                result: Ok(()),
            },
        );
        assert!(matches!(
            effect,
            Some(DashboardEffect::Fetch(FetchRequest {
                tab: Tab::RequestJoin,
                ..
            }))
        ));
        assert!(state.is_loading);
    }

    #[test]
    fn test_confirm_dialog_captures_keys() {
        let mut state = DashboardState::default();
        state.confirm = Some(ConfirmPrompt {
            title: "t".to_string(),
            message: "m".to_string(),
            target: ConfirmTarget::Join { study_id: 1 },
        });
        assert!(matches!(
            key_to_action(KeyCode::Char('q'), KeyModifiers::NONE, &state),
            None
        ));
        assert!(matches!(
            key_to_action(KeyCode::Esc, KeyModifiers::NONE, &state),
            Some(DashboardAction::ConfirmNo)
        ));
    }

    #[test]
    fn test_number_keys_select_tabs() {
        let state = DashboardState::default();
        assert!(matches!(
            key_to_action(KeyCode::Char('3'), KeyModifiers::NONE, &state),
            Some(DashboardAction::SelectTab(Tab::RequestJoin))
        ));
        assert!(key_to_action(KeyCode::Char('9'), KeyModifiers::NONE, &state).is_none());
    }

    #[test]
    fn test_layout_toggle_changes_page_size() {
        let state = loaded(Tab::Created, studies(1..=9));
        let state = reduce_dashboard_state(state, DashboardAction::ToggleLayout).0;
        assert_eq!(state.layout, LayoutMode::Compact);
        assert_eq!(state.visible().len(), 4);
        assert_eq!(state.page_count(), 3);
    }
}
