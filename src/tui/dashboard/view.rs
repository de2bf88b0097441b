//! "My Info" dashboard component
//!
//! All state lives in one `DashboardState` driven by the reducer in
//! [`super::model`]. Effects are queued in state and drained on render so
//! an effect's completion can schedule a follow-up (e.g. the refetch after
//! answering a join request).

#![allow(clippy::clone_on_copy)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use iocraft::prelude::*;

use crate::remote::HttpStudyApi;
use crate::render::LayoutMode;
use crate::tui::components::{
    ConfirmDialog, Footer, ListPane, PaginationBar, TabBar, render_toast,
};
use crate::tui::theme::theme;

use super::effects::run_effect;
use super::model::{
    DashboardAction, DashboardEffect, DashboardState, compute_dashboard_view_model, key_to_action,
    reduce_dashboard_state,
};

const TOAST_POLL: Duration = Duration::from_millis(500);

#[derive(Default, Props)]
pub struct DashboardProps {
    pub api: Option<Arc<HttpStudyApi>>,
    pub layout: LayoutMode,
}

fn dispatch(
    state: &mut State<DashboardState>,
    queue: &mut State<Vec<DashboardEffect>>,
    action: DashboardAction,
) {
    let current = state.read().clone();
    let (next, effect) = reduce_dashboard_state(current, action);
    state.set(next);
    if let Some(effect) = effect {
        let mut effects = queue.read().clone();
        effects.push(effect);
        queue.set(effects);
    }
}

#[component]
pub fn Dashboard<'a>(props: &DashboardProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let theme = theme();

    let initial_layout = props.layout;
    let mut state = hooks.use_state(move || DashboardState::new(initial_layout));
    let mut queue: State<Vec<DashboardEffect>> = hooks.use_state(Vec::new);
    let mut started = hooks.use_state(|| false);

    let effect_handler: Handler<DashboardEffect> = hooks.use_async_handler({
        let api = props.api.clone();
        let state_setter = state.clone();
        let queue_setter = queue.clone();

        move |effect: DashboardEffect| {
            let api = api.clone();
            let mut state_setter = state_setter.clone();
            let mut queue_setter = queue_setter.clone();

            async move {
                let Some(api) = api else {
                    tracing::warn!(?effect, "dashboard has no API client; dropping effect");
                    return;
                };
                let completed = run_effect(api.as_ref(), effect).await;
                dispatch(&mut state_setter, &mut queue_setter, completed);
            }
        }
    });

    // Expire toasts
    hooks.use_future({
        let mut state = state.clone();
        let mut queue = queue.clone();
        async move {
            loop {
                tokio::time::sleep(TOAST_POLL).await;
                let expired = state
                    .read()
                    .toast
                    .as_ref()
                    .is_some_and(|t| t.is_expired(Instant::now()));
                if expired {
                    dispatch(&mut state, &mut queue, DashboardAction::DismissToast);
                }
            }
        }
    });

    if !started.get() {
        started.set(true);
        dispatch(&mut state, &mut queue, DashboardAction::Init);
    }

    // Drain queued effects
    if !queue.read().is_empty() {
        let effects = queue.read().clone();
        queue.set(Vec::new());
        for effect in effects {
            effect_handler.clone()(effect);
        }
    }

    hooks.use_terminal_events({
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let action = key_to_action(code, modifiers, &state.read());
                if let Some(action) = action {
                    dispatch(&mut state, &mut queue, action);
                }
            }
            _ => {}
        }
    });

    if state.read().should_exit {
        system.exit();
    }

    let vm = compute_dashboard_view_model(&state.read());
    let layout_status = format!("레이아웃: {}", vm.layout);

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            TabBar(tabs: vm.tabs.clone(), status: Some(layout_status))

            ListPane(content: vm.content.clone(), layout: vm.layout)

            PaginationBar(page: vm.page, page_count: vm.page_count)

            Footer(shortcuts: vm.shortcuts.clone())

            #(render_toast(&vm.toast))

            #(vm.confirm.as_ref().map(|prompt| {
                element! {
                    ConfirmDialog(title: prompt.title.clone(), message: prompt.message.clone())
                }
                .into_any()
            }))
        }
    }
}
