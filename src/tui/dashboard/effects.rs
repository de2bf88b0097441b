//! Executes dashboard effects against a [`StudyApi`] and turns the outcome
//! back into the action the reducer expects.

use crate::actions::like;
use crate::actions::respond::send_response;
use crate::remote::StudyApi;

use super::model::{ActionFailure, DashboardAction, DashboardEffect};

pub async fn run_effect(api: &impl StudyApi, effect: DashboardEffect) -> DashboardAction {
    match effect {
        DashboardEffect::Fetch(request) => DashboardAction::FetchCompleted {
            request,
            result: api
                .my_studies(request.tab)
                .await
                .map_err(ActionFailure::from),
        },
        DashboardEffect::CheckLike {
            study_id,
            currently_liked,
        } => DashboardAction::LikeCheckCompleted {
            study_id,
            currently_liked,
            result: like::check_like_allowed(api, study_id)
                .await
                .map_err(ActionFailure::from),
        },
        DashboardEffect::ToggleLike {
            study_id,
            currently_liked,
        } => DashboardAction::LikeCompleted {
            study_id,
            result: like::send_like_toggle(api, study_id, currently_liked)
                .await
                .map_err(ActionFailure::from),
        },
        DashboardEffect::Join { study_id } => DashboardAction::JoinCompleted {
            study_id,
            result: api.join_study(study_id).await.map_err(ActionFailure::from),
        },
        DashboardEffect::RespondJoin {
            study_id,
            member_id,
            accept,
        } => DashboardAction::RespondCompleted {
            study_id,
            member_id,
            accept,
            result: send_response(api, study_id, member_id, accept)
                .await
                .map_err(ActionFailure::from),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCategory, WithRoomError};
    use crate::remote::fake::{Call, FakeStudyApi};
    use crate::tabs::{FetchRequest, Tab};
    use crate::tui::dashboard::model::{DashboardState, reduce_dashboard_state};
    use crate::types::Study;

    fn study(id: u64) -> Study {
        Study {
            study_id: id,
            title: format!("study {id}"),
            recruit_people: 4,
            now_people: 1,
            ..Default::default()
        }
    }

    /// Feed effects back through the reducer until it goes quiet.
    async fn settle(
        api: &FakeStudyApi,
        mut state: DashboardState,
        action: DashboardAction,
    ) -> DashboardState {
        let (next, mut effect) = reduce_dashboard_state(state, action);
        state = next;
        while let Some(e) = effect {
            let completed = run_effect(api, e).await;
            let (next, follow_up) = reduce_dashboard_state(state, completed);
            state = next;
            effect = follow_up;
        }
        state
    }

    #[tokio::test]
    async fn test_fetch_loads_active_tab() {
        let api = FakeStudyApi::new().with_tab(Tab::Created, vec![study(1), study(2)]);
        let state = settle(&api, DashboardState::default(), DashboardAction::Init).await;
        assert!(!state.is_loading);
        assert_eq!(state.studies.len(), 2);
        assert_eq!(api.calls(), vec![Call::Fetch(Tab::Created)]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported_not_raised() {
        let api = FakeStudyApi::new();
        api.fail_next(WithRoomError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        let action = run_effect(
            &api,
            DashboardEffect::Fetch(FetchRequest {
                tab: Tab::Liked,
                generation: 1,
            }),
        )
        .await;
        let DashboardAction::FetchCompleted { result, .. } = action else {
            panic!("expected fetch completion");
        };
        assert_eq!(result.map_err(|f| f.category), Err(ErrorCategory::Network));
    }

    #[tokio::test]
    async fn test_like_on_own_study_sends_no_toggle() {
        let api = FakeStudyApi::new().with_tab(Tab::Created, vec![study(5)]);
        let state = settle(&api, DashboardState::default(), DashboardAction::Init).await;
        let state = settle(&api, state, DashboardAction::LikeSelected).await;
        assert!(state.confirm.is_none());
        assert!(api.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_like_toggles_interest() {
        let api = FakeStudyApi::new().with_tab(Tab::Participating, vec![study(3)]);
        let state = settle(
            &api,
            DashboardState::default(),
            DashboardAction::SelectTab(Tab::Participating),
        )
        .await;
        let state = settle(&api, state, DashboardAction::LikeSelected).await;
        assert!(state.confirm.is_some());
        let state = settle(&api, state, DashboardAction::ConfirmYes).await;
        assert!(state.studies[0].interest);
        assert!(api.is_liked(3));
        assert_eq!(api.mutations(), vec![Call::Interest(3)]);
    }

    #[tokio::test]
    async fn test_reject_removes_request_row_after_refetch() {
        let mut row = study(7);
        row.member_id = Some(42);
        row.nick_name = Some("kim".to_string());
        let api = FakeStudyApi::new().with_tab(Tab::RequestJoin, vec![row]);
        let state = settle(
            &api,
            DashboardState::default(),
            DashboardAction::SelectTab(Tab::RequestJoin),
        )
        .await;
        assert_eq!(state.studies.len(), 1);

        let state = settle(&api, state, DashboardAction::RespondSelected { accept: false }).await;
        let state = settle(&api, state, DashboardAction::ConfirmYes).await;
        assert!(state.studies.is_empty());
        assert_eq!(
            api.mutations(),
            vec![Call::Respond {
                state: false,
                study_id: 7,
                member_id: 42
            }]
        );
    }
}
