use crate::error::{Result, WithRoomError};
use crate::remote::StudyApi;
use crate::tabs::Tab;
use crate::types::StudyId;

use super::Confirm;

pub const LEADER_CANNOT_LIKE: &str = "스터디 그룹장은 관심 추가할 수 없습니다.";
pub const LIKE_FAILED: &str = "관심 등록에 실패했습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Toggled { now_liked: bool },
    Cancelled,
}

pub fn confirm_text(currently_liked: bool) -> (&'static str, &'static str) {
    if currently_liked {
        ("관심 취소", "관심 스터디에서 삭제하시겠습니까?")
    } else {
        ("관심 등록", "관심 스터디로 등록하시겠습니까?")
    }
}

/// Reject likes on the caller's own studies. Sends no mutation.
pub async fn check_like_allowed(api: &impl StudyApi, study_id: StudyId) -> Result<()> {
    let led = api.my_studies(Tab::Created).await?;
    if led.iter().any(|s| s.study_id == study_id) {
        tracing::info!(study_id, "like refused: caller leads this study");
        return Err(WithRoomError::Rejected(LEADER_CANNOT_LIKE.to_string()));
    }
    Ok(())
}

/// Send the toggle and return the new liked value.
pub async fn send_like_toggle(
    api: &impl StudyApi,
    study_id: StudyId,
    currently_liked: bool,
) -> Result<bool> {
    if api.toggle_interest(study_id).await? {
        tracing::info!(study_id, now_liked = !currently_liked, "interest toggled");
        Ok(!currently_liked)
    } else {
        Err(WithRoomError::Rejected(LIKE_FAILED.to_string()))
    }
}

pub async fn toggle_like(
    api: &impl StudyApi,
    study_id: StudyId,
    currently_liked: bool,
    confirm: &mut impl Confirm,
) -> Result<LikeOutcome> {
    check_like_allowed(api, study_id).await?;

    let (title, message) = confirm_text(currently_liked);
    if !confirm.confirm(title, message) {
        return Ok(LikeOutcome::Cancelled);
    }

    let now_liked = send_like_toggle(api, study_id, currently_liked).await?;
    Ok(LikeOutcome::Toggled { now_liked })
}
