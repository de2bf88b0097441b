//! Leader-only actions on a whole study.

use crate::error::{Result, WithRoomError};
use crate::remote::StudyApi;
use crate::types::StudyId;

use super::{Confirm, Confirmed};

pub const FINISH_REJECTED: &str = "그룹장만 스터디를 마감할 수 있습니다.";
pub const DELETE_FAILED: &str = "스터디 삭제 실패! 다시 시도해주세요.";

pub async fn finish_study(
    api: &impl StudyApi,
    study_id: StudyId,
    confirm: &mut impl Confirm,
) -> Result<Confirmed<()>> {
    if !confirm.confirm("스터디 마감", "스터디를 마감하시겠습니까?") {
        return Ok(Confirmed::Cancelled);
    }
    if !api.finish_study(study_id).await? {
        return Err(WithRoomError::Rejected(FINISH_REJECTED.to_string()));
    }
    tracing::info!(study_id, "study finished");
    Ok(Confirmed::Done(()))
}

pub async fn delete_study(
    api: &impl StudyApi,
    study_id: StudyId,
    confirm: &mut impl Confirm,
) -> Result<Confirmed<()>> {
    if !confirm.confirm("스터디 삭제", "정말로 이 스터디를 삭제하시겠습니까?") {
        return Ok(Confirmed::Cancelled);
    }
    if !api.delete_study(study_id).await? {
        return Err(WithRoomError::Rejected(DELETE_FAILED.to_string()));
    }
    tracing::info!(study_id, "study deleted");
    Ok(Confirmed::Done(()))
}
