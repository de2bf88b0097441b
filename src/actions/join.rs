use crate::error::{Result, WithRoomError};
use crate::remote::StudyApi;
use crate::types::Study;

use super::{Confirm, Confirmed};

pub const JOIN_REJECTED: &str =
    "그룹장이거나 이미 신청한 스터디입니다. 그룹장은 스터디에 참여할 수 없습니다.";
pub const JOIN_CLOSED: &str = "모집이 마감된 스터디입니다.";

/// Apply to join `study`.
///
/// Capacity numbers are left untouched; they change on the next fetch.
pub async fn join_study(
    api: &impl StudyApi,
    study: &Study,
    confirm: &mut impl Confirm,
) -> Result<Confirmed<()>> {
    if !study.can_join() {
        return Err(WithRoomError::Validation(JOIN_CLOSED.to_string()));
    }
    if !confirm.confirm("스터디 신청", "이 스터디에 참여 신청하시겠습니까?") {
        return Ok(Confirmed::Cancelled);
    }

    if api.join_study(study.study_id).await? {
        tracing::info!(study_id = study.study_id, "join requested");
        Ok(Confirmed::Done(()))
    } else {
        tracing::info!(study_id = study.study_id, "join refused by server");
        Err(WithRoomError::Rejected(JOIN_REJECTED.to_string()))
    }
}
