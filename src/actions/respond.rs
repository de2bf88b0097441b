use crate::error::{Result, WithRoomError};
use crate::remote::StudyApi;
use crate::types::{JoinDecision, Study};

use super::{Confirm, Confirmed};

/// Accept (`accept = true`) or reject an applicant on a request-join row.
///
/// The caller refetches its own list afterwards.
pub async fn respond_to_request(
    api: &impl StudyApi,
    row: &Study,
    accept: bool,
    confirm: &mut impl Confirm,
) -> Result<Confirmed<()>> {
    let member_id = row.member_id.ok_or_else(|| {
        WithRoomError::Validation(format!(
            "study {} has no applicant to respond to",
            row.study_id
        ))
    })?;

    let applicant = row.nick_name.as_deref().unwrap_or("신청자");
    let (title, message) = if accept {
        ("스터디 참여 요청 수락", format!("{applicant}님의 참여 요청을 수락하시겠습니까?"))
    } else {
        ("스터디 참여 요청 거절", format!("{applicant}님의 참여 요청을 거절하시겠습니까?"))
    };
    if !confirm.confirm(title, &message) {
        return Ok(Confirmed::Cancelled);
    }

    send_response(api, row.study_id, member_id, accept).await?;
    Ok(Confirmed::Done(()))
}

pub async fn send_response(
    api: &impl StudyApi,
    study_id: u64,
    member_id: u64,
    accept: bool,
) -> Result<()> {
    api.respond_join(&JoinDecision {
        state: accept,
        study_id,
        member_id,
    })
    .await?;
    tracing::info!(study_id, member_id, accept, "join request answered");
    Ok(())
}
