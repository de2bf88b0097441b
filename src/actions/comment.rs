use crate::error::{Result, WithRoomError};
use crate::remote::StudyApi;
use crate::types::{Comment, NewComment, StudyId};

use super::{Confirm, Confirmed};

pub const COMMENT_MAX_CHARS: usize = 300;
pub const COMMENT_EMPTY: &str = "댓글을 입력해주세요.";
pub const COMMENT_DELETE_FAILED: &str = "댓글 삭제 실패! 다시 시도해주세요.";

/// Trimmed comment text, or a validation error if it is empty or too long.
pub fn validate_comment(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(WithRoomError::Validation(COMMENT_EMPTY.to_string()));
    }
    let chars = trimmed.chars().count();
    if chars > COMMENT_MAX_CHARS {
        return Err(WithRoomError::Validation(format!(
            "댓글은 {COMMENT_MAX_CHARS}자 이하로 입력해주세요. ({chars}자)"
        )));
    }
    Ok(trimmed.to_string())
}

/// Post a comment and return the refreshed comment list.
pub async fn create_comment(
    api: &impl StudyApi,
    study_id: StudyId,
    content: &str,
    anonymous: bool,
) -> Result<Vec<Comment>> {
    let content = validate_comment(content)?;
    api.create_comment(&NewComment {
        study_id,
        content,
        anonymous,
    })
    .await?;
    tracing::info!(study_id, anonymous, "comment created");
    refetch_comments(api, study_id).await
}

pub async fn delete_comment(
    api: &impl StudyApi,
    study_id: StudyId,
    comment_id: u64,
    confirm: &mut impl Confirm,
) -> Result<Confirmed<Vec<Comment>>> {
    if !confirm.confirm("댓글 삭제", "삭제하시겠습니까?") {
        return Ok(Confirmed::Cancelled);
    }
    if !api.delete_comment(comment_id).await? {
        return Err(WithRoomError::Rejected(COMMENT_DELETE_FAILED.to_string()));
    }
    tracing::info!(study_id, comment_id, "comment deleted");
    Ok(Confirmed::Done(refetch_comments(api, study_id).await?))
}

async fn refetch_comments(api: &impl StudyApi, study_id: StudyId) -> Result<Vec<Comment>> {
    Ok(api.study_detail(study_id).await?.study_comment_list)
}
