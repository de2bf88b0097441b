//! Commands acting on a single study: show, like, join, accept/reject,
//! finish and delete.

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, connect, print_cancelled, study_json};
use crate::actions::{
    Confirm, Confirmed, LikeOutcome, delete_study, finish_study, join_study, respond_to_request,
    toggle_like,
};
use crate::cli::OutputOptions;
use crate::detail::{DetailState, load_detail};
use crate::display::format_detail;
use crate::error::{Result, WithRoomError};
use crate::remote::StudyApi;
use crate::tabs::Tab;
use crate::types::{Study, StudyId};

fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}

/// Load the detail, offering a retry after each failure.
pub(crate) async fn load_with_retry(
    api: &impl StudyApi,
    study_id: StudyId,
    confirm: &mut impl Confirm,
) -> Result<DetailState> {
    loop {
        let state = load_detail(api, study_id, today()).await;
        match &state {
            DetailState::Failed(message) if state.can_retry() => {
                eprintln!("{}", message.red());
                if !confirm.confirm("재시도", "다시 시도하시겠습니까?") {
                    return Err(WithRoomError::Other(message.clone()));
                }
            }
            _ => return Ok(state),
        }
    }
}

pub async fn cmd_show(study_id: StudyId, output: OutputOptions) -> Result<()> {
    let api = connect()?;
    let mut confirm = super::PromptConfirm::new(false);
    let DetailState::Loaded(loaded) = load_with_retry(&api, study_id, &mut confirm).await? else {
        return Ok(());
    };

    let detail = &loaded.detail;
    let schedule = &detail.study_schedule_detail;
    let json_output = json!({
        "study": study_json(&detail.study_detail),
        "finished": loaded.finished,
        "leader": {
            "name": detail.study_group_leader.name,
            "preferredArea": detail.study_group_leader.preferred_area,
        },
        "schedule": {
            "weekDays": schedule.week_days(),
            "startDay": schedule.start_day,
            "endDay": schedule.end_day,
            "time": schedule.time,
            "period": schedule.period,
            "nowPeople": schedule.now_people,
            "recruitPeople": schedule.recruit_people,
        },
        "comments": detail.study_comment_list.iter().map(|c| json!({
            "commentId": c.comment_id,
            "author": c.display_name(),
            "content": c.content,
            "time": c.formatted_time(),
        })).collect::<Vec<_>>(),
    });

    CommandOutput::new(json_output)
        .with_text(format_detail(&loaded))
        .print(output)
}

/// Whether the caller currently likes `study_id`, per the Liked tab.
pub(crate) async fn is_liked(api: &impl StudyApi, study_id: StudyId) -> Result<bool> {
    let liked = api.my_studies(Tab::Liked).await?;
    Ok(liked.iter().any(|s| s.study_id == study_id))
}

pub async fn cmd_like(study_id: StudyId, confirm: &mut impl Confirm) -> Result<()> {
    let api = connect()?;
    let currently_liked = is_liked(&api, study_id).await?;
    match toggle_like(&api, study_id, currently_liked, confirm).await? {
        LikeOutcome::Toggled { now_liked: true } => {
            println!("{}", "관심 스터디로 등록되었습니다.".green())
        }
        LikeOutcome::Toggled { now_liked: false } => {
            println!("{}", "관심 스터디에서 해제되었습니다.".green())
        }
        LikeOutcome::Cancelled => print_cancelled(),
    }
    Ok(())
}

/// The study as seen by the join flow.
///
/// The detail page shows capacity from the schedule, so the schedule's
/// counts win whenever it carries any; the study record is the fallback.
pub(crate) async fn joinable_study(api: &impl StudyApi, study_id: StudyId) -> Result<Study> {
    let detail = api.study_detail(study_id).await?;
    let schedule = &detail.study_schedule_detail;
    let mut study = detail.study_detail.clone();
    study.study_id = study_id;
    if schedule.now_people != 0 || schedule.recruit_people != 0 {
        study.now_people = schedule.now_people;
        study.recruit_people = schedule.recruit_people;
    }
    Ok(study)
}

pub async fn cmd_join(study_id: StudyId, confirm: &mut impl Confirm) -> Result<()> {
    let api = connect()?;
    let study = joinable_study(&api, study_id).await?;
    match join_study(&api, &study, confirm).await? {
        Confirmed::Done(()) => println!("{}", "스터디 신청 완료".green()),
        Confirmed::Cancelled => print_cancelled(),
    }
    Ok(())
}

/// The request-join row for one applicant.
pub(crate) async fn find_request(
    api: &impl StudyApi,
    study_id: StudyId,
    member_id: u64,
) -> Result<Study> {
    api.my_studies(Tab::RequestJoin)
        .await?
        .into_iter()
        .find(|row| row.study_id == study_id && row.member_id == Some(member_id))
        .ok_or_else(|| {
            WithRoomError::Validation(format!(
                "no pending join request from member {member_id} for study {study_id}"
            ))
        })
}

async fn respond(
    study_id: StudyId,
    member_id: u64,
    accept: bool,
    confirm: &mut impl Confirm,
) -> Result<()> {
    let api = connect()?;
    let row = find_request(&api, study_id, member_id).await?;
    match respond_to_request(&api, &row, accept, confirm).await? {
        Confirmed::Done(()) => {
            let message = if accept {
                "참여 요청을 수락했습니다."
            } else {
                "참여 요청을 거절했습니다."
            };
            println!("{}", message.green());
        }
        Confirmed::Cancelled => print_cancelled(),
    }
    Ok(())
}

pub async fn cmd_accept(
    study_id: StudyId,
    member_id: u64,
    confirm: &mut impl Confirm,
) -> Result<()> {
    respond(study_id, member_id, true, confirm).await
}

pub async fn cmd_reject(
    study_id: StudyId,
    member_id: u64,
    confirm: &mut impl Confirm,
) -> Result<()> {
    respond(study_id, member_id, false, confirm).await
}

pub async fn cmd_finish(study_id: StudyId, confirm: &mut impl Confirm) -> Result<()> {
    let api = connect()?;
    match finish_study(&api, study_id, confirm).await? {
        Confirmed::Done(()) => println!("{}", "스터디가 마감되었습니다.".green()),
        Confirmed::Cancelled => print_cancelled(),
    }
    Ok(())
}

pub async fn cmd_delete(study_id: StudyId, confirm: &mut impl Confirm) -> Result<()> {
    let api = connect()?;
    match delete_study(&api, study_id, confirm).await? {
        Confirmed::Done(()) => println!("{}", "스터디가 삭제되었습니다.".green()),
        Confirmed::Cancelled => print_cancelled(),
    }
    Ok(())
}
