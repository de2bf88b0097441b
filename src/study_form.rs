//! Study creation wizard.
//!
//! Three steps, `BasicInfo -> Schedule -> Details`, then submission. The
//! image, the date order and the tag count are checked and the user confirms
//! before any network call; the assembled payload is checked after the image
//! upload. If creation fails after the upload succeeded the uploaded image
//! is left orphaned on the server.

use std::path::PathBuf;

use jiff::civil::Date;

use crate::actions::{Confirm, Confirmed};
use crate::error::{Result, WithRoomError};
use crate::remote::StudyApi;
use crate::types::{
    CreateStudyRequest, Difficulty, StudyInfoPayload, StudySchedulePayload, StudyType, Weekday,
    split_tags,
};

pub const IMAGE_REQUIRED: &str = "이미지를 업로드해주세요!";
pub const FIELDS_REQUIRED: &str = "모든 필드를 채워주세요!";
pub const CREATE_WARNING: &str = "스터디 생성 후 수정이 불가능합니다.";
pub const MAX_TAGS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStep {
    #[default]
    BasicInfo,
    Schedule,
    Details,
}

impl FormStep {
    pub fn label(&self) -> &'static str {
        match self {
            FormStep::BasicInfo => "기본 정보",
            FormStep::Schedule => "일정",
            FormStep::Details => "상세 정보",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTransition {
    Moved(FormStep),
    /// `next` on the last step: the draft should be submitted
    Submit,
}

/// Everything the user typed into the wizard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyDraft {
    // Basic info
    pub title: String,
    pub study_type: Option<StudyType>,
    pub recruit_people: Option<u32>,
    pub topic: String,
    // Schedule
    pub week_days: Vec<Weekday>,
    pub start_day: String,
    pub end_day: String,
    pub period: String,
    pub time: String,
    // Details
    pub introduction: String,
    pub difficulty: Option<Difficulty>,
    pub tags: String,
    pub kakao_open_chat_url: String,
    pub image: Option<PathBuf>,
}

impl StudyDraft {
    /// Add or remove a meeting day.
    pub fn toggle_day(&mut self, day: Weekday) {
        if let Some(pos) = self.week_days.iter().position(|d| *d == day) {
            self.week_days.remove(pos);
        } else {
            self.week_days.push(day);
        }
    }

    /// Build the create payload, requiring every field to be filled in.
    pub fn assemble(&self, image_url: String) -> Result<CreateStudyRequest> {
        let missing = || WithRoomError::Validation(FIELDS_REQUIRED.to_string());
        let filled = |s: &str| -> Result<String> {
            let s = s.trim();
            if s.is_empty() {
                Err(missing())
            } else {
                Ok(s.to_string())
            }
        };

        let week_day = self
            .week_days
            .iter()
            .map(Weekday::label)
            .collect::<Vec<_>>()
            .join(", ");

        let request = CreateStudyRequest {
            study_info: StudyInfoPayload {
                study_image_url: filled(&image_url)?,
                title: filled(&self.title)?,
                study_type: self.study_type.ok_or_else(missing)?,
                recruit_people: self.recruit_people.filter(|n| *n > 0).ok_or_else(missing)?,
                introduction: filled(&self.introduction)?,
                topic: filled(&self.topic)?,
                difficulty: self.difficulty.ok_or_else(missing)?,
                tag: filled(&self.tags)?,
                kakao_open_chat_url: filled(&self.kakao_open_chat_url)?,
            },
            study_schedule: StudySchedulePayload {
                week_day: filled(&week_day)?,
                start_day: filled(&self.start_day)?,
                end_day: filled(&self.end_day)?,
                period: filled(&self.period)?,
                time: filled(&self.time)?,
            },
        };
        check_schedule_and_tags(
            &request.study_schedule.start_day,
            &request.study_schedule.end_day,
            &request.study_info.tag,
        )?;
        Ok(request)
    }

    /// Date order and tag count, checked on whatever has been filled in.
    pub fn check_schedule_and_tags(&self) -> Result<()> {
        check_schedule_and_tags(&self.start_day, &self.end_day, &self.tags)
    }
}

fn parse_day(raw: &str) -> Result<Date> {
    raw.parse::<Date>().map_err(|_| {
        WithRoomError::Validation(format!("날짜는 YYYY-MM-DD 형식이어야 합니다: '{raw}'"))
    })
}

fn check_schedule_and_tags(start_day: &str, end_day: &str, tags: &str) -> Result<()> {
    let (start_day, end_day) = (start_day.trim(), end_day.trim());
    // Blank dates are reported by the required-field check
    if !start_day.is_empty() && !end_day.is_empty() {
        let start = parse_day(start_day)?;
        let end = parse_day(end_day)?;
        if end < start {
            return Err(WithRoomError::Validation(
                "종료일은 시작일보다 빠를 수 없습니다.".to_string(),
            ));
        }
    }

    let tag_count = split_tags(tags).len();
    if tag_count > MAX_TAGS {
        return Err(WithRoomError::Validation(format!(
            "태그는 최대 {MAX_TAGS}개까지 입력할 수 있습니다. ({tag_count}개)"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyWizard {
    pub step: FormStep,
    pub draft: StudyDraft,
}

impl StudyWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> StepTransition {
        match self.step {
            FormStep::BasicInfo => {
                self.step = FormStep::Schedule;
                StepTransition::Moved(self.step)
            }
            FormStep::Schedule => {
                self.step = FormStep::Details;
                StepTransition::Moved(self.step)
            }
            FormStep::Details => StepTransition::Submit,
        }
    }

    /// Go back one step. Returns `false` on the first step.
    pub fn back(&mut self) -> bool {
        match self.step {
            FormStep::BasicInfo => false,
            FormStep::Schedule => {
                self.step = FormStep::BasicInfo;
                true
            }
            FormStep::Details => {
                self.step = FormStep::Schedule;
                true
            }
        }
    }
}

/// Check locally, confirm, upload the cover image, then create the study.
pub async fn submit_study(
    api: &impl StudyApi,
    draft: &StudyDraft,
    confirm: &mut impl Confirm,
) -> Result<Confirmed<()>> {
    let image = draft
        .image
        .as_deref()
        .ok_or_else(|| WithRoomError::Validation(IMAGE_REQUIRED.to_string()))?;
    draft.check_schedule_and_tags()?;

    if !confirm.confirm("모든 필드를 다 채우셨나요?", CREATE_WARNING) {
        tracing::info!("study creation cancelled");
        return Ok(Confirmed::Cancelled);
    }

    let image_url = api.upload_study_image(image).await?;
    tracing::debug!(%image_url, "study image uploaded");

    let request = match draft.assemble(image_url.clone()) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(%image_url, "study payload incomplete, uploaded image is orphaned");
            return Err(e);
        }
    };

    if let Err(e) = api.create_study(&request).await {
        tracing::warn!(%image_url, error = %e, "study creation failed, uploaded image is orphaned");
        return Err(e);
    }
    tracing::info!(title = %request.study_info.title, "study created");
    Ok(Confirmed::Done(()))
}
