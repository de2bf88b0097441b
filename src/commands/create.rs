//! `withroom create`: the creation wizard driven from command-line flags.

use owo_colors::OwoColorize;

use super::{connect, print_cancelled};
use crate::actions::{Confirm, Confirmed};
use crate::cli::CreateArgs;
use crate::error::{Result, WithRoomError};
use crate::study_form::{
    FormStep, IMAGE_REQUIRED, StepTransition, StudyDraft, StudyWizard, submit_study,
};

/// Walk the wizard steps, filling each step's fields from `args`.
pub fn draft_from_args(args: CreateArgs) -> StudyDraft {
    let mut wizard = StudyWizard::new();
    loop {
        let draft = &mut wizard.draft;
        match wizard.step {
            FormStep::BasicInfo => {
                draft.title = args.title.clone().unwrap_or_default();
                draft.study_type = args.study_type;
                draft.recruit_people = args.recruit;
                draft.topic = args.topic.clone().unwrap_or_default();
            }
            FormStep::Schedule => {
                for day in &args.days {
                    if !draft.week_days.contains(day) {
                        draft.toggle_day(*day);
                    }
                }
                draft.start_day = args.start.clone().unwrap_or_default();
                draft.end_day = args.end.clone().unwrap_or_default();
                draft.period = args.period.clone().unwrap_or_default();
                draft.time = args.time.clone().unwrap_or_default();
            }
            FormStep::Details => {
                draft.introduction = args.introduction.clone().unwrap_or_default();
                draft.difficulty = args.difficulty;
                draft.tags = args.tags.clone().unwrap_or_default();
                draft.kakao_open_chat_url = args.chat_url.clone().unwrap_or_default();
                draft.image = args.image.clone();
            }
        }
        tracing::debug!(step = wizard.step.label(), "wizard step filled");
        if wizard.next() == StepTransition::Submit {
            return wizard.draft;
        }
    }
}

pub async fn cmd_create(args: CreateArgs, confirm: &mut impl Confirm) -> Result<()> {
    let draft = draft_from_args(args);
    // Fail before loading credentials so a missing image never needs a login.
    if draft.image.is_none() {
        return Err(WithRoomError::Validation(IMAGE_REQUIRED.to_string()));
    }
    draft.check_schedule_and_tags()?;
    let api = connect()?;
    match submit_study(&api, &draft, confirm).await? {
        Confirmed::Done(()) => println!("{}", "스터디가 생성되었습니다.".green()),
        Confirmed::Cancelled => print_cancelled(),
    }
    Ok(())
}
