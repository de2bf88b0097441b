//! Plain-terminal rendering of study lists and details for the CLI.
//!
//! Cards come from [`crate::render`] so the CLI and the dashboard agree on
//! what a card shows.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::detail::{LoadedDetail, plain_text};
use crate::render::{CardActions, ListContent, StudyCardView};
use crate::types::Comment;

#[derive(Tabled)]
struct StudyRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "제목")]
    title: String,
    #[tabled(rename = "난이도")]
    difficulty: String,
    #[tabled(rename = "유형")]
    study_type: String,
    #[tabled(rename = "인원")]
    capacity: String,
    #[tabled(rename = "태그")]
    tags: String,
    #[tabled(rename = "관심")]
    liked: String,
}

#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "제목")]
    title: String,
    #[tabled(rename = "신청자")]
    applicant: String,
    #[tabled(rename = "회원 ID")]
    member_id: String,
    #[tabled(rename = "선호 지역")]
    preferred_area: String,
}

fn study_row(card: &StudyCardView) -> StudyRow {
    StudyRow {
        id: card.key.study_id,
        title: card.title.clone(),
        difficulty: card.difficulty.unwrap_or("-").to_string(),
        study_type: card.study_type.unwrap_or("-").to_string(),
        capacity: card.capacity.to_string(),
        tags: card.tags.join(" "),
        liked: if card.liked { "♥" } else { "" }.to_string(),
    }
}

fn request_row(card: &StudyCardView) -> RequestRow {
    let (applicant, preferred_area) = match &card.actions {
        CardActions::Respond {
            applicant,
            preferred_area,
        } => (applicant.clone(), preferred_area.clone().unwrap_or_default()),
        CardActions::Join { .. } => (String::new(), String::new()),
    };
    RequestRow {
        id: card.key.study_id,
        title: card.title.clone(),
        applicant,
        member_id: card
            .key
            .member_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        preferred_area,
    }
}

/// Table of study cards; join-request cards get the applicant columns.
pub fn format_cards(cards: &[StudyCardView]) -> String {
    let is_request = cards
        .iter()
        .any(|c| matches!(c.actions, CardActions::Respond { .. }));
    let mut table = if is_request {
        Table::new(cards.iter().map(request_row))
    } else {
        Table::new(cards.iter().map(study_row))
    };
    table.with(Style::rounded());
    table.to_string()
}

/// A whole list area: loading never reaches the CLI, so only error, empty
/// and cards are rendered.
pub fn format_list(content: &ListContent) -> String {
    match content {
        ListContent::Loading => "불러오는 중…".dimmed().to_string(),
        ListContent::Error(message) => message.red().to_string(),
        ListContent::Empty(message) => message.dimmed().to_string(),
        ListContent::Cards { cards, .. } => format_cards(cards),
    }
}

pub fn format_page_footer(page: usize, page_count: usize) -> Option<String> {
    (page_count > 1).then(|| format!("page {page}/{page_count}").dimmed().to_string())
}

pub fn format_comment(comment: &Comment) -> String {
    let time = comment.formatted_time();
    format!(
        "  {} {} {}\n    {}",
        format!("#{}", comment.comment_id).dimmed(),
        comment.display_name().cyan(),
        time.dimmed(),
        comment.content
    )
}

pub fn format_detail(loaded: &LoadedDetail) -> String {
    let study = &loaded.detail.study_detail;
    let leader = &loaded.detail.study_group_leader;
    let schedule = &loaded.detail.study_schedule_detail;

    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        study.title.bold(),
        if loaded.finished {
            "[마감]".red().to_string()
        } else {
            "[모집 중]".green().to_string()
        }
    ));

    let field = |label: &str, value: Option<&str>| -> String {
        format!("{}: {}\n", label.cyan(), value.unwrap_or("-"))
    };
    out.push_str(&field("주제", study.topic.as_deref()));
    out.push_str(&field("난이도", study.difficulty.map(|d| d.label())));
    out.push_str(&field("유형", study.study_type.map(|t| t.label())));
    out.push_str(&format!(
        "{}: {}/{}\n",
        "인원".cyan(),
        schedule.now_people,
        schedule.recruit_people
    ));
    let days = schedule.week_days().join(", ");
    out.push_str(&field(
        "요일",
        Some(days.as_str()).filter(|d| !d.is_empty()),
    ));
    out.push_str(&format!(
        "{}: {} ~ {}\n",
        "기간".cyan(),
        schedule.start_day.as_deref().unwrap_or("-"),
        schedule.end_day.as_deref().unwrap_or("-"),
    ));
    out.push_str(&field("시간", schedule.time.as_deref()));
    out.push_str(&field("진행 기간", schedule.period.as_deref()));
    out.push_str(&field("그룹장", leader.name.as_deref()));
    out.push_str(&field("선호 지역", leader.preferred_area.as_deref()));

    let tags = study.display_tags();
    if !tags.is_empty() {
        let tags: Vec<String> = tags.iter().map(|t| format!("#{t}")).collect();
        out.push_str(&format!("{}\n", tags.join(" ").magenta()));
    }

    if let Some(intro) = study.introduction.as_deref() {
        out.push('\n');
        out.push_str(&plain_text(intro));
        out.push('\n');
    }

    let comments = &loaded.detail.study_comment_list;
    out.push_str(&format!(
        "\n{}\n",
        format!("댓글 ({})", comments.len()).bold()
    ));
    for comment in comments {
        out.push_str(&format_comment(comment));
        out.push('\n');
    }
    out
}
