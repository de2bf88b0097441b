use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::WithRoomError;

/// Server-assigned study identifier.
pub type StudyId = u64;

/// Study difficulty, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "초급",
            Difficulty::Intermediate => "중급",
            Difficulty::Advanced => "고급",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Difficulty {
    type Err = WithRoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "초급" | "beginner" => Ok(Difficulty::Beginner),
            "중급" | "intermediate" => Ok(Difficulty::Intermediate),
            "고급" | "advanced" => Ok(Difficulty::Advanced),
            other => Err(WithRoomError::Validation(format!(
                "unknown difficulty '{other}' (expected 초급, 중급 or 고급)"
            ))),
        }
    }
}

impl Serialize for Difficulty {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Whether a study meets online or offline. The wire value is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudyType {
    Online,
    Offline,
}

impl StudyType {
    pub fn label(&self) -> &'static str {
        match self {
            StudyType::Online => "온라인",
            StudyType::Offline => "오프라인",
        }
    }

    pub fn wire_value(&self) -> &'static str {
        match self {
            StudyType::Online => "ONLINE",
            StudyType::Offline => "OFFLINE",
        }
    }
}

impl FromStr for StudyType {
    type Err = WithRoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" | "온라인" => Ok(StudyType::Online),
            "offline" | "오프라인" => Ok(StudyType::Offline),
            other => Err(WithRoomError::Validation(format!(
                "unknown study type '{other}' (expected online or offline)"
            ))),
        }
    }
}

impl Serialize for StudyType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_value())
    }
}

/// Unknown enum strings from the server degrade to `None` instead of failing the whole list.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Study {
    pub study_id: StudyId,
    pub title: String,
    pub introduction: Option<String>,
    pub topic: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub difficulty: Option<Difficulty>,
    pub tag: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub study_type: Option<StudyType>,
    pub study_image_url: Option<String>,
    pub now_people: u32,
    pub recruit_people: u32,
    /// Applicant fields, present on request-join rows only
    pub member_id: Option<u64>,
    pub nick_name: Option<String>,
    pub preferred_area: Option<String>,
    pub interest: bool,
    /// Server-side "still accepting members" flag
    pub state: Option<bool>,
    pub finish: Option<bool>,
}

impl Study {
    /// Capacity is full. A record with no capacity at all (0/0) counts as closed.
    pub fn is_closed(&self) -> bool {
        self.now_people == self.recruit_people
    }

    pub fn can_join(&self) -> bool {
        !self.is_closed() && self.state != Some(false)
    }

    /// Tags split from the comma-delimited `tag` field, falling back to `topic`.
    pub fn display_tags(&self) -> Vec<String> {
        let source = self
            .tag
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(self.topic.as_deref())
            .unwrap_or_default();
        split_tags(source)
    }
}

/// Split a comma-delimited tag string into a de-duplicated, order-preserving set.
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    pub comment_id: u64,
    pub content: String,
    pub nick_name: Option<String>,
    pub anonymous: bool,
    pub comment_date_time: Option<String>,
}

impl Comment {
    pub fn display_name(&self) -> &str {
        if self.anonymous {
            "익명"
        } else {
            self.nick_name.as_deref().unwrap_or("익명")
        }
    }

    /// `yyyy-MM-dd HH:mm`, or the raw value when it cannot be parsed.
    pub fn formatted_time(&self) -> String {
        let Some(raw) = self.comment_date_time.as_deref() else {
            return String::new();
        };
        if let Ok(dt) = raw.parse::<jiff::civil::DateTime>() {
            return dt.strftime("%Y-%m-%d %H:%M").to_string();
        }
        if let Ok(ts) = raw.parse::<jiff::Timestamp>() {
            return ts
                .to_zoned(jiff::tz::TimeZone::system())
                .strftime("%Y-%m-%d %H:%M")
                .to_string();
        }
        raw.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => "월",
            Weekday::Tue => "화",
            Weekday::Wed => "수",
            Weekday::Thu => "목",
            Weekday::Fri => "금",
            Weekday::Sat => "토",
            Weekday::Sun => "일",
        }
    }
}

impl FromStr for Weekday {
    type Err = WithRoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|d| d.label() == s)
            .ok_or_else(|| {
                WithRoomError::Validation(format!("unknown weekday '{s}' (expected 월..일)"))
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schedule {
    pub week_day: Option<String>,
    pub start_day: Option<String>,
    pub end_day: Option<String>,
    pub time: Option<String>,
    pub period: Option<String>,
    pub now_people: u32,
    pub recruit_people: u32,
}

impl Schedule {
    pub fn week_days(&self) -> Vec<String> {
        self.week_day
            .as_deref()
            .map(split_tags)
            .unwrap_or_default()
    }

    /// ISO dates compare correctly as strings, which is what the server relies on.
    pub fn is_past_end(&self, today: Date) -> bool {
        match self.end_day.as_deref() {
            Some(end) if !end.is_empty() => today.to_string().as_str() > end,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupLeader {
    pub name: Option<String>,
    pub preferred_area: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberInfo {
    pub nick_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyDetail {
    pub study_detail: Study,
    pub study_group_leader: GroupLeader,
    pub study_schedule_detail: Schedule,
    pub study_comment_list: Vec<Comment>,
}

// Request payloads

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyIdRequest {
    pub study_id: StudyId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinDecision {
    pub state: bool,
    pub study_id: StudyId,
    pub member_id: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub study_id: StudyId,
    pub content: String,
    pub anonymous: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentIdRequest {
    pub comment_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyInfoPayload {
    pub study_image_url: String,
    pub title: String,
    #[serde(rename = "type")]
    pub study_type: StudyType,
    pub recruit_people: u32,
    pub introduction: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub tag: String,
    pub kakao_open_chat_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySchedulePayload {
    pub week_day: String,
    pub start_day: String,
    pub end_day: String,
    pub period: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudyRequest {
    pub study_info: StudyInfoPayload,
    pub study_schedule: StudySchedulePayload,
}
