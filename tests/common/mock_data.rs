use withroom::types::{Difficulty, Study, StudyType};

/// Open study with room for four.
pub fn mock_study(id: u64) -> Study {
    Study {
        study_id: id,
        title: format!("스터디 {id}"),
        topic: Some("프로젝트".to_string()),
        difficulty: Some(Difficulty::Beginner),
        study_type: Some(StudyType::Online),
        tag: Some("rust, cli".to_string()),
        now_people: 1,
        recruit_people: 4,
        ..Default::default()
    }
}

pub fn mock_studies(count: u64) -> Vec<Study> {
    (1..=count).map(mock_study).collect()
}

/// A request-join row: one applicant for one study.
pub fn mock_request(study_id: u64, member_id: u64, nick: &str) -> Study {
    Study {
        member_id: Some(member_id),
        nick_name: Some(nick.to_string()),
        preferred_area: Some("서울".to_string()),
        ..mock_study(study_id)
    }
}
