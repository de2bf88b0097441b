//! In-memory [`StudyApi`] for unit tests.
//!
//! Records every mutating call so tests can assert which requests were (or
//! were not) sent.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use crate::error::{Result, WithRoomError};
use crate::feed::StudyFilters;
use crate::tabs::Tab;
use crate::types::{
    Comment, CreateStudyRequest, JoinDecision, MemberInfo, NewComment, Study, StudyDetail,
    StudyId,
};

use super::StudyApi;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fetch(Tab),
    Detail(StudyId),
    Create(CreateStudyRequest),
    Delete(StudyId),
    Finish(StudyId),
    Join(StudyId),
    Interest(StudyId),
    Respond { state: bool, study_id: StudyId, member_id: u64 },
    Comment(StudyId, String),
    DeleteComment(u64),
    Upload(String),
    Filter(Vec<(&'static str, String)>),
    Logout,
}

#[derive(Default)]
struct Inner {
    tabs: HashMap<Tab, Vec<Study>>,
    feed: Vec<Study>,
    details: HashMap<StudyId, StudyDetail>,
    liked: HashSet<StudyId>,
    join_verdict: Option<bool>,
    finish_verdict: Option<bool>,
    delete_verdict: Option<bool>,
    fail_next: Option<WithRoomError>,
    calls: Vec<Call>,
    next_comment_id: u64,
}

#[derive(Default)]
pub struct FakeStudyApi {
    inner: Mutex<Inner>,
}

impl FakeStudyApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(self, tab: Tab, studies: Vec<Study>) -> Self {
        self.lock().tabs.insert(tab, studies);
        self
    }

    pub fn with_feed(self, studies: Vec<Study>) -> Self {
        self.lock().feed = studies;
        self
    }

    pub fn with_detail(self, detail: StudyDetail) -> Self {
        self.lock()
            .details
            .insert(detail.study_detail.study_id, detail);
        self
    }

    pub fn with_join_verdict(self, verdict: bool) -> Self {
        self.lock().join_verdict = Some(verdict);
        self
    }

    pub fn with_finish_verdict(self, verdict: bool) -> Self {
        self.lock().finish_verdict = Some(verdict);
        self
    }

    pub fn with_delete_verdict(self, verdict: bool) -> Self {
        self.lock().delete_verdict = Some(verdict);
        self
    }

    /// Make the next call fail with `err`.
    pub fn fail_next(&self, err: WithRoomError) {
        self.lock().fail_next = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Calls that change server state.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Fetch(_) | Call::Detail(_) | Call::Filter(_)))
            .collect()
    }

    pub fn is_liked(&self, study_id: StudyId) -> bool {
        self.lock().liked.contains(&study_id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    fn begin(&self, call: Option<Call>) -> Result<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.lock();
        if let Some(call) = call {
            inner.calls.push(call);
        }
        match inner.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(inner),
        }
    }
}

impl StudyApi for FakeStudyApi {
    async fn login_state(&self) -> Result<bool> {
        self.begin(None)?;
        Ok(true)
    }

    async fn member_info(&self) -> Result<MemberInfo> {
        self.begin(None)?;
        Ok(MemberInfo {
            nick_name: Some("tester".to_string()),
        })
    }

    async fn home_feed(&self) -> Result<Vec<Study>> {
        Ok(self.begin(None)?.feed.clone())
    }

    async fn filter_feed(&self, filters: &StudyFilters) -> Result<Vec<Study>> {
        let inner = self.begin(Some(Call::Filter(filters.query_pairs())))?;
        Ok(inner.feed.clone())
    }

    async fn search_title(&self, title: &str) -> Result<Vec<Study>> {
        let inner = self.begin(None)?;
        Ok(inner
            .feed
            .iter()
            .filter(|s| s.title.contains(title))
            .cloned()
            .collect())
    }

    async fn my_studies(&self, tab: Tab) -> Result<Vec<Study>> {
        let inner = self.begin(Some(Call::Fetch(tab)))?;
        let liked = inner.liked.clone();
        Ok(inner
            .tabs
            .get(&tab)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|mut s| {
                s.interest = liked.contains(&s.study_id);
                s
            })
            .collect())
    }

    async fn study_detail(&self, study_id: StudyId) -> Result<StudyDetail> {
        let inner = self.begin(Some(Call::Detail(study_id)))?;
        inner.details.get(&study_id).cloned().ok_or(WithRoomError::Api {
            status: 404,
            message: format!("/study/info/detail: no study {study_id}"),
        })
    }

    async fn create_study(&self, request: &CreateStudyRequest) -> Result<()> {
        self.begin(Some(Call::Create(request.clone())))?;
        Ok(())
    }

    async fn delete_study(&self, study_id: StudyId) -> Result<bool> {
        let inner = self.begin(Some(Call::Delete(study_id)))?;
        Ok(inner.delete_verdict.unwrap_or(true))
    }

    async fn finish_study(&self, study_id: StudyId) -> Result<bool> {
        let inner = self.begin(Some(Call::Finish(study_id)))?;
        Ok(inner.finish_verdict.unwrap_or(true))
    }

    async fn join_study(&self, study_id: StudyId) -> Result<bool> {
        let inner = self.begin(Some(Call::Join(study_id)))?;
        Ok(inner.join_verdict.unwrap_or(true))
    }

    async fn toggle_interest(&self, study_id: StudyId) -> Result<bool> {
        let mut inner = self.begin(Some(Call::Interest(study_id)))?;
        if !inner.liked.remove(&study_id) {
            inner.liked.insert(study_id);
        }
        Ok(true)
    }

    async fn respond_join(&self, decision: &JoinDecision) -> Result<()> {
        let mut inner = self.begin(Some(Call::Respond {
            state: decision.state,
            study_id: decision.study_id,
            member_id: decision.member_id,
        }))?;
        if let Some(rows) = inner.tabs.get_mut(&Tab::RequestJoin) {
            rows.retain(|s| {
                !(s.study_id == decision.study_id && s.member_id == Some(decision.member_id))
            });
        }
        Ok(())
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<()> {
        let mut inner = self.begin(Some(Call::Comment(
            comment.study_id,
            comment.content.clone(),
        )))?;
        inner.next_comment_id += 1;
        let comment_id = inner.next_comment_id;
        if let Some(detail) = inner.details.get_mut(&comment.study_id) {
            detail.study_comment_list.push(Comment {
                comment_id,
                content: comment.content.clone(),
                nick_name: Some("tester".to_string()),
                anonymous: comment.anonymous,
                comment_date_time: Some("2024-05-01T10:00:00".to_string()),
            });
        }
        Ok(())
    }

    async fn delete_comment(&self, comment_id: u64) -> Result<bool> {
        let mut inner = self.begin(Some(Call::DeleteComment(comment_id)))?;
        let mut removed = false;
        for detail in inner.details.values_mut() {
            let before = detail.study_comment_list.len();
            detail
                .study_comment_list
                .retain(|c| c.comment_id != comment_id);
            removed |= detail.study_comment_list.len() != before;
        }
        Ok(removed)
    }

    async fn upload_study_image(&self, path: &Path) -> Result<String> {
        self.begin(Some(Call::Upload(path.display().to_string())))?;
        Ok(format!(
            "https://images.example.com/{}",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        ))
    }

    async fn logout(&self) -> Result<()> {
        self.begin(Some(Call::Logout))?;
        Ok(())
    }
}
