//! Access to the WITH ROOM REST API.
//!
//! [`StudyApi`] is the seam between the client logic and the network. The
//! production implementation is [`HttpStudyApi`]; tests substitute an
//! in-memory backend.

pub mod client;
pub mod error;
#[cfg(test)]
pub(crate) mod fake;

use std::future::Future;
use std::path::Path;

use crate::error::Result;
use crate::feed::StudyFilters;
use crate::tabs::Tab;
use crate::types::{
    CreateStudyRequest, JoinDecision, MemberInfo, NewComment, Study, StudyDetail, StudyId,
};

pub use client::HttpStudyApi;
pub use error::ApiError;

/// Every backend call the client makes.
///
/// Calls returning `bool` report the server's verdict; a `false` is a
/// business-rule rejection, not a transport error.
pub trait StudyApi: Send + Sync {
    /// `GET /oauth/login/state`
    fn login_state(&self) -> impl Future<Output = Result<bool>> + Send;

    /// `GET /member/mypage/info`
    fn member_info(&self) -> impl Future<Output = Result<MemberInfo>> + Send;

    /// `GET /home/info`
    fn home_feed(&self) -> impl Future<Output = Result<Vec<Study>>> + Send;

    /// `GET /home/filter/info` with only the non-empty filters as query params
    fn filter_feed(
        &self,
        filters: &StudyFilters,
    ) -> impl Future<Output = Result<Vec<Study>>> + Send;

    /// `GET /home/filter/title?title=`
    fn search_title(&self, title: &str) -> impl Future<Output = Result<Vec<Study>>> + Send;

    /// One of the five "My Info" lists
    fn my_studies(&self, tab: Tab) -> impl Future<Output = Result<Vec<Study>>> + Send;

    fn study_detail(&self, study_id: StudyId)
    -> impl Future<Output = Result<StudyDetail>> + Send;

    fn create_study(
        &self,
        request: &CreateStudyRequest,
    ) -> impl Future<Output = Result<()>> + Send;

    fn delete_study(&self, study_id: StudyId) -> impl Future<Output = Result<bool>> + Send;

    fn finish_study(&self, study_id: StudyId) -> impl Future<Output = Result<bool>> + Send;

    fn join_study(&self, study_id: StudyId) -> impl Future<Output = Result<bool>> + Send;

    /// Flip the caller's interest in a study; the server decides the result.
    fn toggle_interest(&self, study_id: StudyId) -> impl Future<Output = Result<bool>> + Send;

    fn respond_join(&self, decision: &JoinDecision) -> impl Future<Output = Result<()>> + Send;

    fn create_comment(&self, comment: &NewComment) -> impl Future<Output = Result<()>> + Send;

    fn delete_comment(&self, comment_id: u64) -> impl Future<Output = Result<bool>> + Send;

    /// Upload a cover image and return its public URL.
    fn upload_study_image(&self, path: &Path) -> impl Future<Output = Result<String>> + Send;

    fn logout(&self) -> impl Future<Output = Result<()>> + Send;
}
