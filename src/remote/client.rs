//! HTTP implementation of [`StudyApi`].
//!
//! # Security
//!
//! The bearer token is only exposed while building the `Authorization`
//! header. The header value is marked sensitive and wrapped in
//! `RedactedHeader`, so neither reqwest's debug output nor our own tracing
//! can print it.

use std::fmt;
use std::path::Path;

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, multipart};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::auth::AuthContext;
use crate::config::Config;
use crate::error::{Result, WithRoomError};
use crate::feed::StudyFilters;
use crate::tabs::{Tab, extract_tab_studies};
use crate::types::{
    CommentIdRequest, CreateStudyRequest, JoinDecision, MemberInfo, NewComment, Study,
    StudyDetail, StudyId, StudyIdRequest,
};

use super::{ApiError, StudyApi};

const HOME_LIST_FIELD: &str = "homeStudyInfoList";

/// Bearer header value that never prints its contents.
struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    fn bearer(auth: &AuthContext) -> Result<Self> {
        Ok(Self {
            value: format!("Bearer {}", auth.token()?.expose_secret()),
        })
    }

    fn as_header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.value).map_err(|_| {
            WithRoomError::Validation(
                "stored access token contains characters not allowed in a header".to_string(),
            )
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

pub struct HttpStudyApi {
    client: Client,
    base: Url,
    auth: AuthContext,
}

impl HttpStudyApi {
    /// Build a client for the configured domain.
    ///
    /// Uses the configured `remote_timeout` for whole requests and half of it
    /// (at least one second) for connecting.
    pub fn from_config(config: &Config, auth: AuthContext) -> Result<Self> {
        let timeout = config.remote_timeout();
        let connect_timeout = (timeout / 2).max(std::time::Duration::from_secs(1));
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self {
            client,
            base: config.domain()?,
            auth,
        })
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    fn url(&self, path: &str) -> Result<Url> {
        let joined = format!("{}{}", self.base.as_str().trim_end_matches('/'), path);
        Ok(Url::parse(&joined)?)
    }

    /// Attach the bearer token, send, and turn non-2xx answers into errors.
    ///
    /// The token check happens before anything touches the network.
    async fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<String> {
        let auth_header = RedactedHeader::bearer(&self.auth)?;
        let request = self
            .client
            .request(method.clone(), self.url(path)?)
            .header(header::AUTHORIZATION, auth_header.as_header_value()?);

        tracing::debug!(%method, path, auth = %auth_header, "sending request");
        let response = build(request).send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "request failed");
            WithRoomError::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%method, path, status = status.as_u16(), "received response");

        if !status.is_success() {
            let err = ApiError::with_status(path, status, &body);
            tracing::warn!(%method, path, status = status.as_u16(), "API error: {}", err.message);
            return Err(err.into());
        }
        Ok(body)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let body = self
            .send(Method::GET, path, |req| {
                if query.is_empty() { req } else { req.query(query) }
            })
            .await?;
        parse_json(path, &body)
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, payload: &B) -> Result<String> {
        self.send(Method::POST, path, |req| req.json(payload)).await
    }

    /// POST and read the boolean verdict the server answers with.
    async fn post_verdict<B: Serialize + Sync>(&self, path: &str, payload: &B) -> Result<bool> {
        let body = self.post(path, payload).await?;
        parse_verdict(path, &body)
    }

    async fn study_list(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Study>> {
        let body = self.get_json(path, query).await?;
        extract_study_list(path, &body)
    }
}

fn parse_json(path: &str, body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| WithRoomError::MalformedResponse {
        endpoint: path.to_string(),
        detail: e.to_string(),
    })
}

fn parse_verdict(path: &str, body: &str) -> Result<bool> {
    match parse_json(path, body)? {
        Value::Bool(verdict) => Ok(verdict),
        other => Err(WithRoomError::MalformedResponse {
            endpoint: path.to_string(),
            detail: format!("expected true or false, got {other}"),
        }),
    }
}

/// `homeStudyInfoList` from a feed response; anything but an array is empty.
fn extract_study_list(path: &str, body: &Value) -> Result<Vec<Study>> {
    match body.get(HOME_LIST_FIELD) {
        Some(list @ Value::Array(_)) => {
            serde_json::from_value(list.clone()).map_err(|e| WithRoomError::MalformedResponse {
                endpoint: path.to_string(),
                detail: e.to_string(),
            })
        }
        _ => {
            tracing::debug!(path, "response has no study array, treating as empty");
            Ok(Vec::new())
        }
    }
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

impl StudyApi for HttpStudyApi {
    async fn login_state(&self) -> Result<bool> {
        let body = self.get_json("/oauth/login/state", &[]).await?;
        Ok(body.get("state").and_then(Value::as_bool).unwrap_or(false))
    }

    async fn member_info(&self) -> Result<MemberInfo> {
        let path = "/member/mypage/info";
        let body = self.get_json(path, &[]).await?;
        serde_json::from_value(body).map_err(|e| WithRoomError::MalformedResponse {
            endpoint: path.to_string(),
            detail: e.to_string(),
        })
    }

    async fn home_feed(&self) -> Result<Vec<Study>> {
        self.study_list("/home/info", &[]).await
    }

    async fn filter_feed(&self, filters: &StudyFilters) -> Result<Vec<Study>> {
        self.study_list("/home/filter/info", &filters.query_pairs())
            .await
    }

    async fn search_title(&self, title: &str) -> Result<Vec<Study>> {
        self.study_list("/home/filter/title", &[("title", title.to_string())])
            .await
    }

    async fn my_studies(&self, tab: Tab) -> Result<Vec<Study>> {
        let body = self.get_json(tab.endpoint(), &[]).await?;
        let studies = extract_tab_studies(tab, &body)?;
        tracing::debug!(tab = %tab, count = studies.len(), "fetched tab");
        Ok(studies)
    }

    async fn study_detail(&self, study_id: StudyId) -> Result<StudyDetail> {
        let path = "/study/info/detail";
        let body = self.post(path, &StudyIdRequest { study_id }).await?;
        let value = parse_json(path, &body)?;
        serde_json::from_value(value).map_err(|e| WithRoomError::MalformedResponse {
            endpoint: path.to_string(),
            detail: e.to_string(),
        })
    }

    async fn create_study(&self, request: &CreateStudyRequest) -> Result<()> {
        self.post("/study/create", request).await?;
        Ok(())
    }

    async fn delete_study(&self, study_id: StudyId) -> Result<bool> {
        self.post_verdict("/study/delete", &StudyIdRequest { study_id })
            .await
    }

    async fn finish_study(&self, study_id: StudyId) -> Result<bool> {
        self.post_verdict("/study/finish", &StudyIdRequest { study_id })
            .await
    }

    async fn join_study(&self, study_id: StudyId) -> Result<bool> {
        self.post_verdict("/study/join", &StudyIdRequest { study_id })
            .await
    }

    async fn toggle_interest(&self, study_id: StudyId) -> Result<bool> {
        self.post_verdict("/study/interest", &StudyIdRequest { study_id })
            .await
    }

    async fn respond_join(&self, decision: &JoinDecision) -> Result<()> {
        self.post("/study/response-join", decision).await?;
        Ok(())
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<()> {
        self.post("/comment/create", comment).await?;
        Ok(())
    }

    async fn delete_comment(&self, comment_id: u64) -> Result<bool> {
        self.post_verdict("/comment/delete", &CommentIdRequest { comment_id })
            .await
    }

    async fn upload_study_image(&self, path: &Path) -> Result<String> {
        let endpoint = "/image/upload/study";
        // Token first: a missing login must not cost a file read.
        self.auth.token()?;
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            WithRoomError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read image {}: {}", path.display(), e),
            ))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "study-image".to_string());
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(image_mime(path))?;
        let form = multipart::Form::new().part("file", part);

        let body = self
            .send(Method::POST, endpoint, |req| req.multipart(form))
            .await?;
        let value = parse_json(endpoint, &body)?;
        value
            .get("imageUrl")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| WithRoomError::MalformedResponse {
                endpoint: endpoint.to_string(),
                detail: "missing imageUrl".to_string(),
            })
    }

    async fn logout(&self) -> Result<()> {
        self.send(Method::POST, "/oauth/kakao/logout", |req| req)
            .await?;
        Ok(())
    }
}
