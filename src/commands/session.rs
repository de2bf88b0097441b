//! `login`, `logout` and `whoami`.
//!
//! Only these commands write the stored token.

use owo_colors::OwoColorize;
use secrecy::SecretString;
use serde_json::json;

use super::{CommandOutput, connect};
use crate::auth::CredentialStore;
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::remote::StudyApi;
use crate::types::MemberInfo;

pub async fn cmd_login(token: String) -> Result<()> {
    let store = CredentialStore::open()?;
    store.save_token(&SecretString::from(token))?;
    println!("{}", "로그인 정보가 저장되었습니다.".green());
    Ok(())
}

/// Tell the server, then forget the token even if the server call failed.
pub async fn cmd_logout() -> Result<()> {
    let store = CredentialStore::open()?;
    match connect() {
        Ok(api) if api.auth().is_present() => {
            if let Err(e) = api.logout().await {
                tracing::warn!(error = %e, "server logout failed; clearing local token anyway");
            }
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "no API client; clearing local token only"),
    }
    store.clear()?;
    println!("{}", "로그아웃되었습니다.".green());
    Ok(())
}

/// Login state plus the nickname when logged in.
pub(crate) async fn session_info(api: &impl StudyApi) -> Result<Option<MemberInfo>> {
    if !api.login_state().await? {
        return Ok(None);
    }
    Ok(Some(api.member_info().await?))
}

pub async fn cmd_whoami(output: OutputOptions) -> Result<()> {
    let api = connect()?;
    if !api.auth().is_present() {
        return CommandOutput::new(json!({ "loggedIn": false }))
            .with_text("로그인되어 있지 않습니다.".dimmed().to_string())
            .print(output);
    }

    let info = session_info(&api).await?;
    let nick = info.as_ref().and_then(|i| i.nick_name.clone());
    let text = match (&info, &nick) {
        (Some(_), Some(nick)) => format!("{}님, 반갑습니다!", nick.cyan()),
        (Some(_), None) => "로그인되어 있습니다.".to_string(),
        (None, _) => "로그인이 만료되었습니다. 다시 로그인해주세요.".yellow().to_string(),
    };
    CommandOutput::new(json!({
        "loggedIn": info.is_some(),
        "nickName": nick,
    }))
    .with_text(text)
    .print(output)
}
