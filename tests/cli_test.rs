#[path = "common/mod.rs"]
mod common;

use common::WithRoomTest;

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_login_stores_token_privately() {
    let withroom = WithRoomTest::new();

    withroom.run_success(&["login", "--token", "abc.def.ghi"]);

    let path = withroom.credentials_path();
    let content = std::fs::read_to_string(&path).expect("credentials written");
    assert!(content.contains("accessToken"));
    assert!(content.contains("abc.def.ghi"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn test_login_rejects_blank_token() {
    let withroom = WithRoomTest::new();
    let stderr = withroom.run_failure(&["login", "--token", "   "]);
    assert!(stderr.contains("must not be empty"));
    assert!(!withroom.credentials_path().exists());
}

#[test]
fn test_logout_clears_token_even_when_server_unreachable() {
    let withroom = WithRoomTest::new();
    withroom.run_success(&["login", "--token", "tok"]);

    let output = withroom.run_success(&["logout"]);
    assert!(output.contains("로그아웃"));
    assert!(!withroom.credentials_path().exists());
}

#[test]
fn test_whoami_when_logged_out() {
    let withroom = WithRoomTest::new();
    let output = withroom.run_success(&["whoami"]);
    assert!(output.contains("로그인되어 있지 않습니다"));

    let json = withroom.run_success(&["whoami", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["loggedIn"], false);
}

// ============================================================================
// Auth and validation happen before any request
// ============================================================================

#[test]
fn test_tab_requires_login() {
    let withroom = WithRoomTest::new();
    let stderr = withroom.run_failure(&["my", "--tab", "liked"]);
    assert!(stderr.contains("로그인이 필요합니다"), "stderr: {stderr}");
}

#[test]
fn test_like_requires_login() {
    let withroom = WithRoomTest::new();
    let stderr = withroom.run_failure(&["like", "3"]);
    assert!(stderr.contains("로그인이 필요합니다"), "stderr: {stderr}");
}

#[test]
fn test_dashboard_requires_login() {
    let withroom = WithRoomTest::new();
    let stderr = withroom.run_failure(&["dashboard"]);
    assert!(stderr.contains("로그인이 필요합니다"), "stderr: {stderr}");
}

#[test]
fn test_create_without_image_is_rejected_locally() {
    let withroom = WithRoomTest::without_domain();
    let stderr = withroom.run_failure(&[
        "create",
        "--title",
        "러스트 입문",
        "--type",
        "online",
        "--recruit",
        "4",
    ]);
    assert!(stderr.contains("이미지를 업로드해주세요!"), "stderr: {stderr}");
}

#[test]
fn test_empty_comment_is_rejected_locally() {
    let withroom = WithRoomTest::without_domain();
    let stderr = withroom.run_failure(&["comment", "add", "1", "   "]);
    assert!(stderr.contains("댓글을 입력해주세요."), "stderr: {stderr}");
}

#[test]
fn test_overlong_comment_is_rejected_locally() {
    let withroom = WithRoomTest::without_domain();
    let long = "가".repeat(301);
    let stderr = withroom.run_failure(&["comment", "add", "1", &long]);
    assert!(stderr.contains("300자"), "stderr: {stderr}");
}

#[test]
fn test_unconfirmed_delete_is_cancelled() {
    let withroom = WithRoomTest::new();
    withroom.run_success(&["login", "--token", "tok"]);

    // stdin is not a terminal, so the prompt is declined
    let output = withroom.run_success(&["delete", "5"]);
    assert!(output.contains("취소되었습니다."));
}

#[test]
fn test_list_without_domain_explains_setup() {
    let withroom = WithRoomTest::without_domain();
    let stderr = withroom.run_failure(&["list"]);
    assert!(stderr.contains("API domain not configured"), "stderr: {stderr}");
}

#[test]
fn test_invalid_filter_value() {
    let withroom = WithRoomTest::new();
    let stderr = withroom.run_failure(&["filter", "--difficulty", "최상급"]);
    assert!(stderr.contains("Invalid difficulty"), "stderr: {stderr}");
}

#[test]
fn test_invalid_tab_name() {
    let withroom = WithRoomTest::new();
    let stderr = withroom.run_failure(&["my", "--tab", "mine"]);
    assert!(stderr.contains("Invalid tab"), "stderr: {stderr}");
}
