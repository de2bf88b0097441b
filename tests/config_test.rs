#[path = "common/mod.rs"]
mod common;

use common::WithRoomTest;

// ============================================================================
// Config command tests
// ============================================================================

#[test]
fn test_config_show_empty() {
    let withroom = WithRoomTest::without_domain();

    let output = withroom.run_success(&["config", "show"]);
    assert!(output.contains("Configuration"));
    assert!(output.contains("not configured"));
    assert!(output.contains("not logged in"));
}

#[test]
fn test_config_show_env_override() {
    let withroom = WithRoomTest::new();

    let output = withroom.run_success(&["config", "show"]);
    assert!(output.contains(common::UNREACHABLE_DOMAIN));
    assert!(output.contains("WITHROOM_DOMAIN"));
}

#[test]
fn test_config_show_json() {
    let withroom = WithRoomTest::without_domain();
    withroom.run_success(&["config", "set", "domain", "https://api.example.com"]);
    withroom.run_success(&["login", "--token", "tok"]);

    let output = withroom.run_success(&["config", "show", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["domain"], "https://api.example.com");
    assert_eq!(value["logged_in"], true);
    assert_eq!(value["layout"], "wide");
}

#[test]
fn test_config_set_and_get_layout() {
    let withroom = WithRoomTest::new();

    let output = withroom.run_success(&["config", "set", "layout", "compact"]);
    assert!(output.contains("Set"));
    assert!(output.contains("compact"));

    let value = withroom.run_success(&["config", "get", "layout"]);
    assert_eq!(value.trim(), "compact");
}

#[test]
fn test_config_file_created() {
    let withroom = WithRoomTest::new();

    withroom.run_success(&["config", "set", "remote_timeout", "15"]);

    let content = withroom.read_config().expect("Config file should be created");
    assert!(content.contains("remote_timeout: 15"));
}

#[test]
fn test_config_reads_existing_file() {
    let withroom = WithRoomTest::without_domain();
    withroom.write_config("domain: https://study.example.com\nlayout: compact\n");

    let domain = withroom.run_success(&["config", "get", "domain"]);
    assert_eq!(domain.trim(), "https://study.example.com");
    let timeout = withroom.run_success(&["config", "get", "remote_timeout"]);
    assert_eq!(timeout.trim(), "30");
}

#[test]
fn test_config_set_invalid_key() {
    let withroom = WithRoomTest::new();

    let stderr = withroom.run_failure(&["config", "set", "colour", "red"]);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_rejects_non_http_domain() {
    let withroom = WithRoomTest::new();

    let stderr = withroom.run_failure(&["config", "set", "domain", "ftp://example.com"]);
    assert!(stderr.contains("http or https"));
    assert!(withroom.read_config().is_none());
}

#[test]
fn test_config_rejects_zero_timeout() {
    let withroom = WithRoomTest::new();

    let stderr = withroom.run_failure(&["config", "set", "remote_timeout", "0"]);
    assert!(stderr.contains("at least 1 second"));
}
