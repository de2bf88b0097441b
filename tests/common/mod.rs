#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

pub mod mock_data;

/// Address nothing listens on; requests fail fast without touching a real server.
pub const UNREACHABLE_DOMAIN: &str = "http://127.0.0.1:9";

pub fn withroom_binary() -> &'static str {
    env!("CARGO_BIN_EXE_withroom")
}

/// Runs withroom commands against an isolated config directory.
pub struct WithRoomTest {
    pub temp_dir: TempDir,
    domain: Option<String>,
}

impl WithRoomTest {
    pub fn new() -> Self {
        WithRoomTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            domain: Some(UNREACHABLE_DOMAIN.to_string()),
        }
    }

    /// No domain in the environment; only the config file counts.
    pub fn without_domain() -> Self {
        WithRoomTest {
            domain: None,
            ..Self::new()
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp_dir.path().join("config")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(withroom_binary());
        cmd.args(args)
            .current_dir(self.temp_dir.path())
            .env("WITHROOM_CONFIG_DIR", self.config_dir())
            .env_remove("WITHROOM_LOG");
        match &self.domain {
            Some(domain) => cmd.env("WITHROOM_DOMAIN", domain),
            None => cmd.env_remove("WITHROOM_DOMAIN"),
        };
        cmd.output().expect("Failed to execute withroom command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.config_dir().join("credentials.yaml")
    }

    pub fn read_config(&self) -> Option<String> {
        fs::read_to_string(self.config_dir().join("config.yaml")).ok()
    }

    pub fn write_config(&self, content: &str) {
        fs::create_dir_all(self.config_dir()).expect("Failed to create config directory");
        fs::write(self.config_dir().join("config.yaml"), content)
            .expect("Failed to write config file");
    }
}
