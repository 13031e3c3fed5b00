use std::path::Path;
use std::process::Output;

use serde_json::json;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::MockServer;

/// An isolated data directory plus a mock API for one test.
pub struct TestEnv {
    pub server: MockServer,
    pub data_dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Start with a stored token pair.
    pub async fn logged_in(access: &str, refresh: &str) -> Self {
        let env = Self::new().await;
        env.write_credentials(access, refresh);
        env
    }

    pub fn api_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.server.address().port())
    }

    pub fn credentials_path(&self) -> std::path::PathBuf {
        self.data_dir.path().join("credentials.json")
    }

    pub fn write_credentials(&self, access: &str, refresh: &str) {
        let body = json!({"accessToken": access, "refreshToken": refresh});
        std::fs::write(self.credentials_path(), body.to_string()).unwrap();
    }

    /// Stored credentials, `None` when the file is gone.
    pub fn credentials(&self) -> Option<serde_json::Value> {
        let path = self.credentials_path();
        read_json(&path)
    }

    /// Run the CLI binary against the mock server.
    pub async fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_booking"))
            .args(args)
            .env("BOOKING_API_URL", self.api_url())
            .env("BOOKING_DATA_DIR", self.data_dir.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("BOOKING_PASSWORD")
            .output()
            .await
            .expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success, returning stdout.
    pub async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if !output.status.success() {
            panic!(
                "CLI command failed: {:?}\nstderr: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI and expect failure, returning stderr.
    pub async fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if output.status.success() {
            panic!("CLI command should have failed: {:?}", args);
        }
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    /// Number of requests the mock received for `request_path`.
    pub async fn hits(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == request_path)
            .count()
    }
}

fn read_json(path: &Path) -> Option<serde_json::Value> {
    let json = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&json).ok()
}
