use hostel_platform_shared::DASHBOARD_POLL_INTERVAL;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub state_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("api_base_url", "http://localhost:3001/api/v1")?
            .set_default("state_dir", ".hostel-admin")?
            .set_default("request_timeout_secs", 30)?
            .set_default("poll_interval_secs", DASHBOARD_POLL_INTERVAL.as_secs())?
            .add_source(config::Environment::default())
            .build()?;

        config.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn session_path(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }

    pub fn billing_state_path(&self) -> PathBuf {
        self.state_dir.join("billing_jobs.json")
    }
}
