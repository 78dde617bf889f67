use pulse_feeds::DEFAULT_FEED_PROXY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pulse.config.json";

/// Pulse configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Issue JSON edited by the mutation commands
    pub issue_file: String,

    /// Where exports are written
    pub out_dir: String,

    /// Built app used by the web, single and zip exports
    pub build_dir: String,

    /// Prefix the feed URL is appended to, URL-encoded
    pub feed_proxy: String,

    pub feed_timeout_secs: u64,

    /// Named versions of the issue
    pub versions_file: String,

    pub max_versions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            issue_file: "newsletter.json".to_string(),
            out_dir: "dist".to_string(),
            build_dir: "build".to_string(),
            feed_proxy: DEFAULT_FEED_PROXY.to_string(),
            feed_timeout_secs: 10,
            versions_file: "newsletter.versions.json".to_string(),
            max_versions: 20,
        }
    }
}

impl Config {
    /// Load config from a directory, defaults when there is none
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn issue_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.issue_file)
    }

    pub fn out_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    pub fn build_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.build_dir)
    }

    pub fn versions_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.versions_file)
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs.max(1))
    }
}
