use config::{Config as ConfigLoader, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};

pub const DEFAULT_CURRENT_VERSION: &str = "1.0.0";
pub const DEFAULT_REPO_URL: &str = "https://github.com/thirstily8441/unlim-cloud";
pub const DEFAULT_API_BASE_URL: &str =
    "https://api.github.com/repos/thirstily8441/unlim-cloud/contents";
pub const DEFAULT_MANIFEST_PATH: &str = "unlim-cloud-nextjs/package.json";
pub const DEFAULT_CHANGELOG_PATH: &str = "unlim-cloud-nextjs/CHANGELOG.md";
pub const DEFAULT_WEB_APP_URL: &str = "https://unlim-cloud.web.app";
pub const DEFAULT_SNOOZE_KEY: &str = "unlimCloudUpdateSnooze";
/// 3 days
pub const DEFAULT_SNOOZE_DURATION_MS: i64 = 3 * 24 * 60 * 60 * 1000;
pub const DEFAULT_SPONSOR_URL: &str = "https://github.com/sponsors/thirstily8441";
pub const DEFAULT_PAYPAL_URL: &str = "https://paypal.me/yourpaypal";

const CONFIG_HOME_VAR: &str = "UNLIM_CONFIG_HOME";
const ENV_PREFIX: &str = "UNLIM";

/// Everything the update checker needs to know about the companion app.
///
/// Built once at startup and handed to the checker; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub current_version: String,
    pub repo_url: String,
    pub api_base_url: String,
    pub manifest_path: String,
    pub changelog_path: String,
    pub web_app_url: String,
    pub snooze_key: String,
    pub snooze_duration_ms: i64,
    pub sponsor_url: String,
    pub paypal_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            current_version: DEFAULT_CURRENT_VERSION.to_string(),
            repo_url: DEFAULT_REPO_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            changelog_path: DEFAULT_CHANGELOG_PATH.to_string(),
            web_app_url: DEFAULT_WEB_APP_URL.to_string(),
            snooze_key: DEFAULT_SNOOZE_KEY.to_string(),
            snooze_duration_ms: DEFAULT_SNOOZE_DURATION_MS,
            sponsor_url: DEFAULT_SPONSOR_URL.to_string(),
            paypal_url: DEFAULT_PAYPAL_URL.to_string(),
            storage_path: None,
        }
    }
}

impl Config {
    /// Load the compiled-in defaults, overridden by the optional config file and
    /// `UNLIM_*` environment variables.
    pub fn load() -> Result<Self, Box<dyn Error>> {
        Self::load_from(&Self::config_file_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        let builder = ConfigLoader::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    pub fn config_dir() -> PathBuf {
        if let Ok(custom_path) = std::env::var(CONFIG_HOME_VAR) {
            PathBuf::from(custom_path)
        } else {
            PathBuf::from(shellexpand::tilde("~/.config/unlim-update").as_ref())
        }
    }

    pub fn config_file_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Location of the sled database holding the snooze record.
    pub fn storage_path(&self) -> PathBuf {
        match &self.storage_path {
            Some(path) => PathBuf::from(shellexpand::tilde(path).as_ref()),
            None => Self::config_dir().join(".unlim_db"),
        }
    }

    pub fn content_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn releases_url(&self) -> String {
        format!("{}/releases/latest", self.repo_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.current_version, "1.0.0");
        assert_eq!(config.snooze_key, "unlimCloudUpdateSnooze");
        assert_eq!(config.snooze_duration_ms, 259_200_000);
        assert!(config.storage_path.is_none());
    }

    #[test]
    fn test_urls() {
        let config = Config::default();
        assert_eq!(
            config.content_url(&config.manifest_path),
            "https://api.github.com/repos/thirstily8441/unlim-cloud/contents/unlim-cloud-nextjs/package.json"
        );
        assert_eq!(
            config.releases_url(),
            "https://github.com/thirstily8441/unlim-cloud/releases/latest"
        );
    }

    #[test]
    fn test_content_url_trims_slashes() {
        let config = Config {
            api_base_url: "https://example.com/contents/".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.content_url("/CHANGELOG.md"),
            "https://example.com/contents/CHANGELOG.md"
        );
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("unlim-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(
            &path,
            "current_version = \"1.2.0\"\nstorage_path = \"/tmp/unlim-db\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.current_version, "1.2.0");
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/unlim-db"));
        assert_eq!(config.web_app_url, DEFAULT_WEB_APP_URL);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("unlim-config-does-not-exist.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.manifest_path, DEFAULT_MANIFEST_PATH);
    }
}
