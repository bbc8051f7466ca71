use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::http::{HttpOptions, DEFAULT_TIMEOUT_SECS};
use crate::platforms::spotify::DEFAULT_API_URL as SPOTIFY_API_URL;
use crate::platforms::yandex::DEFAULT_API_URL as YANDEX_API_URL;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub spotify: SpotifyConfig,
    #[serde(default)]
    pub yandex: YandexConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    pub username: Option<String>,
    #[serde(default = "default_spotify_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            username: None,
            api_url: default_spotify_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SpotifyConfig {
    pub fn is_configured(&self) -> bool {
        self.username.as_ref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            accept_invalid_certs: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YandexConfig {
    pub token: Option<String>,
    #[serde(default = "default_yandex_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// 프록시 인증서가 깨져 있던 적이 있다. 명시적으로 켜지 않으면 항상 검증한다.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for YandexConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_yandex_api_url(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

impl YandexConfig {
    pub fn is_configured(&self) -> bool {
        self.token.as_ref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}

fn default_spotify_api_url() -> String {
    SPOTIFY_API_URL.to_string()
}

fn default_yandex_api_url() -> String {
    YANDEX_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("nowplaying")
        .join("config.toml")
}

pub fn load_config() -> Config {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            log::warn!("[Config] Ignoring unreadable {}: {}", path.display(), e);
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("{} 디렉토리를 만들 수 없습니다", parent.display()))?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).with_context(|| format!("{}에 설정을 저장할 수 없습니다", path.display()))?;
    Ok(())
}
