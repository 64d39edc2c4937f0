use crate::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use lifeline_admin_common::service::DEFAULT_API_ROOT;
pub const API_ROOT_ENV: &str = "LIFELINE_API_ROOT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_root: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（存在しなければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AdminError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("lifeline-admin").join("config.json"))
    }

    /// 実際に使うAPIルート
    ///
    /// コマンドライン引数 > 環境変数 > 設定ファイル の順。
    pub fn resolve_api_root(&self, cli_override: Option<&str>) -> String {
        let env = std::env::var(API_ROOT_ENV).ok();
        pick_api_root(cli_override, env.as_deref(), &self.api_root)
    }

    pub fn set_api_root(&mut self, url: String) -> Result<()> {
        let trimmed = url.trim().trim_end_matches('/');
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(AdminError::Config(format!(
                "APIルートは http:// または https:// で始まる必要があります: {}",
                url
            )));
        }
        self.api_root = trimmed.to_string();
        Ok(())
    }
}

fn pick_api_root(cli: Option<&str>, env: Option<&str>, file: &str) -> String {
    [cli, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(file)
        .trim_end_matches('/')
        .to_string()
}
