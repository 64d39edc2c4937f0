//! 接続先設定の保存（localStorage）

use gloo::storage::{LocalStorage, Storage};
use lifeline_admin_common::service::DEFAULT_API_ROOT;

const API_ROOT_KEY: &str = "lifeline-admin.api-root";
const BACKEND_KEY: &str = "lifeline-admin.backend";

/// データの取得先
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// 実際のAPI
    #[default]
    Http,
    /// ブラウザ内のストア（ページを再読み込みすると消える）
    Memory,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Http, Backend::Memory];

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Http => "http",
            Backend::Memory => "memory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Backend::Http => "API",
            Backend::Memory => "ブラウザ内ストア",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == value.trim())
    }
}

pub fn load_backend() -> Backend {
    LocalStorage::get::<String>(BACKEND_KEY)
        .ok()
        .and_then(|value| Backend::parse(&value))
        .unwrap_or_default()
}

pub fn save_backend(backend: Backend) -> Result<(), String> {
    LocalStorage::set(BACKEND_KEY, backend.as_str()).map_err(|e| format!("保存失敗: {}", e))
}

/// ビルド時に `LIFELINE_API_ROOT` が与えられていればそれを既定値にする
pub fn default_api_root() -> &'static str {
    option_env!("LIFELINE_API_ROOT").unwrap_or(DEFAULT_API_ROOT)
}

/// 保存済みの値、なければ既定値
pub fn load_api_root() -> String {
    LocalStorage::get::<String>(API_ROOT_KEY)
        .ok()
        .map(|root| normalize_api_root(&root))
        .filter(|root| !root.is_empty())
        .unwrap_or_else(|| normalize_api_root(default_api_root()))
}

pub fn save_api_root(api_root: &str) -> Result<String, String> {
    let root = normalize_api_root(api_root);
    if !(root.starts_with("http://") || root.starts_with("https://")) {
        return Err("APIルートは http:// または https:// で始めてください".to_string());
    }
    LocalStorage::set(API_ROOT_KEY, &root).map_err(|e| format!("保存失敗: {}", e))?;
    Ok(root)
}

pub fn clear_api_root() {
    LocalStorage::delete(API_ROOT_KEY);
}

fn normalize_api_root(root: &str) -> String {
    root.trim().trim_end_matches('/').to_string()
}
