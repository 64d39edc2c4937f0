//! エラー型定義
//!
//! サービス層とページ層で共有されるエラー分類。
//! メッセージはそのままユーザーに表示される。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 必須ID・必須フィールドの欠落など（通信前に検出）
    #[error("{0}")]
    InvalidArgument(String),

    /// 通信そのものの失敗（オフライン、DNS、TLSなど）
    #[error("Network request failed: {0}")]
    Transport(String),

    /// 2xx以外のレスポンス
    #[error("{message}")]
    RemoteRejection { status: u16, message: String },

    /// JSONとして解釈できないレスポンス本文
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub fn rejection(status: u16, message: impl Into<String>) -> Self {
        Error::RemoteRejection {
            status,
            message: message.into(),
        }
    }

    /// 通信前に検出されたエラーか
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// サーバー拒否時のステータスコード
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteRejection { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
