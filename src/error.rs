use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    /// サービス・ページ層のエラー（メッセージはそのまま表示）
    #[error(transparent)]
    Common(#[from] lifeline_admin_common::Error),

    /// ページのフィードバック・ダイアログに返された失敗
    #[error("{0}")]
    Failed(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フィールド指定が不正です（key=value 形式）: {0}")]
    InvalidFieldArgument(String),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AdminError>;
