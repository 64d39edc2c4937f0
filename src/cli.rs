use clap::{Parser, Subcommand};
use crate::backend::BackendKind;
use lifeline_admin_common::ResourceKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifeline-admin")]
#[command(about = "Lifeline 管理ダッシュボード（動画・ギャラリー・プレスリリース等のCRUD）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIルート（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub api_root: Option<String>,

    /// バックエンド (http/memory)
    #[arg(long, value_enum, default_value = "http", global = true)]
    pub backend: BackendKind,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 一覧を表示
    List {
        /// リソース (video/gallery/category/contact/location/person-detail/press-release/slide-image)
        resource: ResourceKind,
    },

    /// 1件をJSONで表示
    Show {
        resource: ResourceKind,
        id: String,
    },

    /// 新規作成
    Create {
        resource: ResourceKind,

        /// フィールド値（key=value、複数指定可）
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// 添付画像ファイル
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// 更新
    Update {
        resource: ResourceKind,
        id: String,

        /// 変更するフィールド値（key=value、複数指定可）
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// 差し替える画像ファイル（省略時は既存の画像を維持）
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// 削除
    Delete {
        resource: ResourceKind,
        id: String,

        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },

    /// 対話的に一覧・追加・編集・削除
    Page {
        resource: ResourceKind,
    },

    /// 設定を表示/編集
    Config {
        /// APIルートを設定
        #[arg(long)]
        set_api_root: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// `-f key=value` を分解
pub fn parse_field(arg: &str) -> Option<(&str, &str)> {
    let (key, value) = arg.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("title=Intro"), Some(("title", "Intro")));
        assert_eq!(parse_field("link=https://a.example/?q=1"), Some(("link", "https://a.example/?q=1")));
        assert_eq!(parse_field(" name =  "), Some(("name", "  ")));
        assert_eq!(parse_field("=x"), None);
        assert_eq!(parse_field("novalue"), None);
    }

    #[test]
    fn test_cli_parses_create() {
        let cli = Cli::parse_from([
            "lifeline-admin",
            "--backend",
            "memory",
            "create",
            "category",
            "-f",
            "categoryname=Banners",
        ]);
        assert_eq!(cli.backend, BackendKind::Memory);
        match cli.command {
            Commands::Create { resource, fields, file } => {
                assert_eq!(resource, ResourceKind::Category);
                assert_eq!(fields, vec!["categoryname=Banners".to_string()]);
                assert!(file.is_none());
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_resource() {
        let result = Cli::try_parse_from(["lifeline-admin", "list", "widgets"]);
        assert!(result.is_err());
    }
}
