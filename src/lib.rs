//! Lifeline Admin CLI
//!
//! 管理ダッシュボードの各リソース（動画、ギャラリー、カテゴリ、問い合わせ、
//! 所在地、連絡先、プレスリリース、スライド画像）を端末から操作する。

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod files;
pub mod http;
pub mod interactive;
