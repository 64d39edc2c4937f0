//! バックエンドAPI

pub mod fetch;

pub use fetch::FetchService;
