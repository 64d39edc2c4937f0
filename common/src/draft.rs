//! フォーム下書きと添付ファイル
//!
//! ダイアログが開いている間だけ保持される入力値。
//! 一覧の確定データとは別管理。

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Error, Result};

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    if !data_url.starts_with("data:") {
        return None;
    }
    data_url.split_once(',').map(|(_, data)| data)
}

/// Data URLからMIMEタイプを抽出
///
/// 抽出できない場合は "application/octet-stream"
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split([';', ',']).next())
        .filter(|s| !s.is_empty())
        .unwrap_or("application/octet-stream")
}

/// アップロード対象ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// FileReader.readAsDataURL の結果から復元
    pub fn from_data_url(file_name: impl Into<String>, data_url: &str) -> Result<Self> {
        let encoded = extract_base64_from_data_url(data_url)
            .ok_or_else(|| Error::invalid("Selected file could not be read"))?;
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| Error::invalid("Selected file could not be read"))?;
        Ok(Self::new(
            file_name,
            extract_mime_type_from_data_url(data_url),
            bytes,
        ))
    }

    /// プレビュー用Data URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// 作成・編集ダイアログの下書き
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    values: BTreeMap<String, String>,
    attachment: Option<Attachment>,
    preview: Option<String>,
    remembered_url: Option<String>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// ビルダー形式で値を設定
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// 未入力は空文字
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// ファイルを添付し、プレビュー用Data URLを生成
    pub fn attach(&mut self, attachment: Attachment) {
        self.preview = Some(attachment.to_data_url());
        self.attachment = Some(attachment);
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
        self.preview = None;
    }

    /// 編集時、既存レコードの画像URLを保持
    pub fn remember_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.remembered_url = if url.trim().is_empty() { None } else { Some(url) };
    }

    pub fn remembered_url(&self) -> Option<&str> {
        self.remembered_url.as_deref()
    }

    /// ダイアログに表示する画像（新しい添付を優先）
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref().or(self.remembered_url.as_deref())
    }

    /// 添付済み、または既存URLがあるか
    pub fn has_image(&self) -> bool {
        self.attachment.is_some() || self.remembered_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base64_from_data_url() {
        let data_url = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(extract_base64_from_data_url(data_url), Some("iVBORw0KGgo="));
        assert_eq!(extract_base64_from_data_url("https://example.com/a.png"), None);
    }

    #[test]
    fn test_extract_mime_type_from_data_url() {
        assert_eq!(extract_mime_type_from_data_url("data:image/png;base64,AAAA"), "image/png");
        assert_eq!(extract_mime_type_from_data_url("data:,hello"), "application/octet-stream");
        assert_eq!(extract_mime_type_from_data_url("invalid"), "application/octet-stream");
    }

    #[test]
    fn test_attachment_data_url_preview() {
        let attachment = Attachment::new("a.png", "image/png", vec![1, 2, 3]);
        let data_url = attachment.to_data_url();
        assert!(data_url.starts_with("data:image/png;base64,"));

        let restored = Attachment::from_data_url("a.png", &data_url).unwrap();
        assert_eq!(restored, attachment);
        assert!(restored.is_image());
    }

    #[test]
    fn test_attachment_from_invalid_data_url() {
        let result = Attachment::from_data_url("a.png", "data:image/png;base64,@@@");
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_draft_values_default_to_empty() {
        let draft = Draft::new().with("title", "Launch");
        assert_eq!(draft.get("title"), "Launch");
        assert_eq!(draft.get("description"), "");
    }

    #[test]
    fn test_draft_preview_prefers_new_attachment() {
        let mut draft = Draft::new();
        draft.remember_url("https://cdn.example.com/old.jpg");
        assert_eq!(draft.preview(), Some("https://cdn.example.com/old.jpg"));

        draft.attach(Attachment::new("new.jpg", "image/jpeg", vec![0xff, 0xd8]));
        assert!(draft.preview().unwrap().starts_with("data:image/jpeg;base64,"));
        assert!(draft.has_image());

        draft.clear_attachment();
        assert_eq!(draft.preview(), Some("https://cdn.example.com/old.jpg"));
    }

    #[test]
    fn test_remember_blank_url_is_ignored() {
        let mut draft = Draft::new();
        draft.remember_url("  ");
        assert_eq!(draft.remembered_url(), None);
        assert!(!draft.has_image());
    }
}
