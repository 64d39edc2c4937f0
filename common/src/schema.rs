//! フォームスキーマ定義
//!
//! 各リソースの入力項目（名前・種類・必須）を宣言的に定義し、
//! 送信前の検証をここに集約する。

use crate::draft::{Attachment, Draft};
use crate::error::{Error, Result};
use crate::kind::ResourceKind;

const INVALID_URL_MESSAGE: &str = "Please enter a valid URL";

/// 入力項目の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// 複数行（前後の空白を保持）
    Multiline,
    Email,
    Phone,
    /// URLとして解釈できること
    Url,
    Date,
    /// 固定の選択肢
    Choice(&'static [&'static str]),
    /// 別リソースのID（ギャラリー→カテゴリ）
    Reference(ResourceKind),
}

/// 入力項目
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// ワイヤ上の名前
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// 未入力時のメッセージ（未指定ならスキーマ共通のもの）
    pub missing_message: Option<&'static str>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            missing_message: None,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            missing_message: None,
        }
    }

    pub const fn with_message(self, message: &'static str) -> Self {
        Self {
            missing_message: Some(message),
            ..self
        }
    }

    /// 送信時に前後の空白を除去するか
    pub fn trims(&self) -> bool {
        !matches!(self.kind, FieldKind::Multiline)
    }
}

/// 添付ファイル項目
#[derive(Debug, Clone, Copy)]
pub struct AttachmentSpec {
    /// multipartのパート名
    pub part: &'static str,
    /// 新しいファイルがない更新で既存URLを送るフィールド名
    pub url_field: &'static str,
    pub label: &'static str,
    /// 受け付けるMIMEタイプの接頭辞
    pub accept: &'static str,
    pub required: bool,
    pub missing_message: &'static str,
    pub invalid_message: &'static str,
}

/// リソースのフォーム全体
#[derive(Debug, Clone, Copy)]
pub struct ResourceSchema {
    pub fields: &'static [FieldSpec],
    pub attachment: Option<AttachmentSpec>,
    /// 必須項目が空のときの共通メッセージ
    pub required_message: &'static str,
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// 添付ファイルの種類を検査
    pub fn check_attachment(&self, attachment: &Attachment) -> Result<()> {
        match &self.attachment {
            Some(spec) if attachment.mime_type.starts_with(spec.accept) => Ok(()),
            Some(spec) => Err(Error::invalid(spec.invalid_message)),
            None => Err(Error::invalid("This form does not accept files")),
        }
    }

    /// 送信前検証
    ///
    /// 必須チェック（空白のみは未入力扱い）、URL項目の解釈、
    /// 選択肢の範囲のみを行う。形式の詳細な検証はしない。
    pub fn validate(&self, draft: &Draft) -> Result<()> {
        if let Some(spec) = &self.attachment {
            if spec.required && !draft.has_image() {
                return Err(Error::invalid(spec.missing_message));
            }
            if let Some(attachment) = draft.attachment() {
                self.check_attachment(attachment)?;
            }
        }

        for field in self.fields {
            let value = draft.get(field.name).trim();

            if value.is_empty() {
                if field.required {
                    return Err(Error::invalid(
                        field.missing_message.unwrap_or(self.required_message),
                    ));
                }
                continue;
            }

            match field.kind {
                FieldKind::Url => {
                    if url::Url::parse(value).is_err() {
                        return Err(Error::invalid(INVALID_URL_MESSAGE));
                    }
                }
                FieldKind::Choice(options) => {
                    if !options.contains(&value) {
                        return Err(Error::invalid(
                            field.missing_message.unwrap_or(self.required_message),
                        ));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}
