//! 送信ペイロードの組み立て
//!
//! 添付ファイルを持つリソースは multipart/form-data、
//! それ以外は JSON として送る。

use serde_json::{Map, Value};

use crate::draft::{Attachment, Draft};
use crate::schema::ResourceSchema;

/// 作成か更新か
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// multipartのファイルパート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub name: String,
    pub attachment: Attachment,
}

/// multipart/form-data の内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub file: Option<FilePart>,
}

/// サービスに渡す本文
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Map<String, Value>),
    Multipart(MultipartForm),
}

impl Payload {
    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart(_))
    }

    /// スカラー値を取得（テスト・インメモリストア用）
    pub fn get(&self, name: &str) -> Option<&str> {
        match self {
            Payload::Json(map) => map.get(name).and_then(Value::as_str),
            Payload::Multipart(form) => form
                .fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
        }
    }

    pub fn file(&self) -> Option<&FilePart> {
        match self {
            Payload::Multipart(form) => form.file.as_ref(),
            Payload::Json(_) => None,
        }
    }

    /// JSONオブジェクトに変換
    ///
    /// ファイルはData URLとして `url_field` に格納する。
    pub fn to_object(&self, url_field: Option<&str>) -> Map<String, Value> {
        match self {
            Payload::Json(map) => map.clone(),
            Payload::Multipart(form) => {
                let mut map: Map<String, Value> = form
                    .fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect();
                if let (Some(file), Some(field)) = (&form.file, url_field) {
                    map.insert(
                        field.to_string(),
                        Value::String(file.attachment.to_data_url()),
                    );
                }
                map
            }
        }
    }
}

/// 下書きからペイロードを組み立てる
///
/// - 添付なしリソース: JSON
/// - 作成: multipart（ファイルがあればパートとして追加）
/// - 更新で新しいファイルあり: multipart
/// - 更新で新しいファイルなし: JSON + 既存URLをプレーンな値として送る
pub fn build(schema: &ResourceSchema, draft: &Draft, mode: Mode) -> Payload {
    let fields: Vec<(String, String)> = schema
        .fields
        .iter()
        .map(|field| {
            let value = draft.get(field.name);
            let value = if field.trims() { value.trim() } else { value };
            (field.name.to_string(), value.to_string())
        })
        .collect();

    let Some(spec) = &schema.attachment else {
        return Payload::Json(into_json(fields));
    };

    match (draft.attachment(), mode) {
        (Some(attachment), _) => Payload::Multipart(MultipartForm {
            fields,
            file: Some(FilePart {
                name: spec.part.to_string(),
                attachment: attachment.clone(),
            }),
        }),
        (None, Mode::Create) => Payload::Multipart(MultipartForm { fields, file: None }),
        (None, Mode::Update) => {
            let mut map = into_json(fields);
            if let Some(url) = draft.remembered_url() {
                map.insert(spec.url_field.to_string(), Value::String(url.to_string()));
            }
            Payload::Json(map)
        }
    }
}

fn into_json(fields: Vec<(String, String)>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect()
}
