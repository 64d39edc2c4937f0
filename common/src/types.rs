//! エンティティ型定義
//!
//! CLIとWeb(WASM)で共有されるレコード:
//! - Video / GalleryPhoto / PressRelease / SlideImage: 画像添付あり
//! - Category / Contact / Location / PersonDetail: JSONのみ
//!
//! IDはサーバー側で採番される不透明な文字列。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::draft::Draft;
use crate::kind::ResourceKind;
use crate::resource::{first_string, normalize_id, LabelContext, Resource};
use crate::schema::{AttachmentSpec, FieldKind, FieldSpec, ResourceSchema};

const IMAGE_ATTACHMENT: AttachmentSpec = AttachmentSpec {
    part: "image",
    url_field: "image",
    label: "Image",
    accept: "image/",
    required: true,
    missing_message: "Please select an image to upload.",
    invalid_message: "Please select a valid image file.",
};

pub const GENDERS: &[&str] = &["male", "female", "other"];

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub video_url: String,
    /// サムネイルURL
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

static VIDEO_SCHEMA: ResourceSchema = ResourceSchema {
    fields: &[
        FieldSpec::required("title", "Title", FieldKind::Text),
        FieldSpec::required("description", "Description", FieldKind::Multiline),
        FieldSpec::required("videoUrl", "Video Link", FieldKind::Url),
    ],
    attachment: Some(AttachmentSpec {
        label: "Thumbnail",
        required: false,
        ..IMAGE_ATTACHMENT
    }),
    required_message: "Please fill in all required fields, including the video link",
};

impl Resource for Video {
    const KIND: ResourceKind = ResourceKind::Video;

    fn schema() -> &'static ResourceSchema {
        &VIDEO_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::new()
            .with("title", &self.title)
            .with("description", &self.description)
            .with("videoUrl", &self.video_url);
        draft.remember_url(&self.image);
        draft
    }

    fn columns() -> &'static [&'static str] {
        &["Title", "Description", "Video Link", "Thumbnail"]
    }

    fn row(&self, _ctx: &LabelContext<'_>) -> Vec<String> {
        vec![
            self.title.clone(),
            truncate(&self.description, 60),
            display_url(&self.video_url),
            display_url(&self.image),
        ]
    }

    fn normalize(object: &mut Map<String, Value>) {
        if let Some(url) = first_string(object, &["image", "imageUrl", "thumbnail"]) {
            object.insert("image".to_string(), Value::String(url));
        }
    }
}

// ---------------------------------------------------------------------------
// Gallery photo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryPhoto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub photo_url: String,
    /// CategoryのID（参照整合性はクライアントでは保証しない）
    pub category: String,
    /// populate済みレスポンスに含まれていたカテゴリ名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

static GALLERY_SCHEMA: ResourceSchema = ResourceSchema {
    fields: &[FieldSpec::required(
        "category",
        "Category",
        FieldKind::Reference(ResourceKind::Category),
    )
    .with_message("Please select a category")],
    attachment: Some(AttachmentSpec {
        label: "Photo",
        missing_message: "Please select a photo",
        ..IMAGE_ATTACHMENT
    }),
    required_message: "Please select a category",
};

impl GalleryPhoto {
    pub fn category_label(&self, categories: &[Category]) -> String {
        category_label(categories, &self.category, self.category_name.as_deref())
    }
}

impl Resource for GalleryPhoto {
    const KIND: ResourceKind = ResourceKind::Gallery;
    const NEEDS_CATEGORIES: bool = true;

    fn schema() -> &'static ResourceSchema {
        &GALLERY_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> String {
        display_url(&self.photo_url)
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::new().with("category", &self.category);
        draft.remember_url(&self.photo_url);
        draft
    }

    fn columns() -> &'static [&'static str] {
        &["Photo", "Category"]
    }

    fn row(&self, ctx: &LabelContext<'_>) -> Vec<String> {
        vec![display_url(&self.photo_url), self.category_label(ctx.categories)]
    }

    fn normalize(object: &mut Map<String, Value>) {
        if let Some(url) = first_string(object, &["photoUrl", "image", "imageUrl"]) {
            object.insert("photoUrl".to_string(), Value::String(url));
        }

        // 文字列IDはそのまま、展開済みのオブジェクトだけID + 名前にする
        if let Some(Value::Object(populated)) = object.get_mut("category") {
            let mut category = std::mem::take(populated);
            normalize_id(&mut category);
            let id = first_string(&category, &["id"]).unwrap_or_default();
            if let Some(name) = first_string(&category, &["categoryname", "name", "title"]) {
                object.insert("categoryName".to_string(), Value::String(name));
            }
            object.insert("category".to_string(), Value::String(id));
        }
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub categoryname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Category {
    /// 表示名（categoryname → name → title の順）
    pub fn display_name(&self) -> Option<&str> {
        [
            Some(self.categoryname.as_str()),
            self.name.as_deref(),
            self.title.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
    }
}

static CATEGORY_SCHEMA: ResourceSchema = ResourceSchema {
    fields: &[FieldSpec::required("categoryname", "Category Name", FieldKind::Text)
        .with_message("Please enter a category name")],
    attachment: None,
    required_message: "Please enter a category name",
};

impl Resource for Category {
    const KIND: ResourceKind = ResourceKind::Category;

    fn schema() -> &'static ResourceSchema {
        &CATEGORY_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> String {
        self.display_name().unwrap_or("Unnamed Category").to_string()
    }

    fn to_draft(&self) -> Draft {
        Draft::new().with("categoryname", self.display_name().unwrap_or(""))
    }

    fn columns() -> &'static [&'static str] {
        &["Category Name"]
    }

    fn row(&self, _ctx: &LabelContext<'_>) -> Vec<String> {
        vec![self.label()]
    }
}

/// ギャラリーのカテゴリ表示名
///
/// 一覧から名前を引けなければ、populate済みの名前、最後に生のIDを返す。
pub fn category_label(categories: &[Category], id: &str, populated: Option<&str>) -> String {
    categories
        .iter()
        .find(|c| c.id.as_deref() == Some(id))
        .and_then(Category::display_name)
        .or(populated.filter(|s| !s.trim().is_empty()))
        .unwrap_or(id)
        .to_string()
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

static CONTACT_SCHEMA: ResourceSchema = ResourceSchema {
    fields: &[
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("email", "Email", FieldKind::Email),
        FieldSpec::required("phone", "Phone", FieldKind::Phone),
        FieldSpec::required("gender", "Gender", FieldKind::Choice(GENDERS)),
        FieldSpec::required("message", "Message", FieldKind::Multiline),
    ],
    attachment: None,
    required_message: "All fields are required.",
};

impl Resource for Contact {
    const KIND: ResourceKind = ResourceKind::Contact;
    // 問い合わせは作成と削除のみ
    const EDITABLE: bool = false;

    fn schema() -> &'static ResourceSchema {
        &CONTACT_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("name", &self.name)
            .with("email", &self.email)
            .with("phone", &self.phone)
            .with("gender", &self.gender)
            .with("message", &self.message)
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Gender", "Message", "Created"]
    }

    fn row(&self, _ctx: &LabelContext<'_>) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            capitalize(&self.gender),
            truncate(&self.message, 60),
            display_timestamp(self.created_at.as_deref()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub link: String,
}

static LOCATION_SCHEMA: ResourceSchema = ResourceSchema {
    fields: &[FieldSpec::required("link", "Location Link", FieldKind::Url)
        .with_message("Please enter a location link")],
    attachment: None,
    required_message: "Please enter a location link",
};

impl Resource for Location {
    const KIND: ResourceKind = ResourceKind::Location;

    fn schema() -> &'static ResourceSchema {
        &LOCATION_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> String {
        self.link.clone()
    }

    fn to_draft(&self) -> Draft {
        Draft::new().with("link", &self.link)
    }

    fn columns() -> &'static [&'static str] {
        &["Link"]
    }

    fn row(&self, _ctx: &LabelContext<'_>) -> Vec<String> {
        vec![self.link.clone()]
    }
}

// ---------------------------------------------------------------------------
// Person detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub phone: String,
    pub address: String,
    pub email: String,
}

static PERSON_DETAIL_SCHEMA: ResourceSchema = ResourceSchema {
    fields: &[
        FieldSpec::required("phone", "Phone", FieldKind::Phone),
        FieldSpec::required("address", "Address", FieldKind::Multiline),
        FieldSpec::required("email", "Email", FieldKind::Email),
    ],
    attachment: None,
    required_message: "Please fill in all required fields: Phone, Address, and Email",
};

impl Resource for PersonDetail {
    const KIND: ResourceKind = ResourceKind::PersonDetail;

    fn schema() -> &'static ResourceSchema {
        &PERSON_DETAIL_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> String {
        self.email.clone()
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("phone", &self.phone)
            .with("address", &self.address)
            .with("email", &self.email)
    }

    fn columns() -> &'static [&'static str] {
        &["Phone", "Address", "Email"]
    }

    fn row(&self, _ctx: &LabelContext<'_>) -> Vec<String> {
        vec![
            self.phone.clone(),
            truncate(&self.address, 60),
            self.email.clone(),
        ]
    }

    fn status_message(status: u16) -> Option<&'static str> {
        match status {
            404 => Some(
                "API endpoint not found. Please check if the backend endpoint is configured correctly.",
            ),
            500 => Some("Server error. Please try again later."),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Press release
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PressRelease {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub publish_date: String,
    pub link: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

static PRESS_RELEASE_SCHEMA: ResourceSchema = ResourceSchema {
    fields: &[
        FieldSpec::required("title", "Title", FieldKind::Text),
        FieldSpec::required("publishDate", "Publish Date", FieldKind::Date),
        FieldSpec::required("link", "Link", FieldKind::Url),
    ],
    attachment: Some(AttachmentSpec {
        url_field: "imageUrl",
        missing_message: "Please fill in all required fields, including the link, and select an image",
        ..IMAGE_ATTACHMENT
    }),
    required_message: "Please fill in all required fields, including the link, and select an image",
};

impl Resource for PressRelease {
    const KIND: ResourceKind = ResourceKind::PressRelease;

    fn schema() -> &'static ResourceSchema {
        &PRESS_RELEASE_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::new()
            .with("title", &self.title)
            .with("publishDate", &self.publish_date)
            .with("link", &self.link);
        draft.remember_url(&self.image_url);
        draft
    }

    fn columns() -> &'static [&'static str] {
        &["Title", "Publish Date", "Link", "Image"]
    }

    fn row(&self, _ctx: &LabelContext<'_>) -> Vec<String> {
        vec![
            self.title.clone(),
            or_dash(&self.publish_date),
            display_url(&self.link),
            display_url(&self.image_url),
        ]
    }

    fn normalize(object: &mut Map<String, Value>) {
        if let Some(url) = first_string(object, &["imageUrl", "image"]) {
            object.insert("imageUrl".to_string(), Value::String(url));
        }
    }
}

// ---------------------------------------------------------------------------
// Slide image
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub image_url: String,
}

static SLIDE_IMAGE_SCHEMA: ResourceSchema = ResourceSchema {
    fields: &[],
    attachment: Some(AttachmentSpec {
        url_field: "imageUrl",
        ..IMAGE_ATTACHMENT
    }),
    required_message: "Please select an image to upload.",
};

impl Resource for SlideImage {
    const KIND: ResourceKind = ResourceKind::SlideImage;

    fn schema() -> &'static ResourceSchema {
        &SLIDE_IMAGE_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> String {
        display_url(&self.image_url)
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::new();
        draft.remember_url(&self.image_url);
        draft
    }

    fn columns() -> &'static [&'static str] {
        &["Image"]
    }

    fn row(&self, _ctx: &LabelContext<'_>) -> Vec<String> {
        vec![display_url(&self.image_url)]
    }

    fn normalize(object: &mut Map<String, Value>) {
        if let Some(url) = first_string(object, &["imageUrl", "image", "url"]) {
            object.insert("imageUrl".to_string(), Value::String(url));
        }
    }
}

// ---------------------------------------------------------------------------
// 表示用ヘルパー
// ---------------------------------------------------------------------------

/// 空なら "—"
pub fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "—".to_string()
    } else {
        value.to_string()
    }
}

/// Data URLは中身を出さない
pub fn display_url(url: &str) -> String {
    if url.starts_with("data:") {
        "[inline image]".to_string()
    } else {
        or_dash(url)
    }
}

/// RFC3339のタイムスタンプをローカル時刻で表示
pub fn display_timestamp(value: Option<&str>) -> String {
    match value {
        Some(raw) if !raw.trim().is_empty() => chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|_| raw.to_string()),
        _ => "—".to_string(),
    }
}

/// 文字数で切り詰め
pub fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let head: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", head)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "—".to_string(),
    }
}
