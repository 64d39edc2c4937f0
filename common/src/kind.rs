//! リソース種別
//!
//! エンドポイントのパスと画面表示用の名称をまとめる。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Video,
    Gallery,
    Category,
    Contact,
    Location,
    PersonDetail,
    PressRelease,
    SlideImage,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Video,
        ResourceKind::Gallery,
        ResourceKind::PressRelease,
        ResourceKind::Contact,
        ResourceKind::Category,
        ResourceKind::Location,
        ResourceKind::PersonDetail,
        ResourceKind::SlideImage,
    ];

    /// コマンドライン・画面タブで使う名前
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Video => "video",
            ResourceKind::Gallery => "gallery",
            ResourceKind::Category => "category",
            ResourceKind::Contact => "contact",
            ResourceKind::Location => "location",
            ResourceKind::PersonDetail => "person-detail",
            ResourceKind::PressRelease => "press-release",
            ResourceKind::SlideImage => "slide-image",
        }
    }

    /// APIルート直下のパス
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Video => "videos",
            ResourceKind::Gallery => "gallery",
            ResourceKind::Category => "category",
            ResourceKind::Contact => "contact",
            ResourceKind::Location => "location",
            ResourceKind::PersonDetail => "personal-detail",
            ResourceKind::PressRelease => "press-release",
            ResourceKind::SlideImage => "slide-image",
        }
    }

    /// 文中で使う単数形（"delete this photo?"）
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Video => "video",
            ResourceKind::Gallery => "photo",
            ResourceKind::Category => "category",
            ResourceKind::Contact => "contact",
            ResourceKind::Location => "location",
            ResourceKind::PersonDetail => "person detail",
            ResourceKind::PressRelease => "press release",
            ResourceKind::SlideImage => "slide image",
        }
    }

    /// 文頭で使う単数形
    pub fn subject(&self) -> &'static str {
        match self {
            ResourceKind::Video => "Video",
            ResourceKind::Gallery => "Photo",
            ResourceKind::Category => "Category",
            ResourceKind::Contact => "Contact",
            ResourceKind::Location => "Location",
            ResourceKind::PersonDetail => "Person detail",
            ResourceKind::PressRelease => "Press release",
            ResourceKind::SlideImage => "Slide image",
        }
    }

    /// 一覧画面のタイトル
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Video => "Video Management",
            ResourceKind::Gallery => "Gallery Management",
            ResourceKind::Category => "Categories",
            ResourceKind::Contact => "Contact Management",
            ResourceKind::Location => "Locations",
            ResourceKind::PersonDetail => "Person Details",
            ResourceKind::PressRelease => "Press Release",
            ResourceKind::SlideImage => "Slide Images",
        }
    }

    /// サービス層のエラーで使う名称（"Unable to process gallery request"）
    fn request_name(&self) -> &'static str {
        match self {
            ResourceKind::Gallery => "gallery",
            other => other.noun(),
        }
    }

    pub fn id_required_message(&self) -> String {
        let name = match self {
            ResourceKind::Gallery => "Gallery",
            other => other.subject(),
        };
        format!("{} id is required", name)
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.subject())
    }

    pub fn fallback_error_message(&self) -> String {
        format!("Unable to process {} request", self.request_name())
    }

    pub fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete this {}?", self.noun())
    }

    pub fn empty_message(&self) -> String {
        let plural = match self {
            ResourceKind::Gallery => "photos".to_string(),
            ResourceKind::Category => "categories".to_string(),
            ResourceKind::Contact => "contact entries".to_string(),
            ResourceKind::PersonDetail => "person details".to_string(),
            other => format!("{}s", other.noun()),
        };
        format!("No {} found", plural)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.noun())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    /// 名前またはAPIパス（"videos", "personal-detail" など）を受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('_', "-");
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.name() == needle || k.path() == needle)
            .ok_or_else(|| {
                let names: Vec<_> = ResourceKind::ALL.iter().map(|k| k.name()).collect();
                format!("Unknown resource: {}. Use one of: {}", s, names.join(", "))
            })
    }
}
