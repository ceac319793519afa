//! Content item models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Audience a piece of content is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Couple,
    Friends,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Couple => "couple",
            Audience::Friends => "friends",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "couple" => Ok(Audience::Couple),
            "friends" => Ok(Audience::Friends),
            other => Err(format!(
                "Unknown audience: {}. Available: couple, friends",
                other
            )),
        }
    }
}

/// Display hint for a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Quote,
    Shayri,
    Comedy,
    Image,
    Video,
    Character,
    Anime,
    Activity,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Quote => "quote",
            ContentType::Shayri => "shayri",
            ContentType::Comedy => "comedy",
            ContentType::Image => "image",
            ContentType::Video => "video",
            ContentType::Character => "character",
            ContentType::Anime => "anime",
            ContentType::Activity => "activity",
        }
    }

    /// Short label used when listing content in the terminal
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Quote => "💬 Quote",
            ContentType::Shayri => "✨ Shayri",
            ContentType::Comedy => "😂 Comedy",
            ContentType::Image => "🖼️ Image",
            ContentType::Video => "🎬 Video",
            ContentType::Character => "🎭 Character",
            ContentType::Anime => "🎌 Anime",
            ContentType::Activity => "🎯 Activity",
        }
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quote" => Ok(ContentType::Quote),
            "shayri" => Ok(ContentType::Shayri),
            "comedy" => Ok(ContentType::Comedy),
            "image" => Ok(ContentType::Image),
            "video" => Ok(ContentType::Video),
            "character" => Ok(ContentType::Character),
            "anime" => Ok(ContentType::Anime),
            "activity" => Ok(ContentType::Activity),
            other => Err(format!("Unknown content type: {}", other)),
        }
    }
}

/// A greeting content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Unique identifier, immutable after creation
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ContentType,

    pub title: String,

    /// Body text, may contain placeholder tokens
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Empty means every audience
    #[serde(default)]
    pub category: Vec<Audience>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    pub created_at: DateTime<Utc>,
}

fn default_enabled() -> bool {
    true
}

impl ContentItem {
    /// Create an enabled item for every audience with a fresh id
    pub fn new(kind: ContentType, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            content: content.into(),
            image_url: None,
            video_url: None,
            category: Vec::new(),
            tags: Vec::new(),
            enabled: true,
            created_at: Utc::now(),
        }
    }

    /// Whether this item is shown to the given audience
    pub fn applies_to(&self, audience: Audience) -> bool {
        self.category.is_empty() || self.category.contains(&audience)
    }

    /// Collapse empty media references and duplicate categories
    pub fn normalized(mut self) -> Self {
        self.image_url = non_empty(self.image_url);
        self.video_url = non_empty(self.video_url);
        let mut seen = Vec::with_capacity(self.category.len());
        self.category.retain(|a| {
            if seen.contains(a) {
                false
            } else {
                seen.push(*a);
                true
            }
        });
        self
    }

    /// Apply a partial update; `id` and `created_at` are left alone
    pub fn apply(&mut self, patch: ContentPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(video_url) = patch.video_url {
            self.video_url = video_url;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Create request body; server fills `id` and `createdAt` when omitted
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub category: Vec<Audience>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewContent {
    pub fn into_item(self) -> ContentItem {
        ContentItem {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            kind: self.kind,
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            video_url: self.video_url,
            category: self.category,
            tags: self.tags,
            enabled: self.enabled,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Partial update of a content item
///
/// `id` is only read to locate the row. Unknown fields such as
/// `createdAt` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<ContentType>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Absent keeps the stored URL, `null` clears it
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub video_url: Option<Option<String>>,
    #[serde(default)]
    pub category: Option<Vec<Audience>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Called only when the key is present, so `null` becomes `Some(None)`
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ContentPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}
