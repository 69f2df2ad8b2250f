//! Portfolio records built from the spreadsheet rows

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Media kind of a project (column E)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Image,
    Video,
    DriveFolder,
    #[default]
    None,
}

impl ProjectType {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "image" => ProjectType::Image,
            "video" => ProjectType::Video,
            "drive_folder" => ProjectType::DriveFolder,
            _ => ProjectType::None,
        }
    }
}

/// Which page(s) a project is listed on (column I)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gallery,
    #[default]
    Archive,
    Both,
}

impl Category {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "gallery" => Category::Gallery,
            "both" => Category::Both,
            _ => Category::Archive,
        }
    }

    pub fn in_gallery(&self) -> bool {
        matches!(self, Category::Gallery | Category::Both)
    }
}

/// A renderable piece of media
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// Drive file id, only for folder-sourced media
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Image {
    /// Preview URL for a video: the explicit thumbnail, else `foo.mp4` -> `foo.png`
    pub fn video_preview(&self) -> String {
        match &self.thumbnail {
            Some(thumb) => thumb.clone(),
            None => match self.url.strip_suffix(".mp4") {
                Some(stem) => format!("{}.png", stem),
                None => self.url.clone(),
            },
        }
    }
}

/// One visible portfolio entry
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Display text, also the (lexicographic) sort key
    pub date: String,
    pub role: String,
    pub project_name: String,
    pub task: String,
    pub project_type: ProjectType,
    pub media_source: String,
    pub gallery_thumbnail: String,
    pub description: String,
    pub category: Category,
    pub order: u32,
    pub visible: bool,
    pub images: Vec<Image>,
    /// Index into `images`
    pub thumbnail_index: Option<usize>,
}

impl Project {
    pub fn thumbnail_image(&self) -> Option<&Image> {
        self.thumbnail_index.and_then(|i| self.images.get(i))
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

// The thumbnail is written out as the resolved image, not its index
impl Serialize for Project {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Project", 13)?;
        s.serialize_field("date", &self.date)?;
        s.serialize_field("role", &self.role)?;
        s.serialize_field("project_name", &self.project_name)?;
        s.serialize_field("task", &self.task)?;
        s.serialize_field("type", &self.project_type)?;
        s.serialize_field("media_source", &self.media_source)?;
        s.serialize_field("gallery_thumbnail", &self.gallery_thumbnail)?;
        s.serialize_field("description", &self.description)?;
        s.serialize_field("category", &self.category)?;
        s.serialize_field("order", &self.order)?;
        s.serialize_field("visible", &self.visible)?;
        s.serialize_field("images", &self.images)?;
        s.serialize_field("thumbnail_image", &self.thumbnail_image())?;
        s.end()
    }
}

/// Key/value copy for the info page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InfoPage {
    entries: HashMap<String, String>,
}

impl InfoPage {
    /// Lower-case the key and replace spaces with underscores
    pub fn normalize_key(key: &str) -> String {
        key.to_lowercase().replace(' ', "_")
    }

    /// Later inserts for the same key overwrite earlier ones
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(Self::normalize_key(key), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
