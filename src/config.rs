use std::path::PathBuf;

pub const PROJECTS_RANGE: &str = "Projects!A2:K100";
pub const INFO_RANGE: &str = "Info!A2:B";

pub const GALLERY_FILE: &str = "index.html";
pub const ARCHIVE_FILE: &str = "archive.html";
pub const INFO_FILE: &str = "info.html";

/// Remote data source settings, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub sheet_id: String,
    pub api_key: String,
    pub projects_range: String,
    pub info_range: String,
}

impl Config {
    pub fn new(sheet_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            api_key: api_key.into(),
            projects_range: PROJECTS_RANGE.to_string(),
            info_range: INFO_RANGE.to_string(),
        }
    }
}

/// How spreadsheet text is interpolated into the page templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    /// Insert values verbatim so cells may carry their own markup
    #[default]
    Raw,
    /// HTML-escape every interpolated value
    Html,
}

/// Ordering of the gallery page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GalleryOrder {
    /// Newest first (the archive order)
    #[default]
    Date,
    /// Ascending `order` column, newest first within equal values
    Order,
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub output_dir: PathBuf,
    pub escape: Escaping,
    pub gallery_order: GalleryOrder,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            escape: Escaping::Raw,
            gallery_order: GalleryOrder::Date,
        }
    }
}
