//! Spreadsheet rows -> typed records

use tracing::debug;

use crate::google::Row;
use crate::types::{Category, InfoPage, Project, ProjectType};

/// Rows shorter than this are treated as malformed
pub const MIN_PROJECT_CELLS: usize = 4;
/// `order` when the cell is missing or not a plain number
pub const DEFAULT_ORDER: u32 = 999;

// Projects!A..K
const COL_DATE: usize = 0;
const COL_ROLE: usize = 1;
const COL_PROJECT: usize = 2;
const COL_TASK: usize = 3;
const COL_TYPE: usize = 4;
const COL_MEDIA_SOURCE: usize = 5;
const COL_GALLERY_THUMBNAIL: usize = 6;
const COL_DESCRIPTION: usize = 7;
const COL_CATEGORY: usize = 8;
const COL_ORDER: usize = 9;
const COL_VISIBLE: usize = 10;

/// Outcome of parsing a single project row
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow {
    Visible(Project),
    Hidden { project_name: String },
    Malformed { cells: usize },
}

fn cell<'a>(row: &'a [String], idx: usize) -> Option<&'a str> {
    row.get(idx).map(String::as_str)
}

fn text(row: &[String], idx: usize) -> String {
    cell(row, idx).unwrap_or_default().to_string()
}

/// Plain ASCII digits only; signs, decimals and blanks fall back to 999
pub fn parse_order(value: Option<&str>) -> u32 {
    match value {
        Some(v) if !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()) => {
            v.parse().unwrap_or(DEFAULT_ORDER)
        }
        _ => DEFAULT_ORDER,
    }
}

/// Missing cell means visible; otherwise only a case-insensitive "yes" is
pub fn parse_visible(value: Option<&str>) -> bool {
    match value {
        Some(v) => v.eq_ignore_ascii_case("yes"),
        None => true,
    }
}

pub fn parse_project_row(row: &[String]) -> ParsedRow {
    if row.len() < MIN_PROJECT_CELLS {
        return ParsedRow::Malformed { cells: row.len() };
    }

    let project = Project {
        date: text(row, COL_DATE),
        role: text(row, COL_ROLE),
        project_name: text(row, COL_PROJECT),
        task: text(row, COL_TASK),
        project_type: cell(row, COL_TYPE)
            .map(ProjectType::from_str)
            .unwrap_or_default(),
        media_source: text(row, COL_MEDIA_SOURCE),
        gallery_thumbnail: text(row, COL_GALLERY_THUMBNAIL),
        description: text(row, COL_DESCRIPTION),
        category: cell(row, COL_CATEGORY)
            .map(Category::from_str)
            .unwrap_or_default(),
        order: parse_order(cell(row, COL_ORDER)),
        visible: parse_visible(cell(row, COL_VISIBLE)),
        images: Vec::new(),
        thumbnail_index: None,
    };

    if project.visible {
        ParsedRow::Visible(project)
    } else {
        ParsedRow::Hidden {
            project_name: project.project_name,
        }
    }
}

/// Parse all project rows, keep the visible ones, newest date first
pub fn parse_projects(rows: &[Row]) -> Vec<Project> {
    debug!("received {} project rows", rows.len());

    let mut projects = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        match parse_project_row(row) {
            ParsedRow::Visible(project) => {
                debug!(row = i, project = %project.project_name, "visible");
                projects.push(project);
            }
            ParsedRow::Hidden { project_name } => {
                debug!(row = i, project = %project_name, "hidden, skipping");
            }
            ParsedRow::Malformed { cells } => {
                debug!(row = i, cells, "too short, skipping");
            }
        }
    }

    // Plain string comparison: dates are expected in one sortable format
    projects.sort_by(|a, b| b.date.cmp(&a.date));
    projects
}

/// Info!A:B rows -> normalized key/value pairs, last duplicate wins
pub fn parse_info(rows: &[Row]) -> InfoPage {
    let mut info = InfoPage::default();
    for row in rows {
        if let [key, value, ..] = row.as_slice() {
            info.insert(key, value.as_str());
        }
    }
    info
}
