//! fetch -> parse -> resolve -> render -> write

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{BuildOptions, Config};
use crate::generate::{render_site, write_pages, RenderContext};
use crate::google::{FolderSource, GoogleClient, SheetSource};
use crate::media::{resolve_media, MediaSummary};
use crate::parse::{parse_info, parse_projects};
use crate::types::{InfoPage, Project};
use crate::utils::page_link;

/// Fetch and parse the projects range, then resolve every project's media
pub fn load_projects(
    config: &Config,
    sheets: &impl SheetSource,
    folders: &impl FolderSource,
) -> Result<(Vec<Project>, MediaSummary)> {
    info!(range = %config.projects_range, "fetching projects");
    let rows = sheets
        .fetch_rows(&config.projects_range)
        .context("Failed to fetch projects")?;

    let mut projects = parse_projects(&rows);
    info!("found {} visible projects", projects.len());

    let summary = resolve_media(&mut projects, folders);
    info!(
        total_images = summary.total_images,
        gallery_projects = summary.gallery_projects,
        "media resolved"
    );
    Ok((projects, summary))
}

/// The info range is optional: any failure falls back to the built-in copy
pub fn load_info(config: &Config, sheets: &impl SheetSource) -> InfoPage {
    match sheets.fetch_rows(&config.info_range) {
        Ok(rows) => {
            let info = parse_info(&rows);
            if info.is_empty() {
                warn!("info sheet has no entries, using defaults");
            } else {
                info!(entries = info.len(), "found info page content");
            }
            info
        }
        Err(e) => {
            warn!(error = %e, "info sheet not available, using defaults");
            InfoPage::default()
        }
    }
}

/// Run the whole pipeline against the given sources
pub fn build_site<S: SheetSource + FolderSource>(
    config: &Config,
    options: &BuildOptions,
    source: &S,
    year: i32,
) -> Result<Vec<PathBuf>> {
    let (projects, _) = load_projects(config, source, source)?;
    let info = load_info(config, source);

    let ctx = RenderContext {
        year,
        escape: options.escape,
        gallery_order: options.gallery_order,
    };
    let site = render_site(&projects, &info, &ctx);

    let written = write_pages(&options.output_dir, &site)?;
    for path in &written {
        info!(path = %path.display(), "generated page");
    }
    Ok(written)
}

pub fn run_build(config: &Config, options: &BuildOptions) -> Result<()> {
    let client = GoogleClient::new(config)?;
    let written = build_site(config, options, &client, Local::now().year())?;

    println!("Build complete:");
    for path in &written {
        println!("  {}", page_link(path));
    }
    Ok(())
}

/// Print the resolved project list as JSON
pub fn run_projects(config: &Config) -> Result<()> {
    let client = GoogleClient::new(config)?;
    let (projects, _) = load_projects(config, &client, &client)?;
    println!("{}", serde_json::to_string_pretty(&projects)?);
    Ok(())
}
