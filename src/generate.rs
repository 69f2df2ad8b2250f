use anyhow::{Context, Result};
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::{Escaping, GalleryOrder, ARCHIVE_FILE, GALLERY_FILE, INFO_FILE};
use crate::types::{Image, InfoPage, Project, ProjectType};

const SITE_TITLE: &str = "yukakinoki";
const SITE_DOMAIN: &str = "yukakinoki.com";
const CSS_LINK: &str = r#"<link rel="stylesheet" href="css/styles.css">"#;
const FONTS_LINK: &str = r#"<link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Material+Symbols+Outlined:opsz,wght,FILL,GRAD@20..48,100..700,0..1,-50..200" />"#;

const DEFAULT_BIO_ENGLISH: &str = "Yu Kakinoki is a billingual interdisciplinary designer, currently based in Tokyo. Have developed a distinct eye for aesthetics by growing up in California, Japan, Hong Kong, and London. The goal is to push the boundaries of storytelling through spatial design - whether it be a tangible room, a digital space, or both. This website was built through GitHub Pages with self-learnt HTML, CSS, JavaScript, and Bootstrap. My dissertation title was 'To what extent is the aura relevant to a work of art in the age of biocybernetic simulation?'\n";
const DEFAULT_BIO_JAPANESE: &str = "柿木優は、現在東京を拠点に活動している学際的なバイリンガルデザイナーです。 カリフォルニア、香港、ロンドンと日本で生まれ育ち、独特なセンスを構築しました。ストーリーテリングの未来をデジタル、そして現実的な空間デザインを交えて追求しています。 事実上何でも独学で学べる世界に住んで幸せです！ このサイトは、HTML、CSS、JavaScript、および Bootstrapを自己学習し、GitHubページを通して構築しました。";
const DEFAULT_CONTACT_EMAIL: &str = "yukakinoki@gmail.com";
const DEFAULT_CONTACT_TEXT: &str = "contact";

/// Inputs to the page templates that do not come from the sheet
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Copyright year in the footer
    pub year: i32,
    pub escape: Escaping,
    pub gallery_order: GalleryOrder,
}

impl RenderContext {
    fn text<'a>(&self, s: &'a str) -> Cow<'a, str> {
        match self.escape {
            Escaping::Html => Cow::Owned(html_escape(s)),
            Escaping::Raw => Cow::Borrowed(s),
        }
    }
}

/// The three output documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSite {
    pub gallery: String,
    pub archive: String,
    pub info: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavPage {
    Info,
    Gallery,
    Archive,
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn url_pattern() -> &'static Regex {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    URL_RE.get_or_init(|| Regex::new(r"(https?://[^\s]+)").expect("URL pattern compiles"))
}

/// Wrap every literal http(s) URL in an anchor opening a new tab
pub fn autolink(text: &str) -> Cow<'_, str> {
    url_pattern().replace_all(text, r#"<a href="${1}" target="_blank">${1}</a>"#)
}

/// Document head plus the nav bar, with `active` highlighted
fn page_header(title: &str, active: NavPage) -> String {
    let mark = |page: NavPage| if page == active { " active" } else { "" };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    {css}
    {fonts}
</head>
<body>
    <nav>
        <ul>
            <li class="aboutbutton{info}"><a href="info.html">INFO</a></li>
            <li class="gallerybutton{gallery}"><a href="index.html">GALLERY</a></li>
            <li class="listbutton{archive}"><a href="archive.html">ARCHIVE</a></li>
        </ul>
    </nav>
    
"#,
        title = title,
        css = CSS_LINK,
        fonts = FONTS_LINK,
        info = mark(NavPage::Info),
        gallery = mark(NavPage::Gallery),
        archive = mark(NavPage::Archive),
    )
}

fn page_footer(year: i32, script: Option<&str>) -> String {
    let script_html = script
        .map(|src| format!("    \n    <script src=\"{}\"></script>\n", src))
        .unwrap_or_default();
    format!(
        r#"    
    <footer>
        <p>Copyright © {year}, <span style="text-transform: lowercase;">{domain}</span></p>
    </footer>
{script_html}</body>
</html>"#,
        year = year,
        domain = SITE_DOMAIN,
        script_html = script_html,
    )
}

/// `<img>` for images, clickable preview for videos
fn media_html(project: &Project, img: &Image, indent: &str, ctx: &RenderContext) -> String {
    let alt = ctx.text(&project.description);
    match project.project_type {
        ProjectType::Video => format!(
            r#"{}<a href="{}"><img src="{}" alt="{}"></a>"#,
            indent,
            ctx.text(&img.url),
            ctx.text(&img.video_preview()),
            alt
        ),
        _ => format!(r#"{}<img src="{}" alt="{}">"#, indent, ctx.text(&img.url), alt),
    }
}

/// Projects shown on the gallery page, in display order
pub fn gallery_projects<'a>(projects: &'a [Project], order: GalleryOrder) -> Vec<&'a Project> {
    let mut selected: Vec<&Project> = projects
        .iter()
        .filter(|p| p.category.in_gallery() && p.has_images())
        .collect();
    if order == GalleryOrder::Order {
        selected.sort_by_key(|p| p.order);
    }
    selected
}

/// Gallery page: one thumbnail per project
pub fn gallery_page(projects: &[Project], ctx: &RenderContext) -> String {
    let project_html = gallery_projects(projects, ctx.gallery_order)
        .into_iter()
        .map(|p| match p.thumbnail_image() {
            Some(img) => media_html(p, img, "                ", ctx),
            None => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut html = page_header(SITE_TITLE, NavPage::Gallery);
    html.push_str(&format!(
        r#"    <div class="gallery-section">
        <div class="sample">
            <div class="scroll-container">
{}
            </div>
        </div>
    </div>
"#,
        project_html
    ));
    html.push_str(&page_footer(ctx.year, None));
    html
}

/// Archive page: clickable table rows, each paired with a hidden media block
pub fn archive_page(projects: &[Project], ctx: &RenderContext) -> String {
    let mut sorted: Vec<&Project> = projects.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut table_rows = Vec::with_capacity(sorted.len());
    let mut content_sections = Vec::with_capacity(sorted.len());

    for (i, project) in sorted.iter().enumerate() {
        let project_id = format!("project-{}", i);
        let task = ctx.text(&project.task);

        table_rows.push(format!(
            r#"            <tr data-tab="{id}">
                <td>{date}</td>
                <td>{role}</td>
                <td>{name}</td>
                <td>{task}</td>
            </tr>"#,
            id = project_id,
            date = ctx.text(&project.date),
            role = ctx.text(&project.role),
            name = ctx.text(&project.project_name),
            task = autolink(&task),
        ));

        if project.has_images() {
            let images_html = project
                .images
                .iter()
                .map(|img| media_html(project, img, "                    ", ctx))
                .collect::<Vec<_>>()
                .join("\n");
            content_sections.push(format!(
                r#"        <div id="{}" class="project-content">
            <div class="scroll-container">
{}
            </div>
        </div>"#,
                project_id, images_html
            ));
        } else {
            content_sections.push(format!(
                r#"        <div id="{}" class="project-content"></div>"#,
                project_id
            ));
        }
    }

    let mut html = page_header(&format!("Archive - {}", SITE_TITLE), NavPage::Archive);
    html.push_str(&format!(
        r#"    <div class="archive-container">
        <div class="table-container">
            <div class="table-header">
                <button id="toggleTable" class="collapse-button">-</button>
            </div>
            <table class="table table-hover">
                <thead>
                    <tr>
                        <th>DATE</th>
                        <th>ROLE</th>
                        <th>PROJECT</th>
                        <th>TASK</th>
                    </tr>
                </thead>
                <tbody>
{}
                </tbody>
            </table>
        </div>
        
        <div class="sample">
{}
        </div>
    </div>
"#,
        table_rows.join("\n"),
        content_sections.join("\n")
    ));
    html.push_str(&page_footer(ctx.year, Some("js/scripts.js")));
    html
}

/// Info page: bios and contact link, with built-in fallbacks
pub fn info_page(info: &InfoPage, ctx: &RenderContext) -> String {
    let mut html = page_header(SITE_TITLE, NavPage::Info);
    html.push_str(&format!(
        r#"    <main class="info">
        <section class="bio">
            <p>{}</p>
            <p>{}</p>
        </section>
        <section class="contact">
            <a href="mailto:{}">{}</a>
        </section>
    </main>
"#,
        ctx.text(info.get_or("bio_english", DEFAULT_BIO_ENGLISH)),
        ctx.text(info.get_or("bio_japanese", DEFAULT_BIO_JAPANESE)),
        ctx.text(info.get_or("contact_email", DEFAULT_CONTACT_EMAIL)),
        ctx.text(info.get_or("contact_text", DEFAULT_CONTACT_TEXT)),
    ));
    html.push_str(&page_footer(ctx.year, None));
    html
}

pub fn render_site(projects: &[Project], info: &InfoPage, ctx: &RenderContext) -> RenderedSite {
    RenderedSite {
        gallery: gallery_page(projects, ctx),
        archive: archive_page(projects, ctx),
        info: info_page(info, ctx),
    }
}

/// Overwrite the three pages in `output_dir`, returning the written paths
pub fn write_pages(output_dir: &Path, site: &RenderedSite) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;

    let mut written = Vec::with_capacity(3);
    for (name, contents) in [
        (GALLERY_FILE, &site.gallery),
        (ARCHIVE_FILE, &site.archive),
        (INFO_FILE, &site.info),
    ] {
        let path = output_dir.join(name);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
