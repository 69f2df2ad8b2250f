//! Populate `images` and the thumbnail for each project

use tracing::{info, warn};

use crate::google::{drive_image_url, DriveFile, FolderSource};
use crate::types::{Image, Project, ProjectType};

/// Counts reported after resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaSummary {
    pub total_images: usize,
    pub gallery_projects: usize,
}

impl MediaSummary {
    pub fn of(projects: &[Project]) -> Self {
        Self {
            total_images: projects.iter().map(|p| p.images.len()).sum(),
            gallery_projects: projects
                .iter()
                .filter(|p| p.category.in_gallery() && p.has_images())
                .count(),
        }
    }
}

fn folder_image(file: &DriveFile) -> Image {
    Image {
        id: Some(file.id.clone()),
        name: file.name.clone(),
        url: drive_image_url(&file.id),
        thumbnail: file.thumbnail_link.clone().filter(|t| !t.is_empty()),
    }
}

/// Expand a folder listing; the named thumbnail wins, else the first image
fn apply_folder_listing(project: &mut Project, files: &[DriveFile]) {
    project.images = files.iter().filter(|f| f.is_image()).map(folder_image).collect();

    let wanted = project.gallery_thumbnail.as_str();
    let named = if wanted.is_empty() {
        None
    } else {
        project.images.iter().rposition(|img| img.name == wanted)
    };

    project.thumbnail_index = named.or(if project.images.is_empty() { None } else { Some(0) });
}

/// Single-file project: its media source is both the only image and the thumbnail
fn apply_single_file(project: &mut Project) {
    let thumbnail = Some(project.gallery_thumbnail.clone()).filter(|t| !t.is_empty());
    project.images = vec![Image {
        id: None,
        name: project.project_name.clone(),
        url: project.media_source.clone(),
        thumbnail,
    }];
    project.thumbnail_index = Some(0);
}

pub fn resolve_project(project: &mut Project, folders: &impl FolderSource) {
    if project.media_source.is_empty() {
        return;
    }

    match project.project_type {
        ProjectType::DriveFolder => {
            info!(project = %project.project_name, "fetching drive folder images");
            match folders.list_folder(&project.media_source) {
                Ok(files) => {
                    apply_folder_listing(project, &files);
                    info!(
                        project = %project.project_name,
                        images = project.images.len(),
                        thumbnail = project.thumbnail_image().map(|img| img.name.as_str()).unwrap_or(""),
                        "resolved drive folder"
                    );
                }
                // A bad folder degrades this project only
                Err(e) => {
                    warn!(project = %project.project_name, error = %e, "error fetching drive folder");
                }
            }
        }
        ProjectType::Image | ProjectType::Video => apply_single_file(project),
        ProjectType::None => {}
    }
}

pub fn resolve_media(projects: &mut [Project], folders: &impl FolderSource) -> MediaSummary {
    for project in projects.iter_mut() {
        resolve_project(project, folders);
    }
    MediaSummary::of(projects)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::google::RemoteFetchError;
    use crate::types::Category;
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory folder listings; unknown folders answer 404
    #[derive(Default)]
    pub(crate) struct FakeFolders {
        pub folders: HashMap<String, Vec<DriveFile>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeFolders {
        pub fn with(mut self, folder_id: &str, names: &[&str]) -> Self {
            let files = names
                .iter()
                .enumerate()
                .map(|(i, name)| DriveFile {
                    id: format!("{}-{}", folder_id, i),
                    name: name.to_string(),
                    mime_type: "image/jpeg".to_string(),
                    thumbnail_link: None,
                })
                .collect();
            self.folders.insert(folder_id.to_string(), files);
            self
        }
    }

    impl FolderSource for FakeFolders {
        fn list_folder(&self, folder_id: &str) -> Result<Vec<DriveFile>, RemoteFetchError> {
            self.calls.borrow_mut().push(folder_id.to_string());
            self.folders
                .get(folder_id)
                .cloned()
                .ok_or_else(|| RemoteFetchError::Status {
                    resource: format!("drive folder '{}'", folder_id),
                    status: StatusCode::NOT_FOUND,
                })
        }
    }

    pub(crate) fn project(project_type: ProjectType, media_source: &str, thumb: &str) -> Project {
        Project {
            date: "2024-01-01".to_string(),
            role: "Designer".to_string(),
            project_name: "Project".to_string(),
            task: "Task".to_string(),
            project_type,
            media_source: media_source.to_string(),
            gallery_thumbnail: thumb.to_string(),
            description: "desc".to_string(),
            category: Category::Both,
            order: 999,
            visible: true,
            images: Vec::new(),
            thumbnail_index: None,
        }
    }

    #[test]
    fn test_named_thumbnail_is_selected() {
        let folders = FakeFolders::default().with("f1", &["a.jpg", "cover.jpg", "z.jpg"]);
        let mut p = project(ProjectType::DriveFolder, "f1", "cover.jpg");
        resolve_project(&mut p, &folders);

        assert_eq!(p.images.len(), 3);
        assert_eq!(p.thumbnail_image().unwrap().name, "cover.jpg");
        assert_eq!(
            p.images[0].url,
            "https://drive.google.com/uc?export=view&id=f1-0"
        );
        assert_eq!(p.images[0].id.as_deref(), Some("f1-0"));
    }

    #[test]
    fn test_thumbnail_defaults_to_first_image() {
        let folders = FakeFolders::default().with("f1", &["a.jpg", "cover.jpg"]);

        let mut p = project(ProjectType::DriveFolder, "f1", "");
        resolve_project(&mut p, &folders);
        assert_eq!(p.thumbnail_image().unwrap().name, "a.jpg");

        // Match is case-sensitive
        let mut p = project(ProjectType::DriveFolder, "f1", "COVER.JPG");
        resolve_project(&mut p, &folders);
        assert_eq!(p.thumbnail_image().unwrap().name, "a.jpg");
    }

    #[test]
    fn test_listing_order_is_preserved() {
        let folders = FakeFolders::default().with("f1", &["b.jpg", "a.jpg"]);
        let mut p = project(ProjectType::DriveFolder, "f1", "");
        resolve_project(&mut p, &folders);
        let names: Vec<_> = p.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b.jpg", "a.jpg"]);
    }

    #[test]
    fn test_non_image_files_are_skipped() {
        let mut folders = FakeFolders::default().with("f1", &["a.jpg"]);
        folders.folders.get_mut("f1").unwrap().insert(
            0,
            DriveFile {
                id: "doc".to_string(),
                name: "readme.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                thumbnail_link: Some("https://t/doc".to_string()),
            },
        );
        let mut p = project(ProjectType::DriveFolder, "f1", "readme.pdf");
        resolve_project(&mut p, &folders);
        assert_eq!(p.images.len(), 1);
        assert_eq!(p.thumbnail_image().unwrap().name, "a.jpg");
    }

    #[test]
    fn test_empty_folder_has_no_thumbnail() {
        let folders = FakeFolders::default().with("f1", &[]);
        let mut p = project(ProjectType::DriveFolder, "f1", "");
        resolve_project(&mut p, &folders);
        assert!(p.images.is_empty());
        assert!(p.thumbnail_image().is_none());
    }

    #[test]
    fn test_listing_failure_is_masked() {
        let folders = FakeFolders::default().with("good", &["a.jpg"]);
        let mut projects = vec![
            project(ProjectType::DriveFolder, "missing", ""),
            project(ProjectType::DriveFolder, "good", ""),
        ];
        let summary = resolve_media(&mut projects, &folders);

        assert!(projects[0].images.is_empty());
        assert!(projects[0].thumbnail_image().is_none());
        assert_eq!(projects[1].images.len(), 1);
        assert_eq!(
            summary,
            MediaSummary {
                total_images: 1,
                gallery_projects: 1
            }
        );
    }

    #[test]
    fn test_single_file_types() {
        let folders = FakeFolders::default();

        let mut p = project(ProjectType::Image, "https://example.com/x.jpg", "");
        resolve_project(&mut p, &folders);
        assert_eq!(p.images.len(), 1);
        assert_eq!(p.images[0].url, "https://example.com/x.jpg");
        assert_eq!(p.images[0].thumbnail, None);
        assert_eq!(p.thumbnail_image(), Some(&p.images[0]));

        let mut p = project(ProjectType::Video, "https://example.com/v.mp4", "https://example.com/v.jpg");
        resolve_project(&mut p, &folders);
        assert_eq!(p.images[0].thumbnail.as_deref(), Some("https://example.com/v.jpg"));
        assert_eq!(p.images[0].name, "Project");

        assert!(folders.calls.borrow().is_empty());
    }

    #[test]
    fn test_unresolvable_projects_stay_empty() {
        let folders = FakeFolders::default();

        for mut p in [
            project(ProjectType::None, "https://example.com/x.jpg", ""),
            project(ProjectType::Image, "", ""),
            project(ProjectType::DriveFolder, "", ""),
        ] {
            resolve_project(&mut p, &folders);
            assert!(p.images.is_empty());
            assert!(p.thumbnail_image().is_none());
        }
        assert!(folders.calls.borrow().is_empty());
    }
}
