//! Google Sheets and Drive read clients

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const DRIVE_FIELDS: &str = "nextPageToken, files(id, name, mimeType, webContentLink, thumbnailLink)";
const DRIVE_PAGE_SIZE: &str = "1000";

/// A row of cells as returned by the Sheets API (not padded)
pub type Row = Vec<String>;

#[derive(Debug, Error)]
pub enum RemoteFetchError {
    #[error("request for {resource} failed: {source}")]
    Transport {
        resource: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request for {resource} returned HTTP {status}")]
    Status { resource: String, status: StatusCode },
    #[error("could not decode response for {resource}: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can hand back the rows of a sheet range
pub trait SheetSource {
    fn fetch_rows(&self, range: &str) -> Result<Vec<Row>, RemoteFetchError>;
}

/// Anything that can list the files of a storage folder
pub trait FolderSource {
    fn list_folder(&self, folder_id: &str) -> Result<Vec<DriveFile>, RemoteFetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    pub thumbnail_link: Option<String>,
}

impl DriveFile {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

// API response types
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
}

/// Direct-view URL for a Drive file id
pub fn drive_image_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=view&id={}", file_id)
}

/// Cells normally arrive as strings; anything else is stringified
fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// API-key authenticated client for both services
pub struct GoogleClient {
    client: Client,
    sheet_id: String,
    api_key: String,
}

impl GoogleClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("portfolio-site/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            sheet_id: config.sheet_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn values_url(&self, range: &str) -> Url {
        let mut url = Url::parse(SHEETS_API_URL).expect("static sheets URL is valid");
        url.path_segments_mut()
            .expect("https URL has path segments")
            .push(&self.sheet_id)
            .push("values")
            .push(range);
        url
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, RemoteFetchError> {
        let response: Response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|source| RemoteFetchError::Transport {
                resource: resource.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteFetchError::Status {
                resource: resource.to_string(),
                status,
            });
        }

        let text = response.text().map_err(|source| RemoteFetchError::Transport {
            resource: resource.to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| RemoteFetchError::Decode {
            resource: resource.to_string(),
            source,
        })
    }
}

impl SheetSource for GoogleClient {
    fn fetch_rows(&self, range: &str) -> Result<Vec<Row>, RemoteFetchError> {
        let resource = format!("sheet range '{}'", range);
        let url = self.values_url(range);
        let body: ValueRange = self.get_json(&resource, url, &[("key", self.api_key.as_str())])?;

        debug!(range, rows = body.values.len(), "fetched sheet range");
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }
}

impl FolderSource for GoogleClient {
    fn list_folder(&self, folder_id: &str) -> Result<Vec<DriveFile>, RemoteFetchError> {
        let resource = format!("drive folder '{}'", folder_id);
        let q = format!("'{}' in parents and mimeType contains 'image/'", folder_id);
        let base = Url::parse(DRIVE_FILES_URL).expect("static drive URL is valid");

        let mut files = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![
                ("q", q.as_str()),
                ("key", self.api_key.as_str()),
                ("fields", DRIVE_FIELDS),
                ("orderBy", "name"),
                ("pageSize", DRIVE_PAGE_SIZE),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: FileList = self.get_json(&resource, base.clone(), &query)?;
            files.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(folder_id, files = files.len(), "listed drive folder");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_image_url() {
        assert_eq!(
            drive_image_url("abc123"),
            "https://drive.google.com/uc?export=view&id=abc123"
        );
    }

    #[test]
    fn test_values_url_encodes_range() {
        let client = GoogleClient::new(&Config::new("sheet-1", "secret")).unwrap();
        let url = client.values_url("Projects!A2:K100");
        assert!(url
            .as_str()
            .starts_with("https://sheets.googleapis.com/v4/spreadsheets/sheet-1/values/Projects!A2:K100"));

        let url = client.values_url("My Info!A2:B");
        assert!(url.as_str().ends_with("/values/My%20Info!A2:B"));
    }

    #[test]
    fn test_value_range_parsing() {
        let body: ValueRange = serde_json::from_str(
            r#"{"range": "Projects!A2:K100", "values": [["2024-05-01", 3, null, true]]}"#,
        )
        .unwrap();
        let rows: Vec<Row> = body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect();
        assert_eq!(rows, vec![vec!["2024-05-01", "3", "", "true"]]);

        let empty: ValueRange = serde_json::from_str(r#"{"range": "Info!A2:B"}"#).unwrap();
        assert!(empty.values.is_empty());
    }

    #[test]
    fn test_file_list_parsing() {
        let page: FileList = serde_json::from_str(
            r#"{
                "nextPageToken": "next",
                "files": [
                    {"id": "1", "name": "a.jpg", "mimeType": "image/jpeg", "thumbnailLink": "https://t/1"},
                    {"id": "2", "name": "notes.txt", "mimeType": "text/plain"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("next"));
        assert_eq!(page.files.len(), 2);
        assert!(page.files[0].is_image());
        assert_eq!(page.files[0].thumbnail_link.as_deref(), Some("https://t/1"));
        assert!(!page.files[1].is_image());
    }

    #[test]
    fn test_error_message_omits_key() {
        let err = RemoteFetchError::Status {
            resource: "sheet range 'Projects!A2:K100'".to_string(),
            status: StatusCode::FORBIDDEN,
        };
        let msg = err.to_string();
        assert!(msg.contains("Projects!A2:K100"));
        assert!(msg.contains("403"));
    }
}
