use std::fs;
use std::path::Path;

/// Wrap `text` in an OSC8 escape so terminals render it as a link
pub fn osc8_link(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text)
}

/// Terminal link to a generated page, labelled with the path as given
pub fn page_link(path: &Path) -> String {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    osc8_link(
        &format!("file://{}", target.display()),
        &path.display().to_string(),
    )
}
