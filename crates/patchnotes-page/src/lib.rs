//! Daily build download page.
//!
//! Scans the builds directory, pairs each build with its stored patch notes
//! and renders a single HTML page listing downloads and notes, newest build
//! first.

mod error;
mod formatter;
mod placeholders;
mod scan;

use std::fs;
use std::path::Path;

use tracing::info;

pub use error::{PageError, PageResult};
pub use formatter::BuildPageFormatter;
pub use placeholders::ensure_placeholders;
pub use scan::{BuildEntry, BuildScanner, Download, scan_builds};

use error::io_error;

/// Writes `html` to `path` through a sibling temp file.
///
/// # Errors
///
/// Returns an error if the parent directory or the file cannot be written.
pub fn write_page(path: &Path, html: &str) -> PageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let tmp = path.with_extension("html.tmp");
    fs::write(&tmp, html).map_err(io_error(&tmp))?;
    fs::rename(&tmp, path).map_err(io_error(path))?;

    info!(path = %path.display(), bytes = html.len(), "wrote build page");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_page_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site").join("index.html");

        write_page(&path, "<p>old</p>").unwrap();
        write_page(&path, "<p>new</p>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>new</p>");
        assert!(!path.with_extension("html.tmp").exists());
    }

    #[test]
    fn test_write_page_into_file_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("site");
        fs::write(&blocker, "").unwrap();

        let result = write_page(&blocker.join("index.html"), "x");
        assert!(matches!(result, Err(PageError::Io { .. })));
    }
}
