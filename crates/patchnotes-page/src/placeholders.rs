//! Empty platform files for builds that have not been uploaded yet.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::PageResult;
use crate::error::io_error;

/// Creates an empty `<platform>_<build>` file in every build directory that
/// lacks one. Existing files are left untouched.
///
/// Returns the number of files created.
///
/// # Errors
///
/// Returns an error if the builds directory cannot be listed or a file
/// cannot be created.
pub fn ensure_placeholders(builds_dir: &Path, platforms: &[String]) -> PageResult<usize> {
    let mut created = 0;

    for entry in fs::read_dir(builds_dir).map_err(io_error(builds_dir))? {
        let entry = entry.map_err(io_error(builds_dir))?;
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();

        for platform in platforms {
            let path = dir.join(format!("{platform}_{name}"));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => {
                    debug!(path = %path.display(), "created placeholder");
                    created += 1;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(io_error(&path)(e)),
            }
        }
    }

    info!(created, "ensured platform placeholders");
    Ok(created)
}
