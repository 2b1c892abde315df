use std::fs;
use std::io;

use anyhow::{Context, Result};
use camino::Utf8Path;

/// Report whether anything (file or directory) is present at `path`.
///
/// Only `NotFound` counts as absent. Any other stat failure, such as a
/// permission error on a parent directory, is reported as present.
pub fn exists(path: &Utf8Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => true,
        Err(err) if err.kind() == io::ErrorKind::NotFound => false,
        Err(err) => {
            tracing::debug!(path = %path, error = %err, "stat failed; treating path as present");
            true
        }
    }
}

/// Ensure a directory exists, creating it and any missing ancestors.
pub fn ensure_dir(path: &Utf8Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("creating directory {}", path))
}

/// Write `contents` to `path`, replacing any previous file, and mark it executable.
pub fn write_executable(path: &Utf8Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)
            .with_context(|| format!("reading permissions of {}", path))?
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)
            .with_context(|| format!("setting permissions on {}", path))?;
    }

    Ok(())
}
