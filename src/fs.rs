use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;
use crate::domain::{CopySummary, DirPair};
use crate::error::{io_at, BuildError};

/// Recursively copies the contents of `pair.source` into `pair.destination`,
/// overwriting files that already exist there. Files only present in the
/// destination are kept. Symlinks are recreated as links, not followed.
///
/// The destination is not created when the source is missing.
pub fn copy_dir(pair: &DirPair) -> Result<CopySummary, BuildError> {
    let DirPair { source, destination } = pair;
    if !source.is_dir() {
        return Err(BuildError::SourceMissing { path: source.clone() });
    }

    fs::create_dir_all(destination).map_err(io_at(destination))?;

    let mut summary = CopySummary::default();
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry?;
        let path = entry.path();

        // Preserve relative structure under the destination
        let relative_path = path.strip_prefix(source).map_err(|_e| BuildError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other("entry is outside the source directory"),
        })?;
        let output_path = destination.join(relative_path);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&output_path).map_err(io_at(&output_path))?;
            summary.dirs += 1;
        } else if file_type.is_symlink() {
            copy_link(path, &output_path)?;
            summary.files += 1;
        } else {
            copy_file(path, &output_path)?;
            summary.files += 1;
        }
    }

    info!(
        "Copied {} files and {} directories from {} to {}",
        summary.files,
        summary.dirs,
        source.display(),
        destination.display()
    );
    Ok(summary)
}

fn copy_file(path: &Path, output_path: &Path) -> Result<(), BuildError> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(io_at(parent))?;
    }
    debug!("Copying asset: {} -> {}", path.display(), output_path.display());
    fs::copy(path, output_path).map_err(io_at(path))?;
    Ok(())
}

#[cfg(unix)]
fn copy_link(path: &Path, output_path: &Path) -> Result<(), BuildError> {
    let target = fs::read_link(path).map_err(io_at(path))?;
    if fs::symlink_metadata(output_path).is_ok() {
        fs::remove_file(output_path).map_err(io_at(output_path))?;
    }
    debug!("Linking asset: {} -> {}", output_path.display(), target.display());
    std::os::unix::fs::symlink(&target, output_path).map_err(io_at(output_path))?;
    Ok(())
}

// Off unix the link target is copied by content.
#[cfg(not(unix))]
fn copy_link(path: &Path, output_path: &Path) -> Result<(), BuildError> {
    copy_file(path, output_path)
}

/// Overwrites `path` with `contents`, creating parent directories first.
pub fn write_file(path: &Path, contents: &[u8]) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_at(parent))?;
    }
    fs::write(path, contents).map_err(io_at(path))?;
    debug!("Wrote {}", path.display());
    Ok(())
}
