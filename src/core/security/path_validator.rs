use std::io;
use std::path::{Path, PathBuf};

use crate::core::config::SecurityConfig;

/// Errors that can occur during path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Symlink '{path}' is not allowed (MCP_ALLOW_SYMLINKS=false)")]
    SymlinkNotAllowed { path: PathBuf },

    #[error("Cannot canonicalize path '{path}': {error}")]
    CannotCanonicalize { path: PathBuf, error: io::Error },

    #[error("Path does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("Path '{path}' has no file name")]
    MissingFileName { path: PathBuf },
}

/// Validates an existing path (e.g. a GeoJSON input file) against the
/// configured security boundaries.
///
/// The path is canonicalized, so `.`/`..` segments and symlinks are resolved
/// before the root check. With symlinks disallowed, a symlink at the given
/// path is rejected outright.
///
/// # Examples
///
/// ```rust,ignore
/// let config = Config::from_env();
/// let geojson = validate_path("/data/dc_usgs.geojson", &config.security)?;
/// ```
pub fn validate_path(input_path: &str, security: &SecurityConfig) -> Result<PathBuf, PathSecurityError> {
    let path = Path::new(input_path);

    if !security.allow_symlinks && path.is_symlink() {
        return Err(PathSecurityError::SymlinkNotAllowed {
            path: path.to_path_buf(),
        });
    }

    let canonical_path = canonicalize_path(path)?;
    check_root(canonical_path, security)
}

/// Validates a path that is about to be written.
///
/// The file itself may not exist yet; its parent directory must, and the
/// parent is what gets checked against the root.
pub fn validate_output_path(
    output_path: &Path,
    security: &SecurityConfig,
) -> Result<PathBuf, PathSecurityError> {
    let file_name = output_path
        .file_name()
        .ok_or_else(|| PathSecurityError::MissingFileName {
            path: output_path.to_path_buf(),
        })?;

    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if output_path.exists() && !security.allow_symlinks && output_path.is_symlink() {
        return Err(PathSecurityError::SymlinkNotAllowed {
            path: output_path.to_path_buf(),
        });
    }

    let canonical_parent = check_root(canonicalize_path(parent)?, security)?;
    Ok(canonical_parent.join(file_name))
}

fn check_root(canonical_path: PathBuf, security: &SecurityConfig) -> Result<PathBuf, PathSecurityError> {
    let Some(root) = &security.root_path else {
        return Ok(canonical_path);
    };

    let canonical_root = canonicalize_path(root)?;
    if !canonical_path.starts_with(&canonical_root) {
        return Err(PathSecurityError::OutsideRootDirectory {
            path: canonical_path,
            root: canonical_root,
        });
    }

    Ok(canonical_path)
}

fn canonicalize_path(path: &Path) -> Result<PathBuf, PathSecurityError> {
    path.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PathSecurityError::PathNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PathSecurityError::CannotCanonicalize {
                path: path.to_path_buf(),
                error: e,
            }
        }
    })
}
