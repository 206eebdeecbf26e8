//! Confines user supplied collection names to the data directory.
//!
//! Resolution is purely lexical: `.` segments are dropped, `..` pops the
//! previous segment, and a leading `/` on the user component is ignored, so
//! the component is always interpreted relative to the base. The result must
//! lie strictly below the cleaned base directory.

use std::path::{Component, Path, PathBuf};

use tracing::{trace, warn};

use crate::{constants::COLLECTION_EXTENSION, QuadError, Result};

/// Resolves `name` below `base_dir`, rejecting anything that escapes it.
///
/// A relative `base_dir` is anchored at the current working directory first.
///
/// # Errors
/// `QuadError::PathTraversal` if the cleaned path is not strictly inside the
/// cleaned base directory.
pub fn resolve(base_dir: &Path, name: &str) -> Result<PathBuf> {
    let base = clean(&std::path::absolute(base_dir)?);

    let mut joined = base.clone();
    for component in Path::new(name).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {},
            other => joined.push(other.as_os_str()),
        }
    }
    let full = clean(&joined);

    if full == base || !full.starts_with(&base) {
        warn!("Rejected path traversal attempt for name {:?}", name);
        return Err(QuadError::PathTraversal {
            name: name.to_owned(),
        });
    }

    trace!("Resolved {:?} to {:?}", name, full);
    Ok(full)
}

/// Resolves the file backing collection `name`: `<base_dir>/<name>.qdb`.
///
/// Collections live directly in the data directory, so a name must be a
/// single, non-hidden file stem.
///
/// # Errors
/// - `QuadError::PathTraversal` if the name escapes `base_dir`
/// - `QuadError::InvalidCollectionName` if the name is empty, starts with `.` or contains a path
///   separator
pub fn collection_path(base_dir: &Path, name: &str) -> Result<PathBuf> {
    let path = resolve(base_dir, &format!("{}.{}", name, COLLECTION_EXTENSION))?;
    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        warn!("Rejected collection name {:?}", name);
        return Err(QuadError::InvalidCollectionName {
            name: name.to_owned(),
        });
    }
    Ok(path)
}

/// Lexically normalizes a path without touching the filesystem.
///
/// `..` at the root of an absolute path is dropped; in a relative path it is
/// kept, since there is nothing to pop.
pub fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                match parts.last() {
                    Some(Component::Normal(_)) => {
                        parts.pop();
                    },
                    Some(Component::RootDir | Component::Prefix(_)) => {},
                    _ => parts.push(component),
                }
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
