//! On-disk format for the file-backed store.
//!
//! The store file is a pretty-printed JSON array of recipes, rewritten in full
//! on every mutation. Writes go to a sibling temp file which is fsynced and
//! renamed over the target, so readers of the file never observe a torn
//! document.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use recipes_core::recipe::Recipe;
use recipes_core::storage::RepositoryError;

/// Reads and decodes the whole store file.
///
/// An unreadable file maps to `Io`; malformed content maps to `Serialization`.
pub async fn load_recipes(path: &Path) -> Result<Vec<Recipe>, RepositoryError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| RepositoryError::Io(format!("{}: {}", path.display(), e)))?;
    decode_recipes(&bytes)
}

/// Decodes a store document.
pub fn decode_recipes(bytes: &[u8]) -> Result<Vec<Recipe>, RepositoryError> {
    serde_json::from_slice(bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Encodes and durably writes the full recipe set.
///
/// Synchronous: callers hold the store's write lock and publish the new
/// snapshot right after this returns, with no await point in between.
pub fn write_recipes(path: &Path, recipes: &[Recipe]) -> io::Result<()> {
    let payload = serde_json::to_vec_pretty(recipes).map_err(io::Error::other)?;

    let tmp_path = temp_path(path);
    {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(&payload)?;
        file.sync_all()?;
    }
    if let Err(err) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err);
    }

    // The new content is already visible; a failed directory sync only
    // weakens crash durability, so it must not fail the write.
    if let Err(err) = sync_parent_dir(path) {
        tracing::warn!(
            path = %path.display(),
            error = %err,
            "Failed to sync store directory after rename"
        );
    }
    Ok(())
}

/// Fsyncs the directory holding `path` so a completed rename survives a crash.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::File::open(parent)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "recipes".into());
    name.push(".tmp");
    path.with_file_name(name)
}
