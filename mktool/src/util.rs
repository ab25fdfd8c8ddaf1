// Licensed under the Apache-2.0 license

//! Directory listing and source reading shared by the passes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ListingOrder;
use crate::error::{MkToolError, MkToolResult};

/// Lists the entries of `dir` whose name ends with `.<ext>`, skipping
/// directories. Symlinks are followed; a dangling one fails the listing.
///
/// With [`ListingOrder::Sorted`] the result is ordered by file name; with
/// [`ListingOrder::Native`] it is left in directory-listing order.
pub fn list_files(dir: &Path, ext: &str, order: ListingOrder) -> MkToolResult<Vec<PathBuf>> {
    let suffix = format!(".{ext}");
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| MkToolError::from_io(dir, e))? {
        let entry = entry.map_err(|e| MkToolError::from_io(dir, e))?;
        if !entry.file_name().to_string_lossy().ends_with(&suffix) {
            continue;
        }
        let path = entry.path();
        let meta = fs::metadata(&path).map_err(|e| MkToolError::from_io(&path, e))?;
        if !meta.is_dir() {
            files.push(path);
        }
    }
    if order == ListingOrder::Sorted {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }
    Ok(files)
}

/// Reads a whole source file. Bytes that are not valid UTF-8 are replaced,
/// since only ASCII macro names and identifiers are ever matched.
pub fn read_source(path: &Path) -> MkToolResult<String> {
    let bytes = fs::read(path).map_err(|e| MkToolError::from_io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// File name without its last extension, e.g. `KLEN1` for `hal/hw/KLEN1.h`.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
