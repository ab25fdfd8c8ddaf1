// Licensed under the Apache-2.0 license

//! HW-Feature pass: one Makefile fragment per hardware header.
//!
//! Each line of `hal/hw/<unit>.h` is tested against the [`FeatureTable`];
//! the lines of the first matching rule are appended to `hal/mk/<unit>.d`.
//! A header with no recognized feature produces an empty fragment.

use std::path::{Path, PathBuf};

use crate::config::MkToolConfig;
use crate::error::MkToolResult;
use crate::features::FeatureTable;
use crate::output::GeneratedFile;
use crate::util::{base_name, list_files, read_source};

/// Makefile lines for a header's text, in encounter order.
pub fn fragment_lines(table: &FeatureTable, text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| table.lookup(line))
        .flat_map(|rule| rule.lines.iter().cloned())
        .collect()
}

/// Path of the fragment for `header` inside `mk_dir`.
pub fn fragment_path(header: &Path, mk_dir: &Path, mk_ext: &str) -> PathBuf {
    mk_dir.join(format!("{}.{}", base_name(header), mk_ext))
}

/// Renders the fragment for one hardware header.
pub fn generate_fragment(
    table: &FeatureTable,
    header: &Path,
    mk_dir: &Path,
    mk_ext: &str,
) -> MkToolResult<GeneratedFile> {
    let text = read_source(header)?;
    let lines = fragment_lines(table, &text);
    log::debug!(
        "{}: {} feature lines",
        header.display(),
        lines.len()
    );
    Ok(GeneratedFile::from_lines(
        fragment_path(header, mk_dir, mk_ext),
        lines,
    ))
}

/// Every hardware header under the configured directory.
pub fn discover_headers(config: &MkToolConfig, root: &Path) -> MkToolResult<Vec<PathBuf>> {
    list_files(&config.hw_dir(root), &config.hw_ext, config.listing_order)
}

/// Renders the fragments of all hardware units. The first unreadable header
/// fails the whole pass.
///
/// Only units with a header are covered: a fragment left in `mk_dir` after
/// its header was removed is neither deleted nor checked.
pub fn run(config: &MkToolConfig, root: &Path) -> MkToolResult<Vec<GeneratedFile>> {
    let table = config.feature_table();
    let mk_dir = config.mk_dir(root);
    discover_headers(config, root)?
        .iter()
        .map(|header| generate_fragment(&table, header, &mk_dir, &config.mk_ext))
        .collect()
}
