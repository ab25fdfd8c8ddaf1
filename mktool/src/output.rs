// Licensed under the Apache-2.0 license

//! Generated files.
//!
//! Every pass renders its output completely in memory as a [`GeneratedFile`]
//! before anything touches the disk. Writing replaces the previous contents
//! wholesale, so two runs over unchanged inputs leave identical bytes behind.
//!
//! ```text
//! hal/hw/*.h  ── hwdefs  ──► hal/mk/<unit>.d
//! ./ apps/ hal/ ── shdefs ──► shdefs.h
//! regfile.c   ── regdefs ──► regdefs.h
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MkToolError, MkToolResult};

/// Rendered contents of one output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(path: PathBuf, contents: String) -> Self {
        Self { path, contents }
    }

    /// Builds a file from output lines, each terminated by a newline.
    pub fn from_lines<I, S>(path: PathBuf, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            path,
            contents: render_lines(lines),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.contents.lines().count()
    }

    /// Truncates and rewrites the file, creating parent directories as needed.
    pub fn write(&self) -> MkToolResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| MkToolError::from_io(parent, e))?;
        }
        fs::write(&self.path, &self.contents).map_err(|e| MkToolError::from_io(&self.path, e))?;
        log::info!(
            "Wrote {} ({} lines)",
            self.path.display(),
            self.line_count()
        );
        Ok(())
    }

    /// Returns true if the file on disk already holds exactly these contents.
    pub fn is_up_to_date(&self) -> bool {
        fs::read(&self.path)
            .map(|existing| existing == self.contents.as_bytes())
            .unwrap_or(false)
    }

    /// Fails with [`MkToolError::OutOfDate`] unless the file on disk is current.
    pub fn check(&self) -> MkToolResult<()> {
        if self.is_up_to_date() {
            log::debug!("{} is up to date", self.path.display());
            Ok(())
        } else {
            Err(MkToolError::OutOfDate {
                path: self.path.clone(),
            })
        }
    }

    /// Writes the file, or in check mode only verifies it.
    pub fn emit(&self, check: bool) -> MkToolResult<()> {
        if check {
            self.check()
        } else {
            self.write()
        }
    }
}

/// Joins output lines, terminating each with a newline.
pub fn render_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }
    contents
}

/// Display helper for summaries.
pub fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
