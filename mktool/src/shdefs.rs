// Licensed under the Apache-2.0 license

//! Command-Aggregation pass: collect every `SH_DEF(name)` into one header.
//!
//! Sources are visited directory by directory, in configured order. Sources
//! belonging to an optional subsystem are bracketed by `#ifdef FEATURE` and
//! `#endif /* FEATURE */`, even when they contribute no command.

use std::path::{Path, PathBuf};

use crate::config::{MkToolConfig, Subsystem};
use crate::error::MkToolResult;
use crate::macros::{command_call, SH_DEF};
use crate::output::{render_lines, GeneratedFile};
use crate::util::{list_files, read_source};

/// `SH_DEF(name)` lines for every command registered in `text`.
pub fn command_lines(text: &str) -> Vec<String> {
    let call = command_call();
    let mut lines = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if !call.matches(line) {
            continue;
        }
        match call.extract(idx + 1, line) {
            Ok(name) => lines.push(format!("{SH_DEF}({name})")),
            Err(e) => log::debug!("Skipping {e}"),
        }
    }
    lines
}

/// The subsystem `path` belongs to, if any.
pub fn subsystem_for<'a>(config: &'a MkToolConfig, path: &Path) -> Option<&'a Subsystem> {
    let name = path.to_string_lossy();
    config
        .subsystems
        .iter()
        .find(|subsystem| name.ends_with(subsystem.file.as_str()))
}

/// Candidate sources: directories in configured order, files in listing order.
pub fn discover_sources(config: &MkToolConfig, root: &Path) -> MkToolResult<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for dir in config.shell_dirs(root) {
        sources.extend(list_files(&dir, &config.shell_ext, config.listing_order)?);
    }
    Ok(sources)
}

/// Renders the whole aggregated header. Nothing is returned unless every
/// source could be read.
pub fn render(config: &MkToolConfig, root: &Path) -> MkToolResult<String> {
    let mut lines = Vec::new();
    for source in discover_sources(config, root)? {
        let text = read_source(&source)?;
        let commands = command_lines(&text);
        log::debug!("{}: {} commands", source.display(), commands.len());

        match subsystem_for(config, &source) {
            Some(subsystem) => {
                lines.push(subsystem.open_guard());
                lines.extend(commands);
                lines.push(subsystem.close_guard());
            }
            None => lines.extend(commands),
        }
    }
    Ok(render_lines(lines))
}

pub fn run(config: &MkToolConfig, root: &Path) -> MkToolResult<GeneratedFile> {
    Ok(GeneratedFile::new(
        config.shell_output(root),
        render(config, root)?,
    ))
}
