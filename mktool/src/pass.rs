// Licensed under the Apache-2.0 license

//! The three generator passes behind one entry point.
//!
//! Passes share no state and never write the same file, so any subset can
//! run in any order. The firmware build runs them in [`Pass::ALL`] order.

use std::fmt;
use std::path::Path;

use crate::config::MkToolConfig;
use crate::error::MkToolResult;
use crate::output::GeneratedFile;
use crate::{hwdefs, regdefs, shdefs};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Makefile fragments from hardware headers.
    HwDefs,
    /// Aggregated shell command header.
    ShDefs,
    /// Register ID header.
    RegDefs,
}

impl Pass {
    pub const ALL: [Pass; 3] = [Pass::HwDefs, Pass::ShDefs, Pass::RegDefs];

    pub fn name(self) -> &'static str {
        match self {
            Pass::HwDefs => "hw-defs",
            Pass::ShDefs => "sh-defs",
            Pass::RegDefs => "reg-defs",
        }
    }

    /// Renders every output of this pass without touching the disk.
    pub fn generate(self, config: &MkToolConfig, root: &Path) -> MkToolResult<Vec<GeneratedFile>> {
        log::debug!("Running {} in {}", self.name(), root.display());
        match self {
            Pass::HwDefs => hwdefs::run(config, root),
            Pass::ShDefs => Ok(vec![shdefs::run(config, root)?]),
            Pass::RegDefs => Ok(vec![regdefs::run(config, root)?]),
        }
    }

    /// Renders and then writes (or, with `check`, verifies) every output.
    /// Nothing is written unless rendering the whole pass succeeded.
    pub fn emit(
        self,
        config: &MkToolConfig,
        root: &Path,
        check: bool,
    ) -> MkToolResult<Vec<GeneratedFile>> {
        let files = self.generate(config, root)?;
        for file in &files {
            file.emit(check)?;
        }
        Ok(files)
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let names: Vec<_> = Pass::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["hw-defs", "sh-defs", "reg-defs"]);
    }

    #[test]
    fn test_missing_inputs_are_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = MkToolConfig::default();
        for pass in Pass::ALL {
            let err = pass.generate(&config, dir.path()).unwrap_err();
            assert!(err.is_not_found(), "{pass}: {err}");
        }
    }
}
