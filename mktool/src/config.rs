// Licensed under the Apache-2.0 license

//! Input and output locations for the generator passes.
//!
//! [`MkToolConfig`] externalizes the fixed source layout of the firmware
//! tree. Every path is relative to a source root supplied at run time. The
//! defaults reproduce the layout the firmware build expects, so an absent
//! configuration file changes nothing.
//!
//! # Example
//!
//! ```
//! use pmc_mktool::config::{ListingOrder, MkToolConfig};
//!
//! let config = MkToolConfig::default()
//!     .with_shell_dirs(&["./", "apps/"])
//!     .with_listing_order(ListingOrder::Native);
//! assert_eq!(config.shell_dirs.len(), 2);
//!
//! let config: MkToolConfig = toml::from_str(r#"regfile = "src/regfile.c""#).unwrap();
//! assert_eq!(config.regdefs_output.to_str(), Some("regdefs.h"));
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MkToolError, MkToolResult};
use crate::features::FeatureTable;

/// File name picked up from the source root when no configuration is given.
pub const DEFAULT_CONFIG_FILE: &str = "mktool.toml";

/// Order in which files of one directory are visited.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingOrder {
    /// Byte-wise lexicographic by file name. Reproducible on every platform.
    #[default]
    Sorted,
    /// Whatever order the platform's directory listing yields.
    Native,
}

/// A source file whose commands are only compiled in when a feature is enabled.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Subsystem {
    /// File name suffix identifying the subsystem source, e.g. `epcan.c`.
    pub file: String,
    /// Feature macro used for the `#ifdef` guard.
    pub feature: String,
}

impl Subsystem {
    pub fn new(file: &str, feature: &str) -> Self {
        Self {
            file: file.to_string(),
            feature: feature.to_string(),
        }
    }

    pub fn open_guard(&self) -> String {
        format!("#ifdef {}", self.feature)
    }

    pub fn close_guard(&self) -> String {
        format!("#endif /* {} */", self.feature)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MkToolConfig {
    /// Directory holding one header per hardware unit.
    pub hw_dir: PathBuf,
    /// Extension of hardware headers.
    pub hw_ext: String,
    /// Directory receiving the Makefile fragments.
    pub mk_dir: PathBuf,
    /// Extension of Makefile fragments.
    pub mk_ext: String,

    /// Directories scanned for command registrations, in output order.
    pub shell_dirs: Vec<PathBuf>,
    /// Extension of scanned source files.
    pub shell_ext: String,
    /// Aggregated command header.
    pub shell_output: PathBuf,
    /// Sources wrapped in a feature guard.
    pub subsystems: Vec<Subsystem>,

    /// Register definition source.
    pub regfile: PathBuf,
    /// Register ID header.
    pub regdefs_output: PathBuf,

    pub listing_order: ListingOrder,

    /// Replaces the built-in feature table when present.
    pub features: Option<FeatureTable>,
}

impl Default for MkToolConfig {
    fn default() -> Self {
        Self {
            hw_dir: PathBuf::from("hal/hw"),
            hw_ext: "h".to_string(),
            mk_dir: PathBuf::from("hal/mk"),
            mk_ext: "d".to_string(),
            shell_dirs: vec![
                PathBuf::from("./"),
                PathBuf::from("apps/"),
                PathBuf::from("hal/"),
            ],
            shell_ext: "c".to_string(),
            shell_output: PathBuf::from("shdefs.h"),
            subsystems: vec![Subsystem::new("epcan.c", "HW_HAVE_NETWORK_EPCAN")],
            regfile: PathBuf::from("regfile.c"),
            regdefs_output: PathBuf::from("regdefs.h"),
            listing_order: ListingOrder::Sorted,
            features: None,
        }
    }
}

impl MkToolConfig {
    /// Load a configuration file. Keys that are absent keep their defaults.
    pub fn load(path: &Path) -> MkToolResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| MkToolError::from_io(path, e))?;
        toml::from_str(&text).map_err(|e| MkToolError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `path` if given, else `<root>/mktool.toml` if it exists, else the defaults.
    pub fn load_or_default(root: &Path, path: Option<&Path>) -> MkToolResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let implicit = root.join(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    log::debug!("Using configuration {}", implicit.display());
                    Self::load(&implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn with_shell_dirs(mut self, dirs: &[&str]) -> Self {
        self.shell_dirs = dirs.iter().map(|dir| PathBuf::from(*dir)).collect();
        self
    }

    pub fn with_subsystem(mut self, file: &str, feature: &str) -> Self {
        self.subsystems.push(Subsystem::new(file, feature));
        self
    }

    pub fn with_listing_order(mut self, order: ListingOrder) -> Self {
        self.listing_order = order;
        self
    }

    pub fn with_features(mut self, features: FeatureTable) -> Self {
        self.features = Some(features);
        self
    }

    /// The feature table in effect.
    pub fn feature_table(&self) -> FeatureTable {
        self.features.clone().unwrap_or_default()
    }

    pub fn hw_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.hw_dir)
    }

    pub fn mk_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.mk_dir)
    }

    pub fn shell_dirs(&self, root: &Path) -> Vec<PathBuf> {
        self.shell_dirs.iter().map(|dir| root.join(dir)).collect()
    }

    pub fn shell_output(&self, root: &Path) -> PathBuf {
        root.join(&self.shell_output)
    }

    pub fn regfile(&self, root: &Path) -> PathBuf {
        root.join(&self.regfile)
    }

    pub fn regdefs_output(&self, root: &Path) -> PathBuf {
        root.join(&self.regdefs_output)
    }
}
