// Licensed under the Apache-2.0 license

//! Build-artifact generator for the PMC firmware tree.
//!
//! This crate scans the firmware sources for a handful of macro calls and
//! derives three kinds of build files from them:
//!
//! - `hal/mk/<unit>.d`: Makefile variables for each hardware unit, from the
//!   feature macros in `hal/hw/<unit>.h` ([`hwdefs`]).
//! - `shdefs.h`: every `SH_DEF(name)` shell command found in the sources
//!   ([`shdefs`]).
//! - `regdefs.h`: one `ID_<NAME>,` enumerator per `REG_DEF` declaration in
//!   `regfile.c`, in declaration order ([`regdefs`]).
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use pmc_mktool::{MkToolConfig, Pass};
//!
//! let root = Path::new("src");
//! let config = MkToolConfig::load_or_default(root, None).unwrap();
//! for pass in Pass::ALL {
//!     pass.emit(&config, root, false).unwrap();
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`macros`]: fixed-pattern matcher for `SH_DEF` and `REG_DEF` calls
//! - [`features`]: the feature-token table
//! - [`config`]: source layout ([`MkToolConfig`])
//! - [`output`]: rendered files, write and check mode
//! - [`pass`]: the passes behind one entry point

pub mod config;
pub mod error;
pub mod features;
pub mod hwdefs;
pub mod macros;
pub mod output;
pub mod pass;
pub mod regdefs;
pub mod shdefs;
pub mod util;

pub use config::{ListingOrder, MkToolConfig, Subsystem};
pub use error::{MkToolError, MkToolResult};
pub use features::{FeatureRule, FeatureTable};
pub use output::GeneratedFile;
pub use pass::Pass;
