// Licensed under the Apache-2.0 license

use clap::{Parser, Subcommand};
use log::LevelFilter;
use pmc_mktool::Pass;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

mod mkdefs;

#[derive(Parser)]
#[command(
    name = "xtask",
    author,
    version,
    about = "Generate build files for the PMC firmware",
    long_about = None
)]
struct Xtask {
    /// Firmware source root
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Configuration file (defaults to <ROOT>/mktool.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verify generated files are up to date instead of writing them
    #[arg(long, global = true)]
    check: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    xtask: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Makefile fragments from hardware headers
    HwDefs,
    /// Generate the aggregated shell command header
    ShDefs,
    /// Generate the register ID header
    RegDefs,
    /// Run every pass (the default)
    All,
}

impl Commands {
    fn passes(&self) -> &'static [Pass] {
        match self {
            Commands::HwDefs => &[Pass::HwDefs],
            Commands::ShDefs => &[Pass::ShDefs],
            Commands::RegDefs => &[Pass::RegDefs],
            Commands::All => &Pass::ALL,
        }
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Xtask::parse();
    let _ = SimpleLogger::new()
        .with_level(log_level(cli.verbose))
        .init();

    let passes = cli.xtask.as_ref().unwrap_or(&Commands::All).passes();
    let result = mkdefs::generate(&cli.root, cli.config.as_deref(), passes, cli.check);
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Xtask::command().debug_assert();
    }

    #[test]
    fn test_default_is_all() {
        let cli = Xtask::parse_from(["xtask", "--root", "src"]);
        assert!(cli.xtask.is_none());
        assert_eq!(cli.root, PathBuf::from("src"));
        assert_eq!(Commands::All.passes(), &Pass::ALL);
    }

    #[test]
    fn test_subcommand_with_global_flags() {
        let cli = Xtask::parse_from(["xtask", "reg-defs", "--check", "-vv"]);
        assert!(matches!(cli.xtask, Some(Commands::RegDefs)));
        assert!(cli.check);
        assert_eq!(log_level(cli.verbose), LevelFilter::Debug);
    }
}
