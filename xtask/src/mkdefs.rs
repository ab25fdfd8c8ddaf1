// Licensed under the Apache-2.0 license

//! Run the generator passes over a firmware source tree and report.

use anyhow::{bail, Context, Result};
use pmc_mktool::output::relative_to;
use pmc_mktool::{MkToolConfig, MkToolError, Pass};
use std::path::Path;

/// Generates (or with `check`, verifies) the outputs of `passes`, in order.
///
/// A pass that cannot read its inputs stops the run. In check mode every
/// stale file is reported before failing.
pub(crate) fn generate(
    root: &Path,
    config: Option<&Path>,
    passes: &[Pass],
    check: bool,
) -> Result<()> {
    let config = MkToolConfig::load_or_default(root, config)
        .with_context(|| format!("loading configuration for {}", root.display()))?;

    let mut generated = 0;
    let mut stale = Vec::new();

    for &pass in passes {
        println!("Running {pass} in {}", root.display());
        let files = pass
            .generate(&config, root)
            .with_context(|| format!("{pass} failed"))?;

        for file in &files {
            let name = relative_to(&file.path, root);
            match file.emit(check) {
                Ok(()) if check => println!("  ✓ {} is up to date", name.display()),
                Ok(()) => println!(
                    "  ✓ Generated {} ({} lines)",
                    name.display(),
                    file.line_count()
                ),
                Err(MkToolError::OutOfDate { .. }) => {
                    println!("  ✗ {} is out of date", name.display());
                    stale.push(name.to_path_buf());
                }
                Err(e) => return Err(e).with_context(|| format!("{pass} failed")),
            }
        }
        generated += files.len();
    }

    println!("\n=== Generation Summary ===");
    println!("Files: {generated}");
    if !stale.is_empty() {
        println!("\nOut of date ({}):", stale.len());
        for path in &stale {
            println!("  ✗ {}", path.display());
        }
        bail!("Generated files are out of date; rerun without --check");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("hal/hw")).unwrap();
        fs::create_dir_all(root.join("apps")).unwrap();
        fs::write(root.join("hal/hw/KLEN1.h"), "#define HW_MCU_STM32F405\n").unwrap();
        fs::write(root.join("ap.c"), "SH_DEF(ap_version)\n").unwrap();
        let regfile = "\tREG_DEF(null,,,\t\"\", \"%i\", 0, NULL, NULL),\n";
        fs::write(root.join("regfile.c"), regfile).unwrap();
        dir
    }

    #[test]
    fn test_generate_then_check() {
        let dir = tree();
        let root = dir.path();
        generate(root, None, &Pass::ALL, false).unwrap();
        assert_eq!(
            fs::read_to_string(root.join("hal/mk/KLEN1.d")).unwrap(),
            "HWMCU = STM32F405\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("shdefs.h")).unwrap(),
            "SH_DEF(ap_version)\n"
        );
        assert_eq!(fs::read_to_string(root.join("regdefs.h")).unwrap(), "ID_NULL,\n");
        generate(root, None, &Pass::ALL, true).unwrap();
    }

    #[test]
    fn test_check_reports_stale() {
        let dir = tree();
        let root = dir.path();
        let err = generate(root, None, &[Pass::ShDefs], true).unwrap_err();
        assert!(err.to_string().contains("out of date"));
        assert!(!root.join("shdefs.h").exists());
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tree();
        let root = dir.path();
        fs::remove_file(root.join("regfile.c")).unwrap();
        let err = generate(root, None, &[Pass::RegDefs], false).unwrap_err();
        assert!(format!("{err:#}").contains("not found"));
    }
}
