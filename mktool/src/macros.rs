// Licensed under the Apache-2.0 license

//! Fixed-pattern matching of function-style macro calls.
//!
//! This is a regular-language matcher, not a C parser. The supported call
//! shapes are the whole contract:
//!
//! | Macro     | Call shape             | Arguments taken from           |
//! |-----------|------------------------|--------------------------------|
//! | `SH_DEF`  | `^\s*SH_DEF\(.+\)`     | first `\(\w+\)` in the line    |
//! | `REG_DEF` | `^\s*REG_DEF\(.+\)`    | first `\([\w.]+?,\s*[\w.]*?,`  |
//!
//! A line that does not have the call shape is not a macro call at all. A
//! line that has the shape but whose arguments do not match the argument
//! pattern is a [`MkToolError::MalformedMacro`]; callers skip such lines.
//! Calls spanning several lines are never recognized.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{MkToolError, MkToolResult};

/// Name of the shell command registration macro.
pub const SH_DEF: &str = "SH_DEF";

/// Name of the register declaration macro.
pub const REG_DEF: &str = "REG_DEF";

static COMMAND_CALL: LazyLock<MacroCall> = LazyLock::new(|| {
    MacroCall::new(SH_DEF, r"\(\w+\)", &['(', ')']).expect("command call pattern is valid")
});

static REGISTER_CALL: LazyLock<MacroCall> = LazyLock::new(|| {
    MacroCall::new(REG_DEF, r"\([\w.]+?,\s*[\w.]*?,", &['(', ','])
        .expect("register call pattern is valid")
});

/// Compiled matcher for one macro name.
#[derive(Clone, Debug)]
pub struct MacroCall {
    name: String,
    /// Line-start call shape test.
    shape: Regex,
    /// Argument extractor, searched anywhere in the line.
    args: Regex,
    /// Characters removed from the extracted text, in addition to whitespace.
    strip: &'static [char],
}

impl MacroCall {
    pub fn new(name: &str, args: &str, strip: &'static [char]) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.to_string(),
            shape: Regex::new(&format!(r"^\s*{}\(.+\)", regex::escape(name)))?,
            args: Regex::new(args)?,
            strip,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if `line` starts (after leading whitespace) with a call of this macro.
    pub fn matches(&self, line: &str) -> bool {
        self.shape.is_match(line)
    }

    /// Extracts the argument text of a call on line number `line_no` (1-based).
    pub fn extract(&self, line_no: usize, line: &str) -> MkToolResult<String> {
        let found = self
            .args
            .find(line)
            .ok_or_else(|| MkToolError::MalformedMacro {
                line: line_no,
                text: line.trim_end().to_string(),
            })?;
        Ok(found
            .as_str()
            .chars()
            .filter(|c| !c.is_whitespace() && !self.strip.contains(c))
            .collect())
    }
}

/// Matcher for `SH_DEF(name)` command registrations.
pub fn command_call() -> &'static MacroCall {
    &COMMAND_CALL
}

/// Matcher for `REG_DEF(object, member, ...)` register declarations.
pub fn register_call() -> &'static MacroCall {
    &REGISTER_CALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_shape() {
        let call = command_call();
        assert!(call.matches("SH_DEF(ap_version)"));
        assert!(call.matches("\t  SH_DEF(ap_version)\n"));
        assert!(call.matches("SH_DEF(ap_reboot) /* trailing */"));
        assert!(!call.matches("SH_DEF()"));
        assert!(!call.matches("SH_DEF(ap_version"));
        assert!(!call.matches("#define SH_DEF(name) { #name, &name},"));
        assert!(!call.matches("void SH_DEF(name);"));
        assert!(!call.matches("XSH_DEF(name)"));
    }

    #[test]
    fn test_command_extract() {
        let call = command_call();
        assert_eq!(call.extract(1, "SH_DEF(ap_version)").unwrap(), "ap_version");
        assert_eq!(call.extract(1, "  SH_DEF(pm_probe_spinup)\n").unwrap(), "pm_probe_spinup");
    }

    #[test]
    fn test_command_malformed() {
        let err = command_call().extract(7, "SH_DEF( spaced name )").unwrap_err();
        match err {
            MkToolError::MalformedMacro { line, text } => {
                assert_eq!(line, 7);
                assert_eq!(text, "SH_DEF( spaced name )");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_register_extract_concatenates_first_two_arguments() {
        let call = register_call();
        let line =
            "\tREG_DEF(hal.PWM_frequency,,,\t\t\"Hz\",\t\"%1f\",\tREG_CONFIG, &reg_proc_PWM, NULL),";
        assert!(call.matches(line));
        assert_eq!(call.extract(1, line).unwrap(), "hal.PWM_frequency");

        let line = "\tREG_DEF(hal, .PPM_get_PERIOD,, \"us\", \"%2f\", REG_READ_ONLY, NULL, NULL),";
        assert_eq!(call.extract(1, line).unwrap(), "hal.PPM_get_PERIOD");

        assert_eq!(
            call.extract(1, "REG_DEF(motor.speed, float, 0)").unwrap(),
            "motor.speedfloat"
        );
    }

    #[test]
    fn test_register_malformed() {
        let call = register_call();
        assert!(call.matches("REG_DEF(single)"));
        assert!(call.extract(3, "REG_DEF(single)").is_err());
    }

    #[test]
    fn test_custom_name_is_escaped() {
        let call = MacroCall::new("A.B", r"\(\w+\)", &['(', ')']).unwrap();
        assert_eq!(call.name(), "A.B");
        assert!(call.matches("A.B(x)"));
        assert!(!call.matches("AxB(x)"));
    }
}
