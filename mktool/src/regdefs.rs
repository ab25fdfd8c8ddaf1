// Licensed under the Apache-2.0 license

//! Register-ID pass: turn `REG_DEF` declarations into enumerator names.
//!
//! Every `REG_DEF(object, member, ...)` line in the register file becomes
//! `ID_<OBJECT><MEMBER>,` with dots replaced by underscores. The position of
//! an identifier in the output is its numeric value once the header is
//! included inside a C `enum`, so declarations are emitted strictly in file
//! order.
//!
//! Preprocessor directives are carried over only when they trail the last
//! emitted declaration closely. With `distance` counting lines since that
//! declaration, a directive is kept while `distance < DISTANCE_WINDOW`:
//!
//! ```text
//! line                          distance  emitted
//! #ifdef HW_HAVE_ANALOG_KNOB        10      -
//! REG_DEF(hal.ADC_knob_ratio,...)    -      ID_HAL_ADC_KNOB_RATIO,
//! #endif /* HW_HAVE_ANALOG_KNOB */   1      #endif /* HW_HAVE_ANALOG_KNOB */
//! <blank>                            2      -
//! #ifdef HW_HAVE_PART_DRV_XX         3      #ifdef HW_HAVE_PART_DRV_XX
//! ```

use std::path::Path;

use crate::config::MkToolConfig;
use crate::error::MkToolResult;
use crate::macros::register_call;
use crate::output::{render_lines, GeneratedFile};
use crate::util::read_source;

/// Starting distance; larger than the window so no leading directive is kept.
pub const DISTANCE_INIT: u32 = 10;

/// Directives are kept while the distance is below this value.
pub const DISTANCE_WINDOW: u32 = 4;

/// Prefix of every generated identifier.
pub const ID_PREFIX: &str = "ID_";

/// Enumerator line for the joined first two `REG_DEF` arguments.
pub fn register_ident(args: &str) -> String {
    format!("{ID_PREFIX}{},", args.replace('.', "_").to_uppercase())
}

/// State of one scan over a register file.
#[derive(Clone, Debug)]
pub struct RegisterScan {
    distance: u32,
    line_no: usize,
}

impl Default for RegisterScan {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterScan {
    pub fn new() -> Self {
        Self {
            distance: DISTANCE_INIT,
            line_no: 0,
        }
    }

    /// Lines examined since the last emitted declaration.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Processes the next input line and returns the output line, if any.
    pub fn feed(&mut self, line: &str) -> Option<String> {
        self.line_no += 1;
        let out = if line.starts_with('#') {
            (self.distance < DISTANCE_WINDOW).then(|| line.to_string())
        } else if register_call().matches(line) {
            match register_call().extract(self.line_no, line) {
                Ok(args) => {
                    self.distance = 0;
                    Some(register_ident(&args))
                }
                Err(e) => {
                    log::debug!("Skipping {e}");
                    None
                }
            }
        } else {
            None
        };
        self.distance = self.distance.saturating_add(1);
        out
    }
}

/// Output lines for a whole register file.
pub fn register_lines(text: &str) -> Vec<String> {
    let mut scan = RegisterScan::new();
    text.lines().filter_map(|line| scan.feed(line)).collect()
}

pub fn render(text: &str) -> String {
    render_lines(register_lines(text))
}

pub fn run(config: &MkToolConfig, root: &Path) -> MkToolResult<GeneratedFile> {
    let regfile = config.regfile(root);
    let text = read_source(&regfile)?;
    let file = GeneratedFile::new(config.regdefs_output(root), render(&text));
    log::debug!(
        "{}: {} output lines",
        regfile.display(),
        file.line_count()
    );
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_ident() {
        assert_eq!(register_ident("motor.speedfloat"), "ID_MOTOR_SPEEDFLOAT,");
        assert_eq!(register_ident("hal.PWM_frequency"), "ID_HAL_PWM_FREQUENCY,");
        assert_eq!(register_ident("null"), "ID_NULL,");
    }

    #[test]
    fn test_declaration_with_empty_second_argument() {
        let line = "\tREG_DEF(hal.PWM_frequency,,,\t\t\"Hz\",\t\"%1f\",\tREG_CONFIG, NULL, NULL),\n";
        assert_eq!(register_lines(line), vec!["ID_HAL_PWM_FREQUENCY,"]);
        assert_eq!(
            register_lines("REG_DEF(motor.speed, float, 0)"),
            vec!["ID_MOTOR_SPEEDFLOAT,"]
        );
    }

    #[test]
    fn test_leading_directives_dropped() {
        let text = "\
#include <stddef.h>
#define REG_DEF(l, e, i, u, f, m, p, t)\t{ #l #e \"\\0\" u, f, m, (void *) &l i, (void *) p, (void *) t}
#ifdef HW_HAVE_NETWORK_EPCAN
#endif /* HW_HAVE_NETWORK_EPCAN */
\tREG_DEF(null,,,\t\t\t\"\",\t\"%i\",\tREG_READ_ONLY, NULL, NULL),
";
        assert_eq!(register_lines(text), vec!["ID_NULL,"]);
    }

    #[test]
    fn test_window_boundary() {
        let mut scan = RegisterScan::new();
        assert_eq!(scan.distance(), DISTANCE_INIT);
        assert_eq!(scan.feed("#endif"), None);
        assert_eq!(scan.feed("REG_DEF(a.b,,,)").as_deref(), Some("ID_A_B,"));
        assert_eq!(scan.distance(), 1);
        assert_eq!(scan.feed("").as_deref(), None);
        assert_eq!(scan.feed("").as_deref(), None);
        // Third line after the declaration: distance 3, still kept.
        assert_eq!(scan.feed("#endif").as_deref(), Some("#endif"));
        // Fourth line after: distance 4, dropped.
        assert_eq!(scan.feed("#endif"), None);
    }

    #[test]
    fn test_endif_two_lines_after_kept_six_lines_after_dropped() {
        let text = "\
#ifdef HW_HAVE_ANALOG_KNOB
\tREG_DEF(hal.ADC_knob_ratio,,,\t\t\"\",\t\"%4e\",\tREG_CONFIG, &reg_proc_ADC, NULL),

#endif /* HW_HAVE_ANALOG_KNOB */
\tREG_DEF(hal.DPS_mode,,,\t\t\"\",\t\"%i\", REG_CONFIG, &reg_proc_DPS, &reg_format_enum),
a
b
c
d
e
#endif /* HW_HAVE_PART_DRV_XX */
";
        assert_eq!(
            register_lines(text),
            vec![
                "ID_HAL_ADC_KNOB_RATIO,",
                "#endif /* HW_HAVE_ANALOG_KNOB */",
                "ID_HAL_DPS_MODE,",
            ]
        );
    }

    #[test]
    fn test_unrelated_region_dropped() {
        let text = "\
REG_DEF(pm.freq_hz,,,\t\"Hz\",\t\"%1f\",\tREG_READ_ONLY, NULL, NULL),
static int
reg_proc_fn(void)
{
#ifdef HW_HAVE_NTC_MOTOR
\treturn 1;
#endif /* HW_HAVE_NTC_MOTOR */
}
REG_DEF(pm.dT,,,\t\"s\",\t\"%4e\",\tREG_READ_ONLY, NULL, NULL),
";
        assert_eq!(register_lines(text), vec!["ID_PM_FREQ_HZ,", "ID_PM_DT,"]);
    }

    #[test]
    fn test_indented_directive_is_not_a_directive() {
        let text = "REG_DEF(pm.a,,,)\n  #endif\n";
        assert_eq!(register_lines(text), vec!["ID_PM_A,"]);
    }

    #[test]
    fn test_malformed_declaration_does_not_reset_window() {
        let text = "REG_DEF(pm.a,,,)\nx\nx\nREG_DEF(broken)\n#endif\n";
        assert_eq!(register_lines(text), vec!["ID_PM_A,"]);
    }

    #[test]
    fn test_order_preserved() {
        let text = "REG_DEF(z.z,,,)\nREG_DEF(a.a,,,)\n#if 0\nREG_DEF(m.m,,,)\n";
        assert_eq!(
            register_lines(text),
            vec!["ID_Z_Z,", "ID_A_A,", "#if 0", "ID_M_M,"]
        );
    }
}
