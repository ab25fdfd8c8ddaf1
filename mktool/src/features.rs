// Licensed under the Apache-2.0 license

//! Declarative mapping from hardware feature macros to Makefile lines.

use serde::Deserialize;

/// One row of the feature table: a token and the lines it emits.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FeatureRule {
    /// Substring whose presence in a header line selects this rule.
    pub token: String,
    /// Makefile lines written, in order, when the rule fires.
    pub lines: Vec<String>,
}

impl FeatureRule {
    pub fn new(token: &str, lines: &[&str]) -> Self {
        Self {
            token: token.to_string(),
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered feature table. Rules are tried in order and the first rule whose
/// token occurs in a line wins; later rules are not tested for that line.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FeatureTable {
    rules: Vec<FeatureRule>,
}

impl FeatureTable {
    pub fn new(rules: Vec<FeatureRule>) -> Self {
        Self { rules }
    }

    /// The table used by the firmware build.
    pub fn builtin() -> Self {
        Self::new(vec![
            FeatureRule::new("HW_MCU_STM32F405", &["HWMCU = STM32F405"]),
            FeatureRule::new("HW_MCU_STM32F722", &["HWMCU = STM32F722"]),
            FeatureRule::new("HW_HAVE_PART_DRV8303", &["INCLUDE_HAL_DRV = hal/drv.o"]),
            FeatureRule::new("HW_HAVE_PART_DRV8305", &["INCLUDE_HAL_DRV = hal/drv.o"]),
            FeatureRule::new(
                "HW_HAVE_USB_OTG_FS",
                &[
                    "INCLUDE_HAL_USB = hal/usb.o",
                    "INCLUDE_CHERRY = cherry/usb_dc_dwc2.o \\",
                    "                 cherry/usbd_cdc.o \\",
                    "                 cherry/usbd_core.o",
                ],
            ),
            FeatureRule::new(
                "HW_HAVE_NETWORK_EPCAN",
                &["INCLUDE_HAL_CAN = hal/can.o", "INCLUDE_EPCAN = epcan.o"],
            ),
            FeatureRule::new(
                "HW_HAVE_NETWORK_DRONECAN",
                &[
                    "INCLUDE_HAL_CAN = hal/can.o",
                    "INCLUDE_LIBCANARD = libcanard/canard.o",
                    "INCLUDE_CAN = dronecan.o",
                ],
            ),
        ])
    }

    /// Returns the first rule whose token is a substring of `line`.
    pub fn lookup(&self, line: &str) -> Option<&FeatureRule> {
        self.rules.iter().find(|rule| line.contains(rule.token.as_str()))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.token.as_str())
    }

    pub fn rules(&self) -> &[FeatureRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for FeatureTable {
    fn default() -> Self {
        Self::builtin()
    }
}
