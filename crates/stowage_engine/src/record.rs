//! Flat persisted form of a process aggregator.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Separator between output names in [`ProcessRecord::dumped_outputs`].
pub const OUTPUT_SEPARATOR: char = ',';

/// Persisted state of one process aggregator.
///
/// Missing fields fall back to the same defaults a fresh aggregator has,
/// except the dumped outputs, which default to none.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ProcessRecord {
    /// Vessel-wide on/off switch.
    pub enabled: bool,
    /// Vessel-wide scaling factor applied to enabled capacity.
    pub enabled_factor: f64,
    /// Dumped output names joined with [`OUTPUT_SEPARATOR`].
    pub dumped_outputs: String,
}

impl Default for ProcessRecord {
    fn default() -> Self {
        Self {
            enabled: true,
            enabled_factor: 1.0,
            dumped_outputs: String::new(),
        }
    }
}

impl ProcessRecord {
    /// Returns the dumped output names, in stored order.
    #[must_use]
    pub fn dumped_output_names(&self) -> Vec<String> {
        split_outputs(&self.dumped_outputs)
    }
}

/// Joins output names into the persisted list form.
#[must_use]
pub fn join_outputs(outputs: &[String]) -> String {
    outputs.join(&OUTPUT_SEPARATOR.to_string())
}

/// Splits the persisted list form, trimming whitespace and dropping empty names.
#[must_use]
pub fn split_outputs(joined: &str) -> Vec<String> {
    joined
        .split(OUTPUT_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
