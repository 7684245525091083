use crate::constants::OUTPUT_EXTENSION;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn format_elapsed(duration: Duration) -> String {
    format!("{:.2} secs", round_two_decimals(duration.as_secs_f64()))
}

pub fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Output path used when none is given: the source path with an `.xml` extension.
pub fn default_output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}
