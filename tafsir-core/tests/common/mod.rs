//! Shared helpers for integration tests

use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tafsir_core::{convert_directory, ConversionReport, ConvertOptions};

/// Directory holding the two sample part files (chapters 1 and 2)
pub fn source_fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("source")
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn later_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 31, 8, 30, 15).unwrap()
}

/// Convert the sample part files into `output`
pub fn convert_fixtures(output: &Path, at: DateTime<Utc>) -> ConversionReport {
    convert_directory(&source_fixtures(), output, &ConvertOptions::default(), at)
        .expect("fixtures convert")
}
