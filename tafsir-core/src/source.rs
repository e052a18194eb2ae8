//! Input discovery and reading
//!
//! The source text arrives as numbered part files (`tafsir_al_quran.txt_1.txt`,
//! `tafsir_al_quran.txt_2.txt`, ...). Parts are read in ascending part number,
//! so `_10` follows `_9` rather than `_1`.

use crate::diagnostics::{Diagnostic, Diagnostics, SourcePos};
use crate::error::TafsirError;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// How part files are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Everything before the part number, e.g. `tafsir_al_quran.txt_`
    pub file_prefix: String,
    /// Extension without the leading dot
    pub file_extension: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            file_prefix: "tafsir_al_quran.txt_".to_string(),
            file_extension: "txt".to_string(),
        }
    }
}

impl SourceOptions {
    /// Human readable naming convention, used in error messages
    pub fn expected_pattern(&self) -> String {
        format!("{}<N>.{}", self.file_prefix, self.file_extension)
    }

    fn file_regex(&self) -> Regex {
        let pattern = format!(
            r"^{}(\d+)\.{}$",
            regex::escape(&self.file_prefix),
            regex::escape(&self.file_extension)
        );
        Regex::new(&pattern).expect("escaped file pattern is valid")
    }
}

/// One numbered input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePart {
    pub number: u32,
    pub path: PathBuf,
}

impl SourcePart {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A raw line together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub origin: SourcePos,
    pub text: String,
}

impl SourceLine {
    pub fn new(origin: SourcePos, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
        }
    }
}

/// Find the part files in `dir`, ordered by part number
///
/// Fails when the directory is missing or holds no file following the naming
/// convention. Gaps in the numbering are reported as diagnostics.
pub fn discover_parts(
    dir: &Path,
    options: &SourceOptions,
) -> Result<(Vec<SourcePart>, Diagnostics), TafsirError> {
    if !dir.is_dir() {
        return Err(TafsirError::MissingInput {
            path: dir.to_path_buf(),
            expected: format!("a directory containing {}", options.expected_pattern()),
        });
    }

    let entries = fs::read_dir(dir).map_err(|source| TafsirError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let re = options.file_regex();
    let mut parts = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|source| TafsirError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(number) = re
            .captures(name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
        else {
            continue;
        };
        parts.push(SourcePart { number, path });
    }

    if parts.is_empty() {
        return Err(TafsirError::MissingInput {
            path: dir.to_path_buf(),
            expected: format!("files named {}", options.expected_pattern()),
        });
    }

    parts.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.path.cmp(&b.path)));

    let mut diagnostics = Diagnostics::new();
    for pair in parts.windows(2) {
        let (from, to) = (pair[0].number + 1, pair[1].number);
        if from < to {
            diagnostics.push(Diagnostic::MissingParts { from, to: to - 1 });
        }
    }

    tracing::info!("Found {} part files in {}", parts.len(), dir.display());
    Ok((parts, diagnostics))
}

/// Read all parts in order, splitting them into lines
///
/// A part that cannot be read is skipped and reported.
pub fn read_lines(parts: &[SourcePart]) -> (Vec<SourceLine>, Diagnostics) {
    let mut lines = Vec::new();
    let mut diagnostics = Diagnostics::new();

    for part in parts {
        let content = match fs::read_to_string(&part.path) {
            Ok(content) => content,
            Err(err) => {
                diagnostics.push(Diagnostic::UnreadablePart {
                    path: part.path.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let file_name = part.file_name();
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        let before = lines.len();
        for (idx, text) in content.lines().enumerate() {
            lines.push(SourceLine::new(SourcePos::new(file_name.clone(), idx + 1), text));
        }
        tracing::debug!("Read {} lines from {}", lines.len() - before, file_name);
    }

    (lines, diagnostics)
}

/// Split an in-memory text into source lines attributed to `file`
pub fn lines_from_str(file: &str, content: &str) -> Vec<SourceLine> {
    content
        .lines()
        .enumerate()
        .map(|(idx, text)| SourceLine::new(SourcePos::new(file, idx + 1), text))
        .collect()
}
