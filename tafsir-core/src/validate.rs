//! Audit of an emitted output directory
//!
//! Reads the chapter files back and checks them against the canonical verse
//! counts. Only the chapter files are inspected; the combined file is
//! derived from the same records.

use crate::canon;
use crate::emitter::EmitOptions;
use crate::error::TafsirError;
use crate::record::VerseRecord;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const RULE: &str = "----------------------------------------------------------------------";

/// Findings of [`validate_directory`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Chapter file absent or holding no records
    pub missing_chapters: Vec<u16>,
    /// Verse numbers absent from an existing chapter file
    pub missing_verses: BTreeMap<u16, Vec<u16>>,
    /// Chapters whose first record has no `<h2>` heading
    pub chapters_without_heading: Vec<u16>,
    /// Files that could not be read or decoded
    pub issues: Vec<String>,
}

impl ValidationReport {
    pub fn is_complete(&self) -> bool {
        self.missing_chapters.is_empty() && self.missing_verses.is_empty() && self.issues.is_empty()
    }

    pub fn missing_verse_count(&self) -> usize {
        self.missing_verses.values().map(Vec::len).sum()
    }

    /// Verses present, counting the canonical total minus everything missing
    pub fn present_verse_count(&self) -> usize {
        let absent_in_missing_chapters: usize = self
            .missing_chapters
            .iter()
            .filter_map(|&c| canon::verse_count(c))
            .map(usize::from)
            .sum();
        (canon::TOTAL_VERSES as usize)
            .saturating_sub(absent_in_missing_chapters)
            .saturating_sub(self.missing_verse_count())
    }

    /// Short summary for the terminal
    pub fn summary_lines(&self) -> Vec<String> {
        let chapters = usize::from(canon::CHAPTER_COUNT);
        let mut lines = vec![
            format!(
                "Chapters present:  {}/{chapters}",
                chapters - self.missing_chapters.len()
            ),
            format!(
                "Verses present:    {}/{}",
                self.present_verse_count(),
                canon::TOTAL_VERSES
            ),
            format!("Without heading:   {}", self.chapters_without_heading.len()),
        ];
        if !self.issues.is_empty() {
            lines.push(format!("Other issues:      {}", self.issues.len()));
        }
        lines
    }

    /// Full plain-text report
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "TAFSIR JSON VALIDATION REPORT");
        let _ = writeln!(out, "{}", RULE.replace('-', "="));
        let _ = writeln!(out);

        for line in self.summary_lines() {
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(out);

        if !self.missing_chapters.is_empty() {
            let _ = writeln!(out, "MISSING CHAPTERS ({}):", self.missing_chapters.len());
            let _ = writeln!(out, "{RULE}");
            for &chapter in &self.missing_chapters {
                let expected = canon::verse_count(chapter).unwrap_or(0);
                let _ = writeln!(out, "  Chapter {chapter:3}: {expected:3} verses expected");
            }
            let _ = writeln!(out);
        }

        if !self.missing_verses.is_empty() {
            let _ = writeln!(
                out,
                "MISSING VERSES ({} chapters affected):",
                self.missing_verses.len()
            );
            let _ = writeln!(out, "{RULE}");
            for (chapter, verses) in &self.missing_verses {
                let list: Vec<String> = verses.iter().map(u16::to_string).collect();
                let _ = writeln!(out, "  Chapter {chapter:3}: {:3} verses missing", verses.len());
                let _ = writeln!(out, "               Verses: {}", list.join(", "));
            }
            let _ = writeln!(out);
        }

        if !self.chapters_without_heading.is_empty() {
            let _ = writeln!(
                out,
                "CHAPTERS WITHOUT HEADING ({}):",
                self.chapters_without_heading.len()
            );
            let _ = writeln!(out, "{RULE}");
            for chapter in &self.chapters_without_heading {
                let _ = writeln!(out, "  Chapter {chapter}");
            }
            let _ = writeln!(out);
        }

        if !self.issues.is_empty() {
            let _ = writeln!(out, "OTHER ISSUES ({}):", self.issues.len());
            let _ = writeln!(out, "{RULE}");
            for issue in &self.issues {
                let _ = writeln!(out, "  {issue}");
            }
            let _ = writeln!(out);
        }

        if self.is_complete() {
            let _ = writeln!(out, "All checks passed.");
        }
        out
    }
}

/// Check the chapter files in `dir`
///
/// # Errors
///
/// [`TafsirError::MissingInput`] when `dir` is not a directory. Problems with
/// individual files are collected in the report.
pub fn validate_directory(
    dir: &Path,
    options: &EmitOptions,
) -> Result<ValidationReport, TafsirError> {
    if !dir.is_dir() {
        return Err(TafsirError::MissingInput {
            path: dir.to_path_buf(),
            expected: format!(
                "a directory containing {}<N>.json",
                options.chapter_file_prefix
            ),
        });
    }

    let mut report = ValidationReport::default();

    for chapter in canon::chapters() {
        let path = options.chapter_path(dir, chapter);
        if !path.is_file() {
            report.missing_chapters.push(chapter);
            continue;
        }

        let records = match read_chapter(&path) {
            Ok(records) => records,
            Err(reason) => {
                report.issues.push(format!("Chapter {chapter}: {reason}"));
                continue;
            }
        };

        let Some(first) = records.first() else {
            report.missing_chapters.push(chapter);
            continue;
        };
        if !first.text.contains("<h2>") {
            report.chapters_without_heading.push(chapter);
        }

        let present: BTreeSet<u16> = records
            .iter()
            .filter_map(VerseRecord::verse_key)
            .filter(|key| key.chapter == chapter)
            .map(|key| key.verse)
            .collect();
        let expected = canon::verse_count(chapter).unwrap_or(0);
        let missing: Vec<u16> = (1..=expected).filter(|v| !present.contains(v)).collect();
        if !missing.is_empty() {
            tracing::debug!("Chapter {chapter}: {} verses missing", missing.len());
            report.missing_verses.insert(chapter, missing);
        }
    }

    tracing::info!(
        "Validated {}: {} chapters missing, {} verses missing",
        dir.display(),
        report.missing_chapters.len(),
        report.missing_verse_count()
    );
    Ok(report)
}

fn read_chapter(path: &Path) -> Result<Vec<VerseRecord>, String> {
    let content = fs::read_to_string(path).map_err(|err| format!("cannot read: {err}"))?;
    serde_json::from_str(&content).map_err(|err| format!("invalid JSON: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordTemplate, VerseKey};
    use tempfile::tempdir;

    fn write_chapter(dir: &Path, chapter: u16, verses: &[u16], heading: bool) {
        let template = RecordTemplate::default();
        let records: Vec<VerseRecord> = verses
            .iter()
            .enumerate()
            .map(|(idx, &verse)| {
                let text = if heading && idx == 0 {
                    "<h2>Sura X</h2>\n<p>t</p>"
                } else {
                    "<p>t</p>"
                };
                template.record(VerseKey::new(chapter, verse), text.to_string(), "t")
            })
            .collect();
        let path = EmitOptions::default().chapter_path(dir, chapter);
        fs::write(path, serde_json::to_string(&records).unwrap()).unwrap();
    }

    fn write_all_complete(dir: &Path) {
        for chapter in canon::chapters() {
            let count = canon::verse_count(chapter).unwrap();
            let verses: Vec<u16> = (1..=count).collect();
            write_chapter(dir, chapter, &verses, true);
        }
    }

    #[test]
    fn complete_directory_passes() {
        let dir = tempdir().unwrap();
        write_all_complete(dir.path());

        let report = validate_directory(dir.path(), &EmitOptions::default()).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.present_verse_count(), 6236);
        assert!(report.render_text().contains("All checks passed."));
    }

    #[test]
    fn reports_missing_chapters_verses_and_headings() {
        let dir = tempdir().unwrap();
        write_all_complete(dir.path());
        fs::remove_file(dir.path().join("de_tafsir_surah_114.json")).unwrap();
        fs::write(dir.path().join("de_tafsir_surah_113.json"), "[]").unwrap();
        write_chapter(dir.path(), 1, &[1, 2, 3, 5, 6, 7], false);

        let report = validate_directory(dir.path(), &EmitOptions::default()).unwrap();
        assert!(!report.is_complete());
        assert_eq!(report.missing_chapters, vec![113, 114]);
        assert_eq!(report.missing_verses.get(&1), Some(&vec![4]));
        assert_eq!(report.chapters_without_heading, vec![1]);
        assert_eq!(report.present_verse_count(), 6236 - 5 - 6 - 1);

        let text = report.render_text();
        assert!(text.contains("MISSING CHAPTERS (2):"));
        assert!(text.contains("  Chapter 114:   6 verses expected"));
        assert!(text.contains("               Verses: 4"));
        assert!(!text.contains("All checks passed."));
    }

    #[test]
    fn undecodable_file_is_an_issue() {
        let dir = tempdir().unwrap();
        write_all_complete(dir.path());
        fs::write(dir.path().join("de_tafsir_surah_2.json"), "{ not json").unwrap();

        let report = validate_directory(dir.path(), &EmitOptions::default()).unwrap();
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].starts_with("Chapter 2: invalid JSON"));
        assert!(!report.is_complete());
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let err = validate_directory(&dir.path().join("nope"), &EmitOptions::default())
            .unwrap_err();
        assert!(matches!(err, TafsirError::MissingInput { .. }));
    }
}
