//! JSON output.
//!
//! Writes one array file per chapter (`de_tafsir_surah_<N>.json`, all 114 of
//! them, empty chapters as `[]`) plus the combined file with the corpus
//! metadata. Output is pretty-printed UTF-8 with a trailing newline, so two
//! runs with the same timestamp produce identical bytes.

use crate::canon;
use crate::corpus::{Corpus, CorpusMetadata};
use crate::error::TafsirError;
use crate::record::VerseRecord;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Output file naming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Chapter files are `<chapter_file_prefix><N>.json`
    pub chapter_file_prefix: String,
    /// Name of the combined file
    pub complete_file: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            chapter_file_prefix: "de_tafsir_surah_".to_string(),
            complete_file: "de_tafsir_complete.json".to_string(),
        }
    }
}

impl EmitOptions {
    pub fn chapter_file_name(&self, chapter: u16) -> String {
        format!("{}{chapter}.json", self.chapter_file_prefix)
    }

    pub fn chapter_path(&self, dir: &Path, chapter: u16) -> PathBuf {
        dir.join(self.chapter_file_name(chapter))
    }

    pub fn complete_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.complete_file)
    }
}

// Borrowed counterpart of `CompleteDocument`, avoids cloning every record.
#[derive(Serialize)]
struct CompleteView<'a> {
    verses: Vec<&'a VerseRecord>,
    metadata: &'a CorpusMetadata,
}

/// Serialize a value the way every output file is written
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, TafsirError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Write all chapter files and the combined file into `dir`
///
/// Returns the written paths, chapter files first.
///
/// # Errors
///
/// [`TafsirError::OutputWrite`] when the directory cannot be created or a
/// file cannot be written. Files written before the failure stay on disk.
pub fn emit(corpus: &Corpus, dir: &Path, options: &EmitOptions) -> Result<Vec<PathBuf>, TafsirError> {
    fs::create_dir_all(dir).map_err(|err| TafsirError::output_write(dir, err))?;

    let mut written = Vec::with_capacity(usize::from(canon::CHAPTER_COUNT) + 1);
    for chapter in corpus.chapters() {
        let path = options.chapter_path(dir, chapter.number);
        write_file(&path, &to_json(&chapter.verses)?)?;
        tracing::debug!(
            "Wrote {} verses to {}",
            chapter.verses.len(),
            path.display()
        );
        written.push(path);
    }

    let view = CompleteView {
        verses: corpus.verses().collect(),
        metadata: &corpus.metadata,
    };
    let path = options.complete_path(dir);
    write_file(&path, &to_json(&view)?)?;
    tracing::info!(
        "Wrote {} verses to {}",
        corpus.metadata.total_verses,
        path.display()
    );
    written.push(path);

    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<(), TafsirError> {
    fs::write(path, content).map_err(|err| TafsirError::output_write(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CompleteDocument;
    use crate::html::HtmlOptions;
    use crate::parser::Parser;
    use crate::record::RecordTemplate;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn corpus(text: &str) -> Corpus {
        let parsed = Parser::default().parse_str("t.txt", text);
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Corpus::assemble(&parsed, &RecordTemplate::default(), &HtmlOptions::default(), at).0
    }

    #[test]
    fn writes_all_chapter_files_and_complete_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let corpus = corpus("(1) Al-Fatiha (Die Eröffnung)\n1:1 - a\n1:2 - b\n");

        let written = emit(&corpus, &out, &EmitOptions::default()).unwrap();
        assert_eq!(written.len(), 115);
        assert!(out.join("de_tafsir_surah_1.json").is_file());
        assert!(out.join("de_tafsir_surah_114.json").is_file());

        let empty = fs::read_to_string(out.join("de_tafsir_surah_2.json")).unwrap();
        assert_eq!(empty, "[]\n");

        let complete = fs::read_to_string(out.join("de_tafsir_complete.json")).unwrap();
        let document: CompleteDocument = serde_json::from_str(&complete).unwrap();
        assert_eq!(document.verses.len(), 2);
        assert_eq!(document.metadata.total_verses, 2);
        assert_eq!(document.metadata, corpus.metadata);
    }

    #[test]
    fn non_ascii_is_written_unescaped() {
        let dir = tempdir().unwrap();
        let corpus = corpus("(1) Al-Fātiḥa (Die Eröffnung)\n1:1 - Barmherzigen\n");
        emit(&corpus, dir.path(), &EmitOptions::default()).unwrap();

        let json = fs::read_to_string(dir.path().join("de_tafsir_surah_1.json")).unwrap();
        assert!(json.contains("Al-Fātiḥa"));
        assert!(json.contains("Tafsīr Al-Qur'ān Al-Karīm"));
        assert!(json.ends_with("]\n"));
    }

    #[test]
    fn custom_file_names() {
        let dir = tempdir().unwrap();
        let options = EmitOptions {
            chapter_file_prefix: "sura_".to_string(),
            complete_file: "all.json".to_string(),
        };
        emit(&corpus("1:1 - a\n"), dir.path(), &options).unwrap();
        assert!(dir.path().join("sura_1.json").is_file());
        assert!(dir.path().join("all.json").is_file());
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = emit(&corpus("1:1 - a\n"), &blocker.join("out"), &EmitOptions::default())
            .unwrap_err();
        assert!(matches!(err, TafsirError::OutputWrite { .. }));
    }
}
