//! Conversion of the sample part files, checked on the written JSON

use crate::common::{convert_fixtures, fixed_time, later_time};
use insta::assert_snapshot;
use std::fs;
use std::path::Path;
use tafsir_core::emitter::to_json;
use tafsir_core::{CompleteDocument, DiagnosticKind, EmitOptions, VerseRecord};
use tempfile::tempdir;

fn read_chapter(dir: &Path, chapter: u16) -> Vec<VerseRecord> {
    let path = EmitOptions::default().chapter_path(dir, chapter);
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn read_complete(dir: &Path) -> CompleteDocument {
    let path = EmitOptions::default().complete_path(dir);
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_two_chapters_yield_all_chapter_files() {
    let out = tempdir().unwrap();
    let report = convert_fixtures(out.path(), fixed_time());

    assert_eq!(report.parts_read, 2);
    assert_eq!(report.chapters_seen, 2);
    assert_eq!(report.files_written.len(), 115);

    for chapter in 3..=114u16 {
        let path = EmitOptions::default().chapter_path(out.path(), chapter);
        assert_eq!(fs::read_to_string(path).unwrap(), "[]\n", "chapter {chapter}");
    }
    assert_eq!(read_chapter(out.path(), 1).len(), 7);
    assert_eq!(read_chapter(out.path(), 2).len(), 5);
}

#[test]
fn test_chapter_lengths_sum_to_total() {
    let out = tempdir().unwrap();
    convert_fixtures(out.path(), fixed_time());

    let sum: usize = (1..=114u16).map(|c| read_chapter(out.path(), c).len()).sum();
    let complete = read_complete(out.path());
    assert_eq!(sum, complete.metadata.total_verses);
    assert_eq!(complete.verses.len(), complete.metadata.total_verses);
    assert_eq!(complete.metadata.total_chapters, 2);
    assert_eq!(complete.metadata.missing_chapters.len(), 112);
    assert!(complete.metadata.empty_verses.is_empty());
}

#[test]
fn test_al_fatiha_first_verse() {
    let out = tempdir().unwrap();
    convert_fixtures(out.path(), fixed_time());
    let verses = read_chapter(out.path(), 1);

    assert_eq!(verses[0].verse_key, "1:1");
    assert_eq!(verses[0].verses, vec!["1:1".to_string()]);
    assert_eq!(verses[0].key, "de_tafsir-al-azhar");
    assert_eq!(verses[0].timestamp, "2024-05-01T12:00:00Z");
    assert_snapshot!(verses[0].text.as_str(), @r###"
    <h2>Sura Al-Fatiha (Die Eröffnung)</h2>
    <p><strong>"Im Namen Allahs..."</strong> Die Basmala steht am Anfang jeder Sura außer At-Tauba.</p>
    "###);
}

#[test]
fn test_paragraphs_and_terms_in_later_verse() {
    let out = tempdir().unwrap();
    convert_fixtures(out.path(), fixed_time());
    let verses = read_chapter(out.path(), 1);

    assert!(!verses[1].text.contains("<h2>"));
    assert_snapshot!(verses[1].text.as_str(), @r###"
    <p><strong>"Alles Lob gebührt Allah, dem Herrn der Welten."</strong> Mit <em>al-ḥamd</em> ist das umfassende Lob gemeint.</p>
    <p>Es gebührt Ihm allein.</p>
    "###);
    // page number after 1:4 must not leak into the text
    assert_eq!(
        verses[3].text,
        "<p><strong>\"dem Herrscher am Tag des Gerichts.\"</strong></p>"
    );
}

#[test]
fn test_running_header_and_range_in_second_part() {
    let out = tempdir().unwrap();
    convert_fixtures(out.path(), fixed_time());
    let verses = read_chapter(out.path(), 2);

    let keys: Vec<&str> = verses.iter().map(|v| v.verse_key.as_str()).collect();
    assert_eq!(keys, vec!["2:1", "2:2", "2:3", "2:4", "2:5"]);
    assert!(verses[0].text.starts_with("<h2>Sura Al-Baqara (Die Kuh)</h2>"));
    assert_eq!(
        verses[1].text,
        "<p><strong>\"Dies ist das Buch, an dem kein Zweifel ist;\"</strong> eine Rechtleitung für die Gottesfürchtigen.</p>"
    );
    assert_eq!(verses[2].text, verses[3].text);
    assert!(verses[2].text.contains("<em>Muttaqūn</em>"));
}

#[test]
fn test_diagnostics_of_sample_run() {
    let out = tempdir().unwrap();
    let report = convert_fixtures(out.path(), fixed_time());

    assert_eq!(report.warning_count(DiagnosticKind::MissingChapter), 112);
    assert_eq!(report.warning_count(DiagnosticKind::VerseCountMismatch), 1);
    assert_eq!(report.warning_count(DiagnosticKind::MalformedLine), 0);
    assert_eq!(report.diagnostics.len(), 113);
}

#[test]
fn test_records_round_trip_byte_for_byte() {
    let out = tempdir().unwrap();
    convert_fixtures(out.path(), fixed_time());

    let path = EmitOptions::default().chapter_path(out.path(), 1);
    let written = fs::read_to_string(&path).unwrap();
    let records: Vec<VerseRecord> = serde_json::from_str(&written).unwrap();
    assert_eq!(to_json(&records).unwrap(), written);
}

#[test]
fn test_same_timestamp_gives_identical_output() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    convert_fixtures(first.path(), fixed_time());
    convert_fixtures(second.path(), fixed_time());

    for chapter in 1..=114u16 {
        let a = fs::read(EmitOptions::default().chapter_path(first.path(), chapter)).unwrap();
        let b = fs::read(EmitOptions::default().chapter_path(second.path(), chapter)).unwrap();
        assert_eq!(a, b, "chapter {chapter}");
    }
    let a = fs::read(EmitOptions::default().complete_path(first.path())).unwrap();
    let b = fs::read(EmitOptions::default().complete_path(second.path())).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_different_timestamp_changes_only_time_fields() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    convert_fixtures(first.path(), fixed_time());
    convert_fixtures(second.path(), later_time());

    let a = read_complete(first.path());
    let mut b = read_complete(second.path());
    assert_ne!(a, b);
    assert_eq!(b.metadata.generated_at, "2025-01-31T08:30:15Z");

    b.metadata.generated_at = a.metadata.generated_at.clone();
    for verse in &mut b.verses {
        verse.timestamp = a.metadata.generated_at.clone();
    }
    assert_eq!(a, b);
}
