//! Parser behaviour on whole inputs

use crate::common::fixed_time;
use tafsir_core::source::lines_from_str;
use tafsir_core::{convert_lines, ConvertOptions, Diagnostic, DiagnosticKind, ParseOptions};

#[test]
fn test_line_before_first_verse_is_dropped_with_warning() {
    let lines = lines_from_str(
        "tafsir_al_quran.txt_1.txt",
        "Vorwort des Übersetzers.\n(1) Al-Fatiha (Die Eröffnung)\nEine lose Zeile.\n1:1 - \"Im Namen Allahs...\"\n",
    );
    let (corpus, diagnostics) = convert_lines(&lines, &ConvertOptions::default(), fixed_time());

    let malformed: Vec<&Diagnostic> = diagnostics.of_kind(DiagnosticKind::MalformedLine).collect();
    assert_eq!(malformed.len(), 2);
    assert_eq!(
        malformed[0].to_string(),
        "tafsir_al_quran.txt_1.txt:1: line outside any verse discarded: Vorwort des Übersetzers."
    );

    let verses = &corpus.chapter(1).unwrap().verses;
    assert_eq!(verses.len(), 1);
    assert!(!verses[0].text.contains("Vorwort"));
    assert!(!verses[0].text.contains("lose Zeile"));
}

#[test]
fn test_kept_introduction_precedes_first_commentary() {
    let options = ConvertOptions {
        parse: ParseOptions {
            keep_introduction: true,
            ..ParseOptions::default()
        },
        ..ConvertOptions::default()
    };
    let lines = lines_from_str(
        "t.txt",
        "(112) Al-Iḫlāṣ (Die Aufrichtigkeit)\nDiese Sura fasst den Tauḥīd zusammen.\n112:1 - \"Sag: Er ist Allah, ein Einziger,\"\n",
    );
    let (corpus, diagnostics) = convert_lines(&lines, &options, fixed_time());

    assert_eq!(diagnostics.of_kind(DiagnosticKind::MalformedLine).count(), 0);
    assert_eq!(
        corpus.chapter(112).unwrap().verses[0].text,
        "<h2>Sura Al-Iḫlāṣ (Die Aufrichtigkeit)</h2>\n\
         <p>Diese Sura fasst den <em>Tauḥīd</em> zusammen.</p>\n\
         <p><strong>\"Sag: Er ist Allah, ein Einziger,\"</strong></p>"
    );
}

#[test]
fn test_verses_keep_source_order_within_chapter() {
    let lines = lines_from_str("t.txt", "(3) Āl-ʿImrān (Die Sippe ʿImrāns)\n3:2 - b\n3:1 - a\n3:3 - c\n");
    let (corpus, _) = convert_lines(&lines, &ConvertOptions::default(), fixed_time());

    let keys: Vec<&str> = corpus
        .chapter(3)
        .unwrap()
        .verses
        .iter()
        .map(|v| v.verse_key.as_str())
        .collect();
    assert_eq!(keys, vec!["3:2", "3:1", "3:3"]);
    assert!(corpus.chapter(3).unwrap().verses[0].text.starts_with("<h2>"));
}

#[test]
fn test_every_record_belongs_to_its_chapter() {
    let lines = lines_from_str(
        "t.txt",
        "(1) Al-Fatiha (Die Eröffnung)\n1:1 - a\n2:5 - verirrt\n1:2 - b\n",
    );
    let (corpus, diagnostics) = convert_lines(&lines, &ConvertOptions::default(), fixed_time());

    for chapter in corpus.chapters() {
        for verse in &chapter.verses {
            assert_eq!(verse.verse_key().unwrap().chapter, chapter.number);
        }
    }
    assert_eq!(corpus.chapter(2).unwrap().verses.len(), 1);
    assert_eq!(
        diagnostics.of_kind(DiagnosticKind::ChapterMismatch).count(),
        1
    );
}
