//! Property-based tests for header and verse recognition

use crate::common::fixed_time;
use proptest::prelude::*;
use tafsir_core::source::lines_from_str;
use tafsir_core::{convert_lines, ConvertOptions, Parser};

/// Property: a header line names its chapter and keeps name and translation verbatim
#[test]
fn proptest_header_names_are_verbatim() {
    proptest!(|(
        chapter in 1u16..=114,
        name in "[A-Z][a-z]{1,10}(-[A-Z][a-z]{1,8})?",
        translation in "Die [A-Z][a-z]{2,10}",
    )| {
        prop_assume!(name != "Sura");
        let line = format!("({chapter}) {name} ({translation})");
        let parsed = Parser::default().parse_str("p.txt", &line);

        let parsed_chapter = parsed.chapter(chapter);
        prop_assert!(parsed_chapter.is_some());
        let header = parsed_chapter.and_then(|c| c.header.as_ref());
        prop_assert_eq!(header.map(|h| h.name.as_str()), Some(name.as_str()));
        prop_assert_eq!(
            header.and_then(|h| h.translation.as_deref()),
            Some(translation.as_str())
        );
    });
}

/// Property: a verse line yields one record keyed by its chapter and verse
#[test]
fn proptest_verse_line_keys() {
    proptest!(|(
        chapter in 1u16..=114,
        verse in 1u16..=286,
        text in "[A-Za-z ]{0,40}",
    )| {
        let lines = lines_from_str("p.txt", &format!("{chapter}:{verse} - {text}"));
        let (corpus, _) = convert_lines(&lines, &ConvertOptions::default(), fixed_time());

        let records: Vec<_> = corpus.verses().collect();
        prop_assert_eq!(records.len(), 1);
        let expected = format!("{chapter}:{verse}");
        prop_assert_eq!(&records[0].verse_key, &expected);
        prop_assert_eq!(&records[0].verses, &vec![expected.clone()]);
        prop_assert_eq!(corpus.total_verses(), 1);
    });
}

/// Property: a range `C:V-W` expands to W - V + 1 records sharing one text
#[test]
fn proptest_ranges_expand() {
    proptest!(|(chapter in 1u16..=114, first in 1u16..=200, span in 0u16..=10)| {
        let last = first + span;
        let lines = lines_from_str("p.txt", &format!("{chapter}:{first}-{last} - gemeinsam"));
        let (corpus, _) = convert_lines(&lines, &ConvertOptions::default(), fixed_time());

        let records: Vec<_> = corpus.verses().collect();
        prop_assert_eq!(records.len(), usize::from(span) + 1);
        prop_assert!(records.iter().all(|r| r.text == "<p>gemeinsam</p>"));
        prop_assert_eq!(&records[records.len() - 1].verse_key, &format!("{chapter}:{last}"));
    });
}
