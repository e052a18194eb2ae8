//! Segmenting source lines into chapters and verses
//!
//!     The source is loosely structured typeset text. Every line is classified
//!     (see [`patterns`]) and fed through a small state machine that tracks the
//!     chapter in effect and the verse currently being accumulated.
//!
//!     Classification priority:
//!         1. chapter header      `(N) [Sura ]Name (Translation)` or `(N) Sura Name`
//!         2. revelation place    `(offenbart zu Makka)`
//!         3. verse count         `7 Āyāt`
//!         4. verse start         `C:V - text` or `C:V-W - text`
//!         5. continuation        anything else
//!
//!     Revelation and verse-count lines are only honoured between a header and
//!     the first verse that follows it. Elsewhere they are ordinary text.
//!
//!     The parser is permissive. Mismatches and stray lines become
//!     [`Diagnostic`]s; nothing here fails.

pub mod patterns;

use crate::canon;
use crate::diagnostics::{Diagnostic, Diagnostics, SourcePos};
use crate::record::VerseKey;
use crate::source::{lines_from_str, SourceLine};
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub use patterns::{LineKind, LinePatterns, ParseOptions};

/// Chapter header together with the metadata lines that followed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterHeader {
    pub number: u16,
    pub name: String,
    pub translation: Option<String>,
    pub revelation: Option<String>,
    pub expected_verses: Option<u16>,
}

/// Accumulated commentary of one verse (or verse range)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVerse {
    pub key: VerseKey,
    /// Last verse of a range; equals `key.verse` for single verses
    pub last_verse: u16,
    /// Commentary lines as found, blank lines marking paragraph breaks
    pub lines: Vec<String>,
    pub origin: SourcePos,
}

impl RawVerse {
    /// Every verse key covered, in order
    pub fn keys(&self) -> impl Iterator<Item = VerseKey> + '_ {
        (self.key.verse..=self.last_verse).map(move |verse| VerseKey::new(self.key.chapter, verse))
    }

    pub fn is_range(&self) -> bool {
        self.last_verse > self.key.verse
    }
}

/// Everything parsed for one chapter number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChapter {
    pub number: u16,
    pub header: Option<ChapterHeader>,
    pub introduction: Vec<String>,
    pub verses: Vec<RawVerse>,
}

impl ParsedChapter {
    fn new(number: u16) -> Self {
        Self {
            number,
            header: None,
            introduction: Vec::new(),
            verses: Vec::new(),
        }
    }

    /// Number of verse records this chapter expands to
    pub fn record_count(&self) -> usize {
        self.verses.iter().map(|v| v.keys().count()).sum()
    }

    fn distinct_verses(&self) -> BTreeSet<u16> {
        self.verses.iter().flat_map(|v| v.keys()).map(|k| k.verse).collect()
    }
}

/// Parser output: chapters keyed by number plus the findings
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCorpus {
    pub chapters: BTreeMap<u16, ParsedChapter>,
    pub diagnostics: Diagnostics,
}

impl ParsedCorpus {
    pub fn chapter(&self, number: u16) -> Option<&ParsedChapter> {
        self.chapters.get(&number)
    }

    pub fn record_count(&self) -> usize {
        self.chapters.values().map(ParsedChapter::record_count).sum()
    }
}

/// Line-oriented tafsir parser
#[derive(Debug, Clone)]
pub struct Parser {
    patterns: LinePatterns,
    keep_introduction: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(&ParseOptions::default())
    }
}

impl Parser {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            patterns: LinePatterns::new(options),
            keep_introduction: options.keep_introduction,
        }
    }

    /// Parse source lines in order
    pub fn parse<'a, I>(&self, lines: I) -> ParsedCorpus
    where
        I: IntoIterator<Item = &'a SourceLine>,
    {
        let mut state = ParseState::new(self);
        for line in lines {
            state.feed(line);
        }
        state.finish()
    }

    /// Parse an in-memory text, attributing lines to `file`
    pub fn parse_str(&self, file: &str, content: &str) -> ParsedCorpus {
        let lines = lines_from_str(file, content);
        self.parse(&lines)
    }
}

struct ParseState<'p> {
    parser: &'p Parser,
    chapters: BTreeMap<u16, ParsedChapter>,
    current_chapter: Option<u16>,
    open: Option<RawVerse>,
    metadata_expected: bool,
    seen: HashSet<VerseKey>,
    diagnostics: Diagnostics,
}

impl<'p> ParseState<'p> {
    fn new(parser: &'p Parser) -> Self {
        Self {
            parser,
            chapters: BTreeMap::new(),
            current_chapter: None,
            open: None,
            metadata_expected: false,
            seen: HashSet::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn feed(&mut self, line: &SourceLine) {
        let text = line.text.trim();
        match self.parser.patterns.classify(text) {
            LineKind::Blank => self.append_break(),
            LineKind::ChapterHeader {
                number,
                name,
                translation,
            } => {
                self.close_verse();
                self.start_chapter(number, name, translation, &line.origin);
            }
            LineKind::Revelation { place } if self.metadata_expected => {
                if !self.set_revelation(place) {
                    self.append_text(text, &line.origin);
                }
            }
            LineKind::VerseCount { count } if self.metadata_expected => {
                if !self.set_expected_verses(count) {
                    self.append_text(text, &line.origin);
                }
            }
            LineKind::VerseStart {
                chapter,
                first,
                last,
                text,
            } => {
                self.close_verse();
                self.open_verse(chapter, first, last, text, &line.origin);
            }
            LineKind::PageNumber => self.append_break(),
            LineKind::RunningHeader => {}
            LineKind::Revelation { .. } | LineKind::VerseCount { .. } | LineKind::Text => {
                self.append_text(text, &line.origin)
            }
        }
    }

    fn start_chapter(
        &mut self,
        number: u16,
        name: &str,
        translation: Option<&str>,
        origin: &SourcePos,
    ) {
        self.current_chapter = Some(number);
        self.metadata_expected = true;

        let chapter = self
            .chapters
            .entry(number)
            .or_insert_with(|| ParsedChapter::new(number));

        if chapter.header.is_some() {
            self.diagnostics.push(Diagnostic::DuplicateHeader {
                origin: origin.clone(),
                chapter: number,
            });
            return;
        }

        match translation {
            Some(t) => tracing::info!("Found chapter {number}: {name} ({t})"),
            None => tracing::info!("Found chapter {number}: {name}"),
        }
        chapter.header = Some(ChapterHeader {
            number,
            name: name.to_string(),
            translation: translation.map(str::to_string),
            revelation: None,
            expected_verses: None,
        });
    }

    fn current_header(&mut self) -> Option<&mut ChapterHeader> {
        let number = self.current_chapter?;
        self.chapters.get_mut(&number)?.header.as_mut()
    }

    fn set_revelation(&mut self, place: &str) -> bool {
        match self.current_header() {
            Some(header) if header.revelation.is_none() => {
                header.revelation = Some(place.to_string());
                true
            }
            _ => false,
        }
    }

    fn set_expected_verses(&mut self, count: u16) -> bool {
        match self.current_header() {
            Some(header) if header.expected_verses.is_none() => {
                header.expected_verses = Some(count);
                true
            }
            _ => false,
        }
    }

    fn open_verse(
        &mut self,
        chapter: u16,
        first: u16,
        last: Option<u16>,
        text: &str,
        origin: &SourcePos,
    ) {
        self.metadata_expected = false;
        let key = VerseKey::new(chapter, first);

        if let Some(current) = self.current_chapter {
            if current != chapter {
                self.diagnostics.push(Diagnostic::ChapterMismatch {
                    origin: origin.clone(),
                    verse_key: key.to_string(),
                    current_chapter: current,
                });
            }
        }

        let last_verse = match last {
            Some(last) if last < first => {
                self.diagnostics.push(Diagnostic::MalformedRange {
                    origin: origin.clone(),
                    text: format!("{chapter}:{first}-{last}"),
                });
                first
            }
            Some(last) => last,
            None => first,
        };

        if let Some(canonical) = canon::verse_count(chapter) {
            if last_verse > canonical {
                let verse_key = if last_verse > first {
                    format!("{chapter}:{first}-{last_verse}")
                } else {
                    key.to_string()
                };
                self.diagnostics.push(Diagnostic::VerseOutOfRange {
                    origin: origin.clone(),
                    verse_key,
                    canonical,
                });
            }
        }

        let verse = RawVerse {
            key,
            last_verse,
            lines: if text.is_empty() {
                Vec::new()
            } else {
                vec![text.to_string()]
            },
            origin: origin.clone(),
        };

        for covered in verse.keys() {
            if !self.seen.insert(covered) {
                self.diagnostics.push(Diagnostic::DuplicateVerse {
                    origin: origin.clone(),
                    verse_key: covered.to_string(),
                });
            }
        }

        self.open = Some(verse);
    }

    fn append_break(&mut self) {
        if let Some(verse) = self.open.as_mut() {
            if verse.lines.last().is_some_and(|l| !l.is_empty()) {
                verse.lines.push(String::new());
            }
        } else if self.collecting_introduction() {
            if let Some(chapter) = self.current_chapter.and_then(|n| self.chapters.get_mut(&n)) {
                if chapter.introduction.last().is_some_and(|l| !l.is_empty()) {
                    chapter.introduction.push(String::new());
                }
            }
        }
    }

    fn append_text(&mut self, text: &str, origin: &SourcePos) {
        if let Some(verse) = self.open.as_mut() {
            verse.lines.push(text.to_string());
            return;
        }

        if self.collecting_introduction() {
            if let Some(chapter) = self.current_chapter.and_then(|n| self.chapters.get_mut(&n)) {
                chapter.introduction.push(text.to_string());
                return;
            }
        }

        self.diagnostics.push(Diagnostic::MalformedLine {
            origin: origin.clone(),
            text: text.to_string(),
        });
    }

    fn collecting_introduction(&self) -> bool {
        self.parser.keep_introduction && self.metadata_expected && self.current_chapter.is_some()
    }

    fn close_verse(&mut self) {
        if let Some(mut verse) = self.open.take() {
            while verse.lines.last().is_some_and(|l| l.is_empty()) {
                verse.lines.pop();
            }
            self.chapters
                .entry(verse.key.chapter)
                .or_insert_with(|| ParsedChapter::new(verse.key.chapter))
                .verses
                .push(verse);
        }
    }

    fn finish(mut self) -> ParsedCorpus {
        self.close_verse();

        for chapter in self.chapters.values_mut() {
            while chapter.introduction.last().is_some_and(|l| l.is_empty()) {
                chapter.introduction.pop();
            }
        }

        for chapter in self.chapters.values() {
            let Some(expected) = chapter.header.as_ref().and_then(|h| h.expected_verses) else {
                continue;
            };
            let found = chapter.distinct_verses().len();
            if found != usize::from(expected) {
                self.diagnostics.push(Diagnostic::VerseCountMismatch {
                    chapter: chapter.number,
                    expected,
                    found,
                });
            }
        }

        debug_assert!(self.chapters.keys().all(|&n| canon::is_chapter(n)));

        ParsedCorpus {
            chapters: self.chapters,
            diagnostics: self.diagnostics,
        }
    }
}
