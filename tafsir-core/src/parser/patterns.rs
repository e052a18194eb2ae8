//! Line classification
//!
//! Classification is stateless: [`LinePatterns::classify`] reports what a line
//! looks like, in priority order. Whether a metadata line is honoured depends on
//! parser state and is decided in [`super::Parser`].

use crate::canon;
use once_cell::sync::Lazy;
use regex::Regex;

// (2) Sura Al-Baqara (Die Kuh)........ 5
// A header needs the `Sura` keyword or a translation; `(2) Zweitens ...` is text.
static CHAPTER_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\((\d{1,3})\)\s+(Sura\s+)?(.+?)(?:\s+\(([^()]+)\))?\s*(?:\.{2,}.*)?$").unwrap()
});

// 2:255 - text, 114:1-6 - text
static VERSE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3}):(\d{1,3})(?:[-–](\d{1,3}))?\s*[-–]\s*(.*)$").unwrap());

static PAGE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Knobs for recognising metadata lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Words introducing the revelation place, e.g. `offenbart zu` in `(offenbart zu Makka)`
    pub revelation_prefixes: Vec<String>,
    /// Units following the verse count, e.g. `Āyāt` in `7 Āyāt`
    pub verse_count_units: Vec<String>,
    /// Book title repeated on every typeset page; such lines are dropped
    pub running_header: Option<String>,
    /// Keep text between a chapter's metadata and its first verse as introduction
    pub keep_introduction: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            revelation_prefixes: vec!["offenbart zu".to_string(), "revealed in".to_string()],
            verse_count_units: vec!["Āyāt".to_string(), "Āya".to_string(), "verses".to_string()],
            running_header: Some("Tafsīr Al-Qur'ān Al-Karīm".to_string()),
            keep_introduction: false,
        }
    }
}

/// What a single trimmed line looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    ChapterHeader {
        number: u16,
        name: &'a str,
        translation: Option<&'a str>,
    },
    Revelation {
        place: &'a str,
    },
    VerseCount {
        count: u16,
    },
    VerseStart {
        chapter: u16,
        first: u16,
        last: Option<u16>,
        text: &'a str,
    },
    /// Page number of the typeset source
    PageNumber,
    /// Repeated book title of the typeset source
    RunningHeader,
    Text,
}

/// Compiled patterns for one set of [`ParseOptions`]
#[derive(Debug, Clone)]
pub struct LinePatterns {
    revelation: Option<Regex>,
    verse_count: Option<Regex>,
    running_header: Option<String>,
}

impl LinePatterns {
    pub fn new(options: &ParseOptions) -> Self {
        let revelation = alternation(&options.revelation_prefixes)
            .and_then(|alt| Regex::new(&format!(r"^\((?:{alt})\s+([^()]+?)\)\s*$")).ok());
        let verse_count = alternation(&options.verse_count_units)
            .and_then(|alt| Regex::new(&format!(r"^(\d{{1,3}})\s+(?:{alt})(?:\W.*)?$")).ok());
        let running_header = options
            .running_header
            .as_ref()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());

        Self {
            revelation,
            verse_count,
            running_header,
        }
    }

    /// Classify a trimmed line
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if line.is_empty() {
            return LineKind::Blank;
        }
        if let Some(kind) = chapter_header(line) {
            return kind;
        }
        if let Some(caps) = self.revelation.as_ref().and_then(|re| re.captures(line)) {
            if let Some(place) = caps.get(1) {
                return LineKind::Revelation {
                    place: place.as_str().trim(),
                };
            }
        }
        if let Some(count) = self
            .verse_count
            .as_ref()
            .and_then(|re| re.captures(line))
            .and_then(|caps| caps.get(1)?.as_str().parse().ok())
        {
            return LineKind::VerseCount { count };
        }
        if let Some(kind) = verse_start(line) {
            return kind;
        }
        if PAGE_NUMBER.is_match(line) {
            return LineKind::PageNumber;
        }
        if self.is_running_header(line) {
            return LineKind::RunningHeader;
        }
        LineKind::Text
    }

    fn is_running_header(&self, line: &str) -> bool {
        self.running_header
            .as_deref()
            .is_some_and(|header| line.starts_with(header))
    }
}

/// Whether a line is only a page number
pub fn is_page_number(line: &str) -> bool {
    PAGE_NUMBER.is_match(line)
}

fn alternation(words: &[String]) -> Option<String> {
    let escaped: Vec<String> = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect();
    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}

fn chapter_header(line: &str) -> Option<LineKind<'_>> {
    let caps = CHAPTER_HEADER.captures(line)?;
    let number: u16 = caps.get(1)?.as_str().parse().ok()?;
    if !canon::is_chapter(number) {
        return None;
    }
    let name = caps.get(3)?.as_str().trim_end_matches(['.', ' ']);
    if name.is_empty() {
        return None;
    }
    let translation = caps
        .get(4)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty());
    if translation.is_none() && caps.get(2).is_none() {
        return None;
    }
    Some(LineKind::ChapterHeader {
        number,
        name,
        translation,
    })
}

fn verse_start(line: &str) -> Option<LineKind<'_>> {
    let caps = VERSE_START.captures(line)?;
    let chapter: u16 = caps.get(1)?.as_str().parse().ok()?;
    let first: u16 = caps.get(2)?.as_str().parse().ok()?;
    if !canon::is_chapter(chapter) || first == 0 {
        return None;
    }
    let last = caps.get(3).and_then(|m| m.as_str().parse().ok());
    let text = caps.get(4).map(|m| m.as_str().trim()).unwrap_or("");
    Some(LineKind::VerseStart {
        chapter,
        first,
        last,
        text,
    })
}
