//! Non-fatal irregularities found while converting
//!
//! Parsing is permissive: anything unexpected in the source is recorded here
//! and the run continues. Every diagnostic is logged at `warn` level when it
//! is recorded and aggregated into the end-of-run report.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Position of a line in the source parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePos {
    /// File name of the part (not the full path)
    pub file: String,
    /// 1-based line number within the part
    pub line: usize,
}

impl SourcePos {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single non-fatal finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Line matched no pattern while no verse was open; discarded
    MalformedLine { origin: SourcePos, text: String },
    /// Verse key disagrees with the chapter header in effect
    ChapterMismatch {
        origin: SourcePos,
        verse_key: String,
        current_chapter: u16,
    },
    /// Header announced a verse count that differs from what was parsed
    VerseCountMismatch {
        chapter: u16,
        expected: u16,
        found: usize,
    },
    /// Verse commentary without any text
    EmptyCommentary { verse_key: String },
    /// No header and no verse for this chapter anywhere in the input
    MissingChapter { chapter: u16 },
    /// Header seen again for a chapter that is already known
    DuplicateHeader { origin: SourcePos, chapter: u16 },
    /// Verse key opened a second time
    DuplicateVerse { origin: SourcePos, verse_key: String },
    /// Verse range whose end precedes its start
    MalformedRange { origin: SourcePos, text: String },
    /// Gap in the numbered part files, `from..=to` absent
    MissingParts { from: u32, to: u32 },
    /// Verse number beyond the chapter's canonical verse count
    VerseOutOfRange {
        origin: SourcePos,
        verse_key: String,
        canonical: u16,
    },
    /// Part file exists but could not be read as UTF-8 text
    UnreadablePart { path: PathBuf, reason: String },
}

/// Discriminant of a [`Diagnostic`], used for summary counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    MalformedLine,
    ChapterMismatch,
    VerseCountMismatch,
    EmptyCommentary,
    MissingChapter,
    DuplicateHeader,
    DuplicateVerse,
    MalformedRange,
    MissingParts,
    VerseOutOfRange,
    UnreadablePart,
}

impl DiagnosticKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::MalformedLine => "malformed lines",
            DiagnosticKind::ChapterMismatch => "chapter mismatches",
            DiagnosticKind::VerseCountMismatch => "verse count mismatches",
            DiagnosticKind::EmptyCommentary => "empty commentaries",
            DiagnosticKind::MissingChapter => "missing chapters",
            DiagnosticKind::DuplicateHeader => "duplicate headers",
            DiagnosticKind::DuplicateVerse => "duplicate verses",
            DiagnosticKind::MalformedRange => "malformed ranges",
            DiagnosticKind::MissingParts => "part number gaps",
            DiagnosticKind::VerseOutOfRange => "verses out of range",
            DiagnosticKind::UnreadablePart => "unreadable parts",
        }
    }
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::MalformedLine { .. } => DiagnosticKind::MalformedLine,
            Diagnostic::ChapterMismatch { .. } => DiagnosticKind::ChapterMismatch,
            Diagnostic::VerseCountMismatch { .. } => DiagnosticKind::VerseCountMismatch,
            Diagnostic::EmptyCommentary { .. } => DiagnosticKind::EmptyCommentary,
            Diagnostic::MissingChapter { .. } => DiagnosticKind::MissingChapter,
            Diagnostic::DuplicateHeader { .. } => DiagnosticKind::DuplicateHeader,
            Diagnostic::DuplicateVerse { .. } => DiagnosticKind::DuplicateVerse,
            Diagnostic::MalformedRange { .. } => DiagnosticKind::MalformedRange,
            Diagnostic::MissingParts { .. } => DiagnosticKind::MissingParts,
            Diagnostic::VerseOutOfRange { .. } => DiagnosticKind::VerseOutOfRange,
            Diagnostic::UnreadablePart { .. } => DiagnosticKind::UnreadablePart,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedLine { origin, text } => {
                write!(f, "{origin}: line outside any verse discarded: {}", preview(text))
            }
            Diagnostic::ChapterMismatch {
                origin,
                verse_key,
                current_chapter,
            } => write!(
                f,
                "{origin}: verse {verse_key} appears under chapter {current_chapter}"
            ),
            Diagnostic::VerseCountMismatch {
                chapter,
                expected,
                found,
            } => write!(
                f,
                "chapter {chapter}: header announces {expected} verses, parsed {found}"
            ),
            Diagnostic::EmptyCommentary { verse_key } => {
                write!(f, "verse {verse_key} has no commentary text")
            }
            Diagnostic::MissingChapter { chapter } => {
                write!(f, "chapter {chapter} not found in input")
            }
            Diagnostic::DuplicateHeader { origin, chapter } => {
                write!(f, "{origin}: chapter {chapter} header repeated")
            }
            Diagnostic::DuplicateVerse { origin, verse_key } => {
                write!(f, "{origin}: verse {verse_key} already parsed")
            }
            Diagnostic::MalformedRange { origin, text } => {
                write!(f, "{origin}: verse range ends before it starts: {}", preview(text))
            }
            Diagnostic::MissingParts { from, to } if from == to => {
                write!(f, "part {from} is missing")
            }
            Diagnostic::MissingParts { from, to } => {
                write!(f, "parts {from} to {to} are missing")
            }
            Diagnostic::VerseOutOfRange {
                origin,
                verse_key,
                canonical,
            } => write!(
                f,
                "{origin}: verse {verse_key} exceeds the {canonical} verses of its chapter"
            ),
            Diagnostic::UnreadablePart { path, reason } => {
                write!(f, "skipping '{}': {reason}", path.display())
            }
        }
    }
}

fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 60;
    if text.chars().count() > MAX_CHARS {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{head}…")
    } else {
        text.to_string()
    }
}

/// Ordered collection of diagnostics for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind() == kind)
    }

    /// Number of diagnostics per kind, in a stable order
    pub fn counts(&self) -> BTreeMap<DiagnosticKind, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
