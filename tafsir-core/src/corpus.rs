//! Immutable output model assembled from a parse
//!
//! [`Corpus::assemble`] renders every raw verse once and freezes the result:
//! one [`ChapterAggregate`] per chapter number 1..=114 (possibly empty) plus
//! the [`CorpusMetadata`] block of the combined file.

use crate::canon;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::html::{self, HtmlOptions};
use crate::parser::{ChapterHeader, ParsedCorpus};
use crate::record::{RecordTemplate, VerseRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Records of one chapter in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterAggregate {
    pub number: u16,
    pub header: Option<ChapterHeader>,
    pub verses: Vec<VerseRecord>,
}

impl ChapterAggregate {
    fn empty(number: u16) -> Self {
        Self {
            number,
            header: None,
            verses: Vec::new(),
        }
    }
}

/// Metadata block of the combined file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusMetadata {
    pub key: String,
    pub name: String,
    pub version: String,
    pub author: String,
    pub publisher: String,
    pub edition: String,
    pub title: String,
    pub total_verses: usize,
    pub total_chapters: usize,
    pub missing_chapters: Vec<u16>,
    pub empty_verses: Vec<String>,
    pub generated_at: String,
}

/// Shape of the combined JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteDocument {
    pub verses: Vec<VerseRecord>,
    pub metadata: CorpusMetadata,
}

/// All chapters plus corpus metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    chapters: Vec<ChapterAggregate>,
    pub metadata: CorpusMetadata,
}

/// ISO-8601 form used for `timestamp` and `generated_at`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Corpus {
    /// Render and freeze a parse result
    pub fn assemble(
        parsed: &ParsedCorpus,
        template: &RecordTemplate,
        options: &HtmlOptions,
        generated_at: DateTime<Utc>,
    ) -> (Corpus, Diagnostics) {
        let timestamp = format_timestamp(generated_at);
        let mut diagnostics = Diagnostics::new();
        let mut chapters = Vec::with_capacity(usize::from(canon::CHAPTER_COUNT));
        let mut missing_chapters = Vec::new();
        let mut empty_verses = Vec::new();

        for number in canon::chapters() {
            let Some(parsed_chapter) = parsed.chapter(number) else {
                diagnostics.push(Diagnostic::MissingChapter { chapter: number });
                missing_chapters.push(number);
                chapters.push(ChapterAggregate::empty(number));
                continue;
            };

            let mut records = Vec::with_capacity(parsed_chapter.record_count());
            for (idx, raw) in parsed_chapter.verses.iter().enumerate() {
                let body = html::render_commentary(&raw.lines);
                if body.is_empty() {
                    for key in raw.keys() {
                        diagnostics.push(Diagnostic::EmptyCommentary {
                            verse_key: key.to_string(),
                        });
                        empty_verses.push(key.to_string());
                    }
                }
                let body_text = body.join("\n");

                for (n, key) in raw.keys().enumerate() {
                    let text = if idx == 0 && n == 0 {
                        html::render_verse(&raw.lines, Some(parsed_chapter), options)
                    } else {
                        body_text.clone()
                    };
                    records.push(template.record(key, text, &timestamp));
                }
            }

            chapters.push(ChapterAggregate {
                number,
                header: parsed_chapter.header.clone(),
                verses: records,
            });
        }

        let total_verses = chapters.iter().map(|c| c.verses.len()).sum();
        let metadata = CorpusMetadata {
            key: template.key.clone(),
            name: template.name.clone(),
            version: template.version.clone(),
            author: template.copyright.author.clone(),
            publisher: template.copyright.publisher.clone(),
            edition: template.copyright.edition.clone(),
            title: template.copyright.title.clone(),
            total_verses,
            total_chapters: parsed.chapters.len(),
            missing_chapters,
            empty_verses,
            generated_at: timestamp,
        };

        (Corpus { chapters, metadata }, diagnostics)
    }

    /// Chapter aggregate for 1..=114
    pub fn chapter(&self, number: u16) -> Option<&ChapterAggregate> {
        if canon::is_chapter(number) {
            self.chapters.get(usize::from(number - 1))
        } else {
            None
        }
    }

    /// All 114 chapters in order
    pub fn chapters(&self) -> &[ChapterAggregate] {
        &self.chapters
    }

    /// Every record, chapter then source order
    pub fn verses(&self) -> impl Iterator<Item = &VerseRecord> {
        self.chapters.iter().flat_map(|c| c.verses.iter())
    }

    pub fn total_verses(&self) -> usize {
        self.metadata.total_verses
    }
}
