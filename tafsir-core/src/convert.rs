//! End-to-end conversion: source files in, JSON files out.
//!
//! Stages run strictly in sequence, each consuming the previous stage's output:
//!
//!     discover_parts -> read_lines -> Parser::parse -> Corpus::assemble -> emit
//!
//! Diagnostics of all stages are merged into one [`ConversionReport`].

use crate::corpus::Corpus;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::emitter::{self, EmitOptions};
use crate::error::TafsirError;
use crate::html::HtmlOptions;
use crate::parser::{ParseOptions, Parser};
use crate::record::RecordTemplate;
use crate::source::{self, SourceLine, SourceOptions};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Every knob of a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub source: SourceOptions,
    pub parse: ParseOptions,
    pub html: HtmlOptions,
    pub emit: EmitOptions,
    pub template: RecordTemplate,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub parts_read: usize,
    pub lines_read: usize,
    /// Chapters with a header or at least one verse
    pub chapters_seen: usize,
    pub total_verses: usize,
    pub missing_chapters: Vec<u16>,
    pub files_written: Vec<PathBuf>,
    pub diagnostics: Diagnostics,
}

impl ConversionReport {
    /// Human readable summary, one line per entry
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Parts read:       {}", self.parts_read),
            format!("Lines read:       {}", self.lines_read),
            format!("Chapters found:   {}/114", self.chapters_seen),
            format!("Verses written:   {}", self.total_verses),
            format!("Files written:    {}", self.files_written.len()),
        ];
        if !self.missing_chapters.is_empty() {
            lines.push(format!(
                "Missing chapters: {}",
                join_numbers(&self.missing_chapters)
            ));
        }
        if self.diagnostics.is_empty() {
            lines.push("Warnings:         none".to_string());
        } else {
            lines.push(format!("Warnings:         {}", self.diagnostics.len()));
            for (kind, count) in self.diagnostics.counts() {
                lines.push(format!("  {:<20} {count}", kind.label()));
            }
        }
        lines
    }

    pub fn warning_count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.of_kind(kind).count()
    }
}

/// Parse and assemble lines already in memory
pub fn convert_lines(
    lines: &[SourceLine],
    options: &ConvertOptions,
    generated_at: DateTime<Utc>,
) -> (Corpus, Diagnostics) {
    let parsed = Parser::new(&options.parse).parse(lines);
    tracing::info!(
        "Parsed {} chapters with {} verse records",
        parsed.chapters.len(),
        parsed.record_count()
    );

    let (corpus, assembly_diagnostics) =
        Corpus::assemble(&parsed, &options.template, &options.html, generated_at);

    let mut diagnostics = parsed.diagnostics;
    diagnostics.extend(assembly_diagnostics);
    (corpus, diagnostics)
}

/// Convert every part file in `input` and write the JSON files to `output`
///
/// # Errors
///
/// [`TafsirError::MissingInput`] when `input` holds no part files,
/// [`TafsirError::OutputWrite`] when `output` cannot be written.
pub fn convert_directory(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
    generated_at: DateTime<Utc>,
) -> Result<ConversionReport, TafsirError> {
    let (parts, mut diagnostics) = source::discover_parts(input, &options.source)?;
    let (lines, read_diagnostics) = source::read_lines(&parts);
    diagnostics.extend(read_diagnostics);
    tracing::info!("Read {} lines from {} parts", lines.len(), parts.len());

    let (corpus, conversion_diagnostics) = convert_lines(&lines, options, generated_at);
    diagnostics.extend(conversion_diagnostics);

    let files_written = emitter::emit(&corpus, output, &options.emit)?;

    Ok(ConversionReport {
        parts_read: parts.len(),
        lines_read: lines.len(),
        chapters_seen: corpus.metadata.total_chapters,
        total_verses: corpus.metadata.total_verses,
        missing_chapters: corpus.metadata.missing_chapters.clone(),
        files_written,
        diagnostics,
    })
}

fn join_numbers(numbers: &[u16]) -> String {
    numbers
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
