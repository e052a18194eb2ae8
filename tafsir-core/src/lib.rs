//! Plain-text tafsir to structured JSON
//!
//!     This crate turns the German tafsir text export (numbered part files) into one JSON record
//!     per verse, written per chapter and as one combined corpus file.
//!
//!     This is a pure lib, that is, it powers tafsir-cli but is shell agnostic: nothing here
//!     prints to stdout, reads env vars or exits. Progress and irregularities are reported through
//!     `tracing` and the returned [`Diagnostics`].
//!
//!     The file structure :
//!     .
//!     ├── canon.rs                # Canonical chapter / verse counts
//!     ├── convert.rs              # End-to-end pipeline
//!     ├── corpus.rs               # Records, chapter aggregates, corpus metadata
//!     ├── diagnostics.rs          # Non-fatal findings
//!     ├── emitter.rs              # JSON files
//!     ├── error.rs                # Fatal errors
//!     ├── html
//!     │   ├── inline.rs           # <strong> / <em> emphasis
//!     │   └── mod.rs              # Headings and paragraphs
//!     ├── parser
//!     │   ├── patterns.rs         # Line classification
//!     │   └── mod.rs              # State machine
//!     ├── record.rs               # VerseRecord and its constants
//!     ├── source.rs               # Part file discovery and reading
//!     ├── validate.rs             # Audit of an output directory
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # Aggregates the modules below
//!     ├── fixtures                # Sample part files
//!     └── <area>.rs
//!
//!     Rust does not discover tests in subdirectories by default, so the aggregator includes them.
//!
//! Core Algorithm
//!
//!     Conversion is one pass over the ordered lines. Each line is classified on its own
//!     (header, revelation place, verse count, verse start, continuation) and a small state
//!     machine keeps the chapter in effect and the verse being accumulated. Only after the whole
//!     input is parsed are the records rendered and frozen, so every record of a run shares one
//!     timestamp and the output is deterministic for a given input and time.

pub mod canon;
pub mod convert;
pub mod corpus;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod html;
pub mod parser;
pub mod record;
pub mod source;
pub mod validate;

pub use convert::{convert_directory, convert_lines, ConversionReport, ConvertOptions};
pub use corpus::{ChapterAggregate, CompleteDocument, Corpus, CorpusMetadata};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, SourcePos};
pub use emitter::{emit, EmitOptions};
pub use error::TafsirError;
pub use html::HtmlOptions;
pub use parser::{ParseOptions, ParsedCorpus, Parser};
pub use record::{Copyright, RecordTemplate, VerseKey, VerseRecord};
pub use source::{SourceLine, SourceOptions};
pub use validate::{validate_directory, ValidationReport};
