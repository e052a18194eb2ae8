//! Commentary text to HTML
//!
//! The output is an HTML fragment, not a document. Mapping:
//!
//! | Source                               | HTML                                   |
//! |--------------------------------------|----------------------------------------|
//! | chapter header (first verse only)    | `<h2>Sura Name (Translation)</h2>`     |
//! | revelation place / verse count       | `<p><em>…</em></p>` (opt-in)           |
//! | lines separated by blank/page lines  | `<p>…</p>`                             |
//! | `"…"`, `„…“`, `“…”`                  | `<strong>"…"</strong>`                 |
//! | word with Arabic diacritics          | `<em>…</em>`                           |
//!
//! Blocks are joined with `\n`. Text is not HTML-escaped; the JSON encoder
//! takes care of quotes and control characters.

pub mod inline;

use crate::parser::patterns::is_page_number;
use crate::parser::ParsedChapter;

pub use inline::emphasize;

/// Rendering switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Text placed before the chapter name in the heading
    pub heading_prefix: String,
    /// Render revelation place and verse count below the heading
    pub chapter_metadata: bool,
    /// Words placed before the revelation place, e.g. `offenbart zu`
    pub revelation_label: String,
    /// Unit placed after the verse count, e.g. `Āyāt`
    pub verse_count_unit: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            heading_prefix: "Sura ".to_string(),
            chapter_metadata: false,
            revelation_label: "offenbart zu".to_string(),
            verse_count_unit: "Āyāt".to_string(),
        }
    }
}

/// Split raw commentary lines into paragraphs
///
/// Blank lines and page-number lines end a paragraph; the lines of one
/// paragraph are joined with a single space.
pub fn split_paragraphs(lines: &[String]) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || is_page_number(line) {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs
}

/// Render commentary lines as `<p>` blocks, empty when there is no text
pub fn render_commentary(lines: &[String]) -> Vec<String> {
    split_paragraphs(lines)
        .iter()
        .map(|p| format!("<p>{}</p>", emphasize(p)))
        .collect()
}

/// Blocks that precede the first verse of a chapter
///
/// Empty when the chapter has no header.
pub fn render_chapter_lead(chapter: &ParsedChapter, options: &HtmlOptions) -> Vec<String> {
    let Some(header) = chapter.header.as_ref() else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    let title = match &header.translation {
        Some(translation) => format!("{} ({translation})", header.name),
        None => header.name.clone(),
    };
    blocks.push(format!("<h2>{}{title}</h2>", options.heading_prefix));

    if options.chapter_metadata {
        if let Some(place) = &header.revelation {
            blocks.push(format!(
                "<p><em>({} {place})</em></p>",
                options.revelation_label
            ));
        }
        if let Some(count) = header.expected_verses {
            blocks.push(format!(
                "<p><em>{count} {}</em></p>",
                options.verse_count_unit
            ));
        }
    }

    blocks.extend(render_commentary(&chapter.introduction));
    blocks
}

/// Render one verse; `first_of` is set when this is the chapter's first verse
pub fn render_verse(
    lines: &[String],
    first_of: Option<&ParsedChapter>,
    options: &HtmlOptions,
) -> String {
    let mut blocks = first_of
        .map(|chapter| render_chapter_lead(chapter, options))
        .unwrap_or_default();
    blocks.extend(render_commentary(lines));
    blocks.join("\n")
}
