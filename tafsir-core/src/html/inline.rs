//! Inline emphasis inside a paragraph
//!
//! Quotations are wrapped first, then transliterated Arabic terms in the text
//! between quotations. Terms inside a quotation are never wrapped, so `<em>`
//! does not nest inside `<strong>`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

// "…", „…“ and “…”
static QUOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[^"]+"|„[^„“”"]+[“”"]|“[^“”]+”"#).unwrap());

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{M}'’ʿʾ-]+").unwrap());

/// Characters marking a word as transliterated Arabic
pub const DIACRITICS: &[char] = &[
    'ā', 'ī', 'ū', 'ḥ', 'ṣ', 'ḍ', 'ṭ', 'ẓ', 'ḏ', 'ṯ', 'ḫ', 'ġ', 'ǧ', 'ʿ', 'ʾ', //
    'Ā', 'Ī', 'Ū', 'Ḥ', 'Ṣ', 'Ḍ', 'Ṭ', 'Ẓ', 'Ḏ', 'Ṯ', 'Ḫ', 'Ġ', 'Ǧ',
];

const WORD_EDGE: &[char] = &['\'', '’', '-'];

pub fn has_diacritic(word: &str) -> bool {
    word.chars().any(|c| DIACRITICS.contains(&c))
}

/// Apply `<strong>` to quotations and `<em>` to diacritic terms
pub fn emphasize(paragraph: &str) -> String {
    let mut out = String::with_capacity(paragraph.len() + 32);
    let mut last = 0;

    for quote in QUOTATION.find_iter(paragraph) {
        out.push_str(&mark_terms(&paragraph[last..quote.start()]));
        out.push_str("<strong>");
        out.push_str(quote.as_str());
        out.push_str("</strong>");
        last = quote.end();
    }
    out.push_str(&mark_terms(&paragraph[last..]));

    out
}

fn mark_terms(text: &str) -> Cow<'_, str> {
    WORD.replace_all(text, |caps: &Captures| {
        let word = &caps[0];
        let core = word.trim_matches(WORD_EDGE);
        if core.is_empty() || !has_diacritic(core) {
            return word.to_string();
        }
        let start = word.len() - word.trim_start_matches(WORD_EDGE).len();
        let end = start + core.len();
        format!("{}<em>{}</em>{}", &word[..start], core, &word[end..])
    })
}
