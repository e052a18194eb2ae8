//! Per-verse output records
//!
//! A [`VerseRecord`] is the unit consumers load: one JSON object per verse,
//! carrying the rendered commentary plus constant provenance fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Copyright block attached to every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Copyright {
    pub author: String,
    pub publisher: String,
    pub edition: String,
    pub title: String,
}

impl Default for Copyright {
    fn default() -> Self {
        Self {
            author: "Muhammad Ibn Ahmad Ibn Rassoul".to_string(),
            publisher: "IB Verlag Islamische Bibliothek".to_string(),
            edition: "41. Auflage".to_string(),
            title: "Tafsīr Al-Qur'ān Al-Karīm".to_string(),
        }
    }
}

/// `chapter:verse` address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerseKey {
    pub chapter: u16,
    pub verse: u16,
}

impl VerseKey {
    pub fn new(chapter: u16, verse: u16) -> Self {
        Self { chapter, verse }
    }

    /// Parse `"C:V"`; anything else yields `None`
    pub fn parse(raw: &str) -> Option<Self> {
        let (chapter, verse) = raw.split_once(':')?;
        Some(Self {
            chapter: chapter.trim().parse().ok()?,
            verse: verse.trim().parse().ok()?,
        })
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

/// One verse of commentary as written to JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub key: String,
    pub verse_key: String,
    pub verses: Vec<String>,
    pub text: String,
    pub timestamp: String,
    pub version: String,
    pub copyright: Copyright,
}

impl VerseRecord {
    /// The parsed form of `verse_key`
    pub fn verse_key(&self) -> Option<VerseKey> {
        VerseKey::parse(&self.verse_key)
    }
}

/// Constant fields shared by all records of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTemplate {
    pub key: String,
    pub name: String,
    pub version: String,
    pub copyright: Copyright,
}

impl Default for RecordTemplate {
    fn default() -> Self {
        Self {
            key: "de_tafsir-al-azhar".to_string(),
            name: "Tafsīr Al-Qur'ān Al-Karīm (German)".to_string(),
            version: "1.0".to_string(),
            copyright: Copyright::default(),
        }
    }
}

impl RecordTemplate {
    /// Build a record for `key` with already rendered `text`
    pub fn record(&self, key: VerseKey, text: String, timestamp: &str) -> VerseRecord {
        let verse_key = key.to_string();
        VerseRecord {
            key: self.key.clone(),
            verses: vec![verse_key.clone()],
            verse_key,
            text,
            timestamp: timestamp.to_string(),
            version: self.version.clone(),
            copyright: self.copyright.clone(),
        }
    }
}
