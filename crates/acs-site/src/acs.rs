//! Core ACS data types.
//!
//! This module defines the domain vocabulary of the study material: sections
//! (areas of operation, numbered 1-8), tasks (lettered A-E within a section),
//! and the parsed content of a task document. All of these are constructed
//! once per build and never mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Roman numerals for the eight areas of operation, as used by the FAA's
/// task identifiers (e.g. `IR.VI.B.K1`).
const NUMERALS: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];

/// A validated section (area of operation) number, 1 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SectionNumber(u8);

impl SectionNumber {
    /// Create a section number, rejecting values outside 1-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSectionNumber`] for out-of-range values.
    pub fn new(value: u8) -> Result<Self> {
        if (1..=8).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidSectionNumber(value))
        }
    }

    /// Get the numeric value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Get the Roman numeral form ("I" through "VIII").
    #[must_use]
    pub fn numeral(self) -> &'static str {
        NUMERALS[usize::from(self.0) - 1]
    }

    /// Iterate over all valid section numbers in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=8).map(Self)
    }
}

impl TryFrom<u8> for SectionNumber {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for SectionNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// A task letter within a section. No section has more than five tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskLetter {
    /// Task A.
    A,
    /// Task B.
    B,
    /// Task C.
    C,
    /// Task D.
    D,
    /// Task E.
    E,
}

impl TaskLetter {
    /// Get the letter as a char.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }

    /// Iterate over all task letters in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::A, Self::B, Self::C, Self::D, Self::E].into_iter()
    }
}

impl TryFrom<char> for TaskLetter {
    type Error = Error;

    fn try_from(value: char) -> Result<Self> {
        match value {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            'E' => Ok(Self::E),
            other => Err(Error::InvalidTaskLetter(other)),
        }
    }
}

impl fmt::Display for TaskLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A key in a knowledge/risk-management/skills item list.
///
/// Keys are a number optionally followed by a single lowercase letter
/// ("1", "2", "3a"). The `Ord` implementation sorts by number first and
/// suffix second, so rendered lists always come out `1, 2, 3, 3a, 3b, 10`
/// regardless of document order — lexicographic string ordering would put
/// "10" before "2".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId {
    number: u32,
    suffix: Option<char>,
}

impl ItemId {
    /// Get the numeric part of the key.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Get the sub-item suffix, if any.
    #[must_use]
    pub fn suffix(&self) -> Option<char> {
        self.suffix
    }

    /// Check if this key identifies a sub-item (has a letter suffix).
    #[must_use]
    pub fn is_sub_item(&self) -> bool {
        self.suffix.is_some()
    }
}

impl FromStr for ItemId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits_end = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        if digits_end == 0 {
            return Err(Error::InvalidItemId(s.to_string()));
        }

        let number: u32 = s[..digits_end]
            .parse()
            .map_err(|_| Error::InvalidItemId(s.to_string()))?;

        let suffix = match &s[digits_end..] {
            "" => None,
            rest => {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_lowercase() => Some(c),
                    _ => return Err(Error::InvalidItemId(s.to_string())),
                }
            }
        };

        Ok(Self { number, suffix })
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)?;
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

impl Serialize for ItemId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The content of a single item in a task's item lists.
///
/// Most items are plain strings; some carry a general statement with a list
/// of specific elements (e.g. "Types of instrument approaches" followed by
/// the individual approach types).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemContent {
    /// A single statement.
    Plain(String),
    /// A general statement with specific sub-elements.
    Detailed {
        /// The general statement.
        general: String,
        /// The specific elements under it.
        specific: Vec<String>,
    },
}

/// An ordered item list (knowledge, risk management, or skills).
///
/// Ordering comes from [`ItemId`]'s `Ord`, not from document order.
pub type ItemList = BTreeMap<ItemId, ItemContent>;

/// Reference to the parent section from inside a task document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    /// Roman numeral of the parent section ("I" through "VIII").
    pub numeral: String,
    /// Display name of the parent section.
    pub name: String,
}

/// The metadata block of a task document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMeta {
    /// The task's letter.
    pub letter: TaskLetter,
    /// The task's display name.
    pub name: String,
    /// The task's objective statement.
    pub objective: String,
    /// Ordered list of FAA reference documents.
    pub references: Vec<String>,
    /// The parent section.
    pub section: SectionRef,
}

/// A fully parsed task document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// The metadata block.
    pub meta: TaskMeta,
    /// Knowledge items.
    pub knowledge: ItemList,
    /// Risk-management items.
    pub risk_management: ItemList,
    /// Skill items.
    pub skills: ItemList,
    /// Free-form study notes from the sibling notes file. Never part of the
    /// TOML document itself; populated by the loader when the file exists.
    #[serde(skip)]
    pub notes: Option<String>,
}

/// Pixel dimensions and format of a content image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Image format, taken from the file extension.
    pub kind: ImageKind,
}

/// The raster formats the image loader recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// WebP.
    Webp,
    /// GIF.
    Gif,
}

impl ImageKind {
    /// Map a file extension to an image kind, if recognized.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }
}
