//! Directory scanner for the section/task content tree.
//!
//! The content tree has a fixed two-level shape: section directories named
//! `<digit>. <name>` containing task documents named `Task <letter>. <name>.toml`.
//! Entries that fail either pattern are skipped silently; they are working
//! files (raw notes, READMEs), not content.
//!
//! Discovered sections and tasks are explicitly sorted by parsed number and
//! letter. Filesystem iteration order is never load-bearing.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::acs::{SectionNumber, TaskLetter};
use crate::config::Config;
use crate::error::{Error, Result};

/// A section (area of operation) discovered in the content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// The section's ordinal number.
    pub number: SectionNumber,
    /// The section's display name (directory name with the prefix stripped).
    pub name: String,
    /// Path to the section directory.
    pub path: PathBuf,
    /// The section's site URI.
    pub uri: String,
    /// The section's tasks, sorted by letter.
    pub tasks: Vec<Task>,
}

/// A task document discovered within a section directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The task's letter.
    pub letter: TaskLetter,
    /// The task's display name (file name with prefix and extension stripped).
    pub name: String,
    /// Path to the task's TOML document.
    pub path: PathBuf,
    /// The task's site URI.
    pub uri: String,
}

/// Matches section directories: `1. Preflight Preparation`.
fn section_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([1-8])\. (.+)$").expect("valid regex"))
}

/// Matches task documents: `Task A. Pilot Qualifications.toml`.
fn task_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Task ([A-E])\. (.+)\.toml$").expect("valid regex"))
}

/// Scan the content tree and produce the ordered list of sections.
///
/// Uses [`Config::content_path`] as the tree root and the config's slug
/// tables for URI derivation.
///
/// # Errors
///
/// Returns an error if the tree root cannot be enumerated, a discovered
/// section/task has no registered slug, or two entries resolve to the same
/// section number or (section, letter) pair.
pub fn scan_sections(config: &Config) -> Result<Vec<Section>> {
    let root = config.content_path();
    let mut sections = Vec::new();

    for entry in read_dir(&root)? {
        let Some(entry) = readable(entry) else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();

        if !entry.path().is_dir() {
            debug!(entry = %name, "skipping non-directory entry");
            continue;
        }
        let Some(caps) = section_pattern().captures(&name) else {
            debug!(entry = %name, "skipping entry that is not a section directory");
            continue;
        };

        // The pattern only admits digits 1-8, so the parse cannot fail.
        let number = SectionNumber::new(caps[1].parse::<u8>().map_err(|_| {
            Error::config_validation(format!("unparseable section directory \"{name}\""))
        })?)?;

        sections.push(Section {
            number,
            name: caps[2].to_string(),
            path: entry.path(),
            uri: config.section_uri(number)?,
            tasks: scan_tasks(&entry.path(), number, config)?,
        });
    }

    sections.sort_by_key(|section| section.number);
    for pair in sections.windows(2) {
        if pair[0].number == pair[1].number {
            return Err(Error::DuplicateSection(pair[0].number.get()));
        }
    }

    info!(
        sections = sections.len(),
        tasks = sections.iter().map(|s| s.tasks.len()).sum::<usize>(),
        root = %root.display(),
        "scanned content tree"
    );
    Ok(sections)
}

/// Enumerate one section directory's task documents.
fn scan_tasks(section_dir: &Path, number: SectionNumber, config: &Config) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();

    for entry in read_dir(section_dir)? {
        let Some(entry) = readable(entry) else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();

        if !entry.path().is_file() {
            debug!(entry = %name, "skipping non-file entry");
            continue;
        }
        let Some(caps) = task_pattern().captures(&name) else {
            debug!(entry = %name, "skipping entry that is not a task document");
            continue;
        };

        // The pattern only admits A-E, so the conversion cannot fail.
        let letter = TaskLetter::try_from(caps[1].chars().next().ok_or_else(|| {
            Error::config_validation(format!("unparseable task file \"{name}\""))
        })?)?;

        tasks.push(Task {
            letter,
            name: caps[2].to_string(),
            path: entry.path(),
            uri: config.task_uri(number, letter)?,
        });
    }

    tasks.sort_by_key(|task| task.letter);
    for pair in tasks.windows(2) {
        if pair[0].letter == pair[1].letter {
            return Err(Error::DuplicateTask {
                section: number.get(),
                letter: pair[0].letter.as_char(),
            });
        }
    }

    Ok(tasks)
}

fn read_dir(path: &Path) -> Result<std::fs::ReadDir> {
    std::fs::read_dir(path).map_err(|source| Error::DirectoryRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Unwrap a directory entry, logging and dropping unreadable ones.
fn readable(entry: std::io::Result<std::fs::DirEntry>) -> Option<std::fs::DirEntry> {
    match entry {
        Ok(entry) => Some(entry),
        Err(err) => {
            warn!(error = %err, "error accessing directory entry");
            None
        }
    }
}
