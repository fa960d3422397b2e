//! Task content loader.
//!
//! Resolves a (section, letter) or (section name, task name) pair against
//! scanner output, parses the task's TOML document, and cross-checks the
//! parsed metadata against the file's location. There is no caching: this
//! runs at build time, once per page.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::acs::{SectionNumber, TaskLetter, TaskRecord};
use crate::error::{Error, Result};
use crate::scanner::{Section, Task};

/// Load the task identified by a section number and task letter.
///
/// # Errors
///
/// Returns [`Error::UnknownSection`] / [`Error::UnknownTask`] when the pair
/// does not exist in the scanned tree, and a fatal parse or mismatch error
/// for a malformed document.
pub fn load_task(
    sections: &[Section],
    number: SectionNumber,
    letter: TaskLetter,
) -> Result<TaskRecord> {
    let section = sections
        .iter()
        .find(|s| s.number == number)
        .ok_or_else(|| Error::UnknownSection(number.to_string()))?;
    let task = section
        .tasks
        .iter()
        .find(|t| t.letter == letter)
        .ok_or(Error::UnknownTask {
            section: number.get(),
            letter: letter.as_char(),
        })?;
    load_from_entry(section, task)
}

/// Load the task identified by a section name and task name.
///
/// The alternative resolution path for callers that hold display names
/// rather than identifiers.
///
/// # Errors
///
/// Returns [`Error::UnknownSection`] / [`Error::UnknownTaskName`] when
/// either name does not exist in the scanned tree.
pub fn load_task_by_name(
    sections: &[Section],
    section_name: &str,
    task_name: &str,
) -> Result<TaskRecord> {
    let section = sections
        .iter()
        .find(|s| s.name == section_name)
        .ok_or_else(|| Error::UnknownSection(section_name.to_string()))?;
    let task = section
        .tasks
        .iter()
        .find(|t| t.name == task_name)
        .ok_or_else(|| Error::UnknownTaskName {
            section: section.number.get(),
            name: task_name.to_string(),
        })?;
    load_from_entry(section, task)
}

/// Read and parse one task document, attaching sibling notes if present.
fn load_from_entry(section: &Section, task: &Task) -> Result<TaskRecord> {
    let text = std::fs::read_to_string(&task.path)?;
    let mut record: TaskRecord =
        toml::from_str(&text).map_err(|source| Error::task_parse(&task.path, source))?;

    // Fail fast on documents that contradict their place in the tree; a
    // mismatch here means a copy/paste or renaming mistake in the content
    // repository.
    if record.meta.letter != task.letter {
        return Err(Error::content_mismatch(
            &task.path,
            format!(
                "meta.letter is \"{}\" but the file is Task {}",
                record.meta.letter, task.letter
            ),
        ));
    }
    if record.meta.section.numeral != section.number.numeral() {
        return Err(Error::content_mismatch(
            &task.path,
            format!(
                "meta.section.numeral is \"{}\" but the file is in section {} ({})",
                record.meta.section.numeral,
                section.number,
                section.number.numeral()
            ),
        ));
    }

    record.notes = read_notes(&task.path)?;
    Ok(record)
}

/// Read the sibling notes file, treating absence as "no notes".
///
/// This is the only place a missing resource is swallowed: notes are
/// optional by design, while every other absence in the pipeline means a
/// broken content tree.
fn read_notes(task_path: &Path) -> Result<Option<String>> {
    let path = notes_path(task_path);
    match std::fs::read_to_string(&path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no notes file");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Derive the sibling notes path: `Task A. Foo.toml` → `Task A. Foo.notes.md`.
fn notes_path(task_path: &Path) -> PathBuf {
    let stem = task_path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    task_path.with_file_name(format!("{stem}.notes.md"))
}
