//! Site structure assembly.
//!
//! Combines the directory scanner and image metadata loader into the single
//! aggregate consumed by the page-rendering step. Task content is loaded
//! lazily per page, not bundled here: the aggregate stays small and a page
//! only pays for the document it renders.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::acs::ImageMeta;
use crate::config::Config;
use crate::error::Result;
use crate::images::scan_images;
use crate::scanner::{scan_sections, Section};

/// The assembled site structure: everything the rendering layer needs
/// besides per-page task content. Read-only for the duration of a build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteStructure {
    /// All sections with their tasks, in ascending order.
    pub sections: Vec<Section>,
    /// Image dimension lookup keyed by `<section>/<basename>`.
    pub images: BTreeMap<String, ImageMeta>,
    /// When the content tree last changed, from version-control history.
    /// Absent when no history is available.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Assemble the site structure: one scanner pass, one image pass.
///
/// # Errors
///
/// Propagates scanner and image-loader errors; a missing version-control
/// history is not an error.
pub fn assemble(config: &Config) -> Result<SiteStructure> {
    Ok(SiteStructure {
        sections: scan_sections(config)?,
        images: scan_images(&config.images_path())?,
        last_updated: last_updated(&config.content_root()),
    })
}

/// Ask git for the commit date of the last change under `path`.
///
/// Any failure — git not installed, not a repository, nothing committed,
/// unparseable output — yields `None` rather than an error: the timestamp
/// is a display nicety, not content.
fn last_updated(path: &Path) -> Option<DateTime<Utc>> {
    let output = Command::new("git")
        .args(["log", "-1", "--format=%cD"])
        .arg(path)
        .output();

    let output = match output {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(stderr = %stderr.trim(), "git log failed, omitting last-updated");
            return None;
        }
        Err(err) => {
            debug!(error = %err, "could not run git, omitting last-updated");
            return None;
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let date = stdout.trim();
    if date.is_empty() {
        debug!("no commit history for content root");
        return None;
    }

    match DateTime::parse_from_rfc2822(date) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(err) => {
            debug!(date, error = %err, "unparseable commit date");
            None
        }
    }
}
