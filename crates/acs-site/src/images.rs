//! Image metadata loader.
//!
//! Walks the image tree (`<section digit>/<name>.{webp,gif}`), reads each
//! image's pixel dimensions from its file header, and produces the lookup
//! the rendering layer uses to reserve layout space. Only the header is
//! read; images are never fully decoded.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::acs::{ImageKind, ImageMeta};
use crate::error::{Error, Result};

/// Scan the image tree rooted at `root`.
///
/// Returns a mapping from `<section digit>/<basename-without-extension>` to
/// pixel dimensions. Subdirectories whose name is not a single digit, and
/// files without a recognized extension, are skipped silently. An absent
/// root yields an empty mapping — a content tree without images is valid.
///
/// # Errors
///
/// Returns [`Error::ImageProbe`] if a recognized image's header cannot be
/// parsed. Content is curated, so a corrupt image fails the build instead
/// of silently dropping a key the rendering layer expects.
pub fn scan_images(root: &Path) -> Result<BTreeMap<String, ImageMeta>> {
    let mut images = BTreeMap::new();

    if !root.is_dir() {
        debug!(root = %root.display(), "image tree absent, returning empty index");
        return Ok(images);
    }

    // Depth 2 only: files directly inside the per-section digit directories.
    for entry in WalkDir::new(root).min_depth(2).max_depth(2) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "error accessing image tree entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(section) = section_digit(path) else {
            debug!(path = %path.display(), "skipping file outside a section digit directory");
            continue;
        };
        let Some(kind) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageKind::from_extension)
        else {
            debug!(path = %path.display(), "skipping file with unrecognized extension");
            continue;
        };

        let stem = path
            .file_stem()
            .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
        let key = format!("{section}/{stem}");

        images.insert(key, probe(path, kind)?);
    }

    info!(images = images.len(), root = %root.display(), "scanned image tree");
    Ok(images)
}

/// Get the parent directory's name if it is a single ASCII digit.
fn section_digit(path: &Path) -> Option<char> {
    let name = path.parent()?.file_name()?.to_str()?;
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Some(c),
        _ => None,
    }
}

/// Read one image's dimensions from its header.
fn probe(path: &Path, kind: ImageKind) -> Result<ImageMeta> {
    let size = imagesize::size(path).map_err(|err| Error::image_probe(path, err.to_string()))?;
    let width = u32::try_from(size.width)
        .map_err(|_| Error::image_probe(path, "width out of range"))?;
    let height = u32::try_from(size.height)
        .map_err(|_| Error::image_probe(path, "height out of range"))?;
    Ok(ImageMeta {
        width,
        height,
        kind,
    })
}
