//! Fixture-based integration tests for the content pipeline.
//!
//! Builds a miniature content repository in a temp directory — section
//! directories, TOML task documents, notes files, and images with real
//! webp/gif headers — and runs the scanner, loader, and assembler over it.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use acs_site::acs::{ImageKind, ItemContent, ItemId, SectionNumber, TaskLetter};
use acs_site::{assemble, load_task, load_task_by_name, scan_images, scan_sections, Config, Error};

/// A minimal GIF header carrying the given logical screen dimensions.
fn gif_bytes(width: u16, height: u16) -> Vec<u8> {
    let mut bytes = b"GIF89a".to_vec();
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x3B]);
    bytes
}

/// A minimal WebP (VP8X) header carrying the given canvas dimensions.
fn webp_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = b"RIFF".to_vec();
    bytes.extend_from_slice(&22u32.to_le_bytes());
    bytes.extend_from_slice(b"WEBPVP8X");
    bytes.extend_from_slice(&10u32.to_le_bytes());
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    bytes.extend_from_slice(&(width - 1).to_le_bytes()[..3]);
    bytes.extend_from_slice(&(height - 1).to_le_bytes()[..3]);
    bytes
}

/// Render a well-formed task document.
fn task_doc(letter: char, name: &str, numeral: &str, section_name: &str) -> String {
    format!(
        r#"
[meta]
letter = "{letter}"
name = "{name}"
objective = "Determine that the applicant exhibits satisfactory knowledge of {name}."
references = ["14 CFR part 61", "FAA-H-8083-15"]
section = {{ numeral = "{numeral}", name = "{section_name}" }}

[knowledge]
1 = "Certification requirements"
2 = {{ general = "Recency of experience", specific = ["Approaches", "Holding", "Tracking"] }}
10 = "A late item, to exercise numeric key ordering"

[risk_management]
1 = "Failure to distinguish proficiency from currency"

[skills]
1 = "Apply the requirements to a given scenario"
"#
    )
}

fn write(path: &Path, contents: impl AsRef<[u8]>) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// The standard fixture: two sections created in reverse order (so any
/// reliance on filesystem enumeration order shows up), stray entries that
/// must be excluded, one notes file, and a populated image tree.
fn fixture() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("areas_of_operation");

    // Section 2 first, on purpose.
    let s2 = tree.join("2. Preflight Procedures");
    write(
        &s2.join("Task B. Instruments.toml"),
        task_doc('B', "Instruments", "II", "Preflight Procedures"),
    );
    write(
        &s2.join("Task A. IFR Systems.toml"),
        task_doc('A', "IFR Systems", "II", "Preflight Procedures"),
    );
    write(&s2.join("scratch.txt"), "not content");

    let s1 = tree.join("1. Preflight Preparation");
    write(
        &s1.join("Task C. XC Flight Planning.toml"),
        task_doc('C', "XC Flight Planning", "I", "Preflight Preparation"),
    );
    write(
        &s1.join("Task A. Pilot Qualifications.toml"),
        task_doc('A', "Pilot Qualifications", "I", "Preflight Preparation"),
    );
    write(
        &s1.join("Task A. Pilot Qualifications.notes.md"),
        "Remember 61.65",
    );
    write(&s1.join("README.md"), "ignored");

    fs::create_dir_all(tree.join("raw_acs")).unwrap();

    let img = dir.path().join("public/img");
    write(&img.join("3/foo.webp"), webp_bytes(100, 50));
    write(&img.join("3/bar.gif"), gif_bytes(20, 20));
    write(&img.join("3/caption.txt"), "ignored");
    write(&img.join("misc/zap.gif"), gif_bytes(5, 5));

    let mut config = Config::default();
    config.content.root = Some(dir.path().to_path_buf());
    (dir, config)
}

fn section(n: u8) -> SectionNumber {
    SectionNumber::new(n).unwrap()
}

#[test]
fn scanner_orders_by_number_and_letter() {
    let (_dir, config) = fixture();
    let sections = scan_sections(&config).unwrap();

    let numbers: Vec<u8> = sections.iter().map(|s| s.number.get()).collect();
    assert_eq!(numbers, vec![1, 2]);

    let letters: Vec<char> = sections[0].tasks.iter().map(|t| t.letter.as_char()).collect();
    assert_eq!(letters, vec!['A', 'C']);
    let letters: Vec<char> = sections[1].tasks.iter().map(|t| t.letter.as_char()).collect();
    assert_eq!(letters, vec!['A', 'B']);
}

#[test]
fn scanner_strips_prefixes_and_excludes_strays() {
    let (_dir, config) = fixture();
    let sections = scan_sections(&config).unwrap();

    // Exactly one Section per matching directory, one Task per matching
    // file; scratch.txt, README.md, the notes file, and raw_acs are gone.
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].name, "Preflight Preparation");
    assert_eq!(sections[0].tasks.len(), 2);
    assert_eq!(sections[0].tasks[1].name, "XC Flight Planning");
    assert_eq!(sections[1].name, "Preflight Procedures");
    assert_eq!(sections[1].tasks.len(), 2);
}

#[test]
fn scanner_derives_uris_from_slug_tables() {
    let (_dir, config) = fixture();
    let sections = scan_sections(&config).unwrap();

    assert_eq!(sections[0].uri, "/1-preflight-preparation");
    assert_eq!(
        sections[0].tasks[1].uri,
        "/1-preflight-preparation/C-xc-flight-planning"
    );
    assert_eq!(
        sections[1].tasks[1].uri,
        "/2-preflight-procedures/B-instruments"
    );
}

#[test]
fn scanner_rejects_duplicate_task_letters() {
    let (dir, config) = fixture();
    write(
        &dir.path()
            .join("areas_of_operation/2. Preflight Procedures/Task A. Another Name.toml"),
        task_doc('A', "Another Name", "II", "Preflight Procedures"),
    );

    let err = scan_sections(&config).unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateTask {
            section: 2,
            letter: 'A'
        }
    ));
}

#[test]
fn scanner_rejects_unregistered_slugs() {
    let (dir, config) = fixture();
    // Section 8 is registered with Task A only, so Task B has no slug.
    write(
        &dir.path()
            .join("areas_of_operation/8. Postflight Procedures/Task B. Unregistered.toml"),
        task_doc('B', "Unregistered", "VIII", "Postflight Procedures"),
    );

    let err = scan_sections(&config).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingTaskSlug {
            section: 8,
            letter: 'B'
        }
    ));
}

#[test]
fn loader_returns_matching_record_for_every_pair() {
    let (_dir, config) = fixture();
    let sections = scan_sections(&config).unwrap();

    for s in &sections {
        for t in &s.tasks {
            let record = load_task(&sections, s.number, t.letter).unwrap();
            assert_eq!(record.meta.letter, t.letter);
            assert_eq!(record.meta.section.numeral, s.number.numeral());
            assert_eq!(record.meta.section.name, s.name);
            assert_eq!(record.meta.name, t.name);
        }
    }
}

#[test]
fn loader_parses_item_lists_in_ascending_order() {
    let (_dir, config) = fixture();
    let sections = scan_sections(&config).unwrap();
    let record = load_task(&sections, section(1), TaskLetter::A).unwrap();

    let keys: Vec<String> = record.knowledge.keys().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["1", "2", "10"]);

    let two = &record.knowledge[&"2".parse::<ItemId>().unwrap()];
    assert!(matches!(two, ItemContent::Detailed { specific, .. } if specific.len() == 3));
}

#[test]
fn loader_resolves_by_name_pair() {
    let (_dir, config) = fixture();
    let sections = scan_sections(&config).unwrap();

    let record =
        load_task_by_name(&sections, "Preflight Procedures", "IFR Systems").unwrap();
    assert_eq!(record.meta.letter, TaskLetter::A);

    let err = load_task_by_name(&sections, "No Such Section", "IFR Systems").unwrap_err();
    assert!(err.is_not_found());

    // An unknown task name reports the name as given, within the section
    // that was found.
    let err = load_task_by_name(&sections, "Preflight Procedures", "IRF Systems").unwrap_err();
    assert!(err.is_not_found());
    assert!(
        matches!(&err, Error::UnknownTaskName { section: 2, name } if name == "IRF Systems")
    );
}

#[test]
fn loader_attaches_notes_when_present() {
    let (_dir, config) = fixture();
    let sections = scan_sections(&config).unwrap();

    let with_notes = load_task(&sections, section(1), TaskLetter::A).unwrap();
    assert_eq!(with_notes.notes.as_deref(), Some("Remember 61.65"));

    // Absent notes file: empty, not an error.
    let without_notes = load_task(&sections, section(1), TaskLetter::C).unwrap();
    assert_eq!(without_notes.notes, None);
}

#[test]
fn loader_rejects_unknown_identifiers() {
    let (_dir, config) = fixture();
    let sections = scan_sections(&config).unwrap();

    let err = load_task(&sections, section(3), TaskLetter::A).unwrap_err();
    assert!(matches!(err, Error::UnknownSection(_)));

    let err = load_task(&sections, section(2), TaskLetter::E).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownTask {
            section: 2,
            letter: 'E'
        }
    ));
}

#[test]
fn loader_fails_on_malformed_document() {
    let (dir, config) = fixture();
    // Missing the required meta block entirely.
    write(
        &dir.path()
            .join("areas_of_operation/1. Preflight Preparation/Task B. Broken.toml"),
        "[knowledge]\n1 = \"orphaned\"\n",
    );

    let sections = scan_sections(&config).unwrap();
    let err = load_task(&sections, section(1), TaskLetter::B).unwrap_err();
    assert!(matches!(err, Error::TaskParse { .. }));
}

#[test]
fn loader_fails_on_metadata_contradicting_location() {
    let (dir, config) = fixture();
    // The document claims letter B but lives in a Task B file with numeral
    // from the wrong section.
    write(
        &dir.path()
            .join("areas_of_operation/1. Preflight Preparation/Task B. Misfiled.toml"),
        task_doc('B', "Misfiled", "II", "Preflight Preparation"),
    );

    let sections = scan_sections(&config).unwrap();
    let err = load_task(&sections, section(1), TaskLetter::B).unwrap_err();
    assert!(matches!(err, Error::ContentMismatch { .. }));
    assert!(err.to_string().contains("numeral"));
}

#[test]
fn images_keyed_by_section_and_basename() {
    let (_dir, config) = fixture();
    let images = scan_images(&config.images_path()).unwrap();

    let keys: Vec<&str> = images.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["3/bar", "3/foo"]);

    let foo = &images["3/foo"];
    assert_eq!((foo.width, foo.height), (100, 50));
    assert_eq!(foo.kind, ImageKind::Webp);

    let bar = &images["3/bar"];
    assert_eq!((bar.width, bar.height), (20, 20));
    assert_eq!(bar.kind, ImageKind::Gif);
}

#[test]
fn images_corrupt_header_is_fatal() {
    let (dir, config) = fixture();
    write(
        &dir.path().join("public/img/3/bad.gif"),
        b"not an image header at all",
    );

    let err = scan_images(&config.images_path()).unwrap_err();
    assert!(matches!(err, Error::ImageProbe { .. }));
}

#[test]
fn assembler_composes_without_loading_content() {
    let (_dir, config) = fixture();
    let structure = assemble(&config).unwrap();

    assert_eq!(structure.sections.len(), 2);
    assert_eq!(structure.images.len(), 2);
    // Fresh temp directory: no version-control history, and that is fine.
    assert_eq!(structure.last_updated, None);

    // The aggregate round-trips through JSON for the rendering step.
    let json = serde_json::to_string(&structure).unwrap();
    let back: acs_site::SiteStructure = serde_json::from_str(&json).unwrap();
    assert_eq!(structure, back);
}

#[test]
fn assembler_with_empty_image_tree() {
    let (dir, config) = fixture();
    fs::remove_dir_all(dir.path().join("public")).unwrap();

    let structure = assemble(&config).unwrap();
    assert_eq!(structure.sections.len(), 2);
    assert!(structure.images.is_empty());
}
