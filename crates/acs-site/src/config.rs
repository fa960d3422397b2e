//! Configuration management for acs-site.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.
//!
//! The URI slug tables live here rather than as module-level constants so
//! every entry point (CLI, tests, future build steps) shares one injected
//! source of truth and variants cannot drift apart.

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::acs::{SectionNumber, TaskLetter};
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "acs-site";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ACS_SITE_`, `__` as separator)
/// 2. TOML config file at `~/.config/acs-site/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content tree locations.
    pub content: ContentConfig,
    /// URI slug tables.
    pub slugs: SlugConfig,
}

/// Locations within the content repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Root of the content repository.
    /// Defaults to the current directory.
    pub root: Option<PathBuf>,
    /// Section tree directory, relative to the root.
    pub content_dir: String,
    /// Image tree directory, relative to the root.
    pub images_dir: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: None,
            content_dir: "areas_of_operation".to_string(),
            images_dir: "public/img".to_string(),
        }
    }
}

/// URI slug tables: section number → slug and (section, letter) → slug.
///
/// Keys are the string forms of the number and letter because they come in
/// from TOML tables. [`Config::validate`] checks that every key parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    /// Section number (as a string key) → URI slug.
    pub sections: BTreeMap<String, String>,
    /// Section number → task letter → URI slug.
    pub tasks: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            sections: default_section_slugs(),
            tasks: default_task_slugs(),
        }
    }
}

/// The registered section slugs.
fn default_section_slugs() -> BTreeMap<String, String> {
    [
        (1, "preflight-preparation"),
        (2, "preflight-procedures"),
        (3, "atc-clearances-and-procedures"),
        (4, "instrument-flight"),
        (5, "navigation-systems"),
        (6, "approach-procedures"),
        (7, "emergencies"),
        (8, "postflight-procedures"),
    ]
    .into_iter()
    .map(|(n, slug)| (n.to_string(), slug.to_string()))
    .collect()
}

/// The registered task slugs.
fn default_task_slugs() -> BTreeMap<String, BTreeMap<String, String>> {
    let tables: [(u8, &[(&str, &str)]); 8] = [
        (
            1,
            &[
                ("A", "pilot-qualifications"),
                ("B", "weather-information"),
                ("C", "xc-flight-planning"),
            ],
        ),
        (
            2,
            &[
                ("A", "ifr-systems"),
                ("B", "instruments"),
                ("C", "flight-deck-check"),
            ],
        ),
        (3, &[("A", "compliance"), ("B", "holding")]),
        (4, &[("A", "instrument-flight"), ("B", "unusual-attitudes")]),
        (
            5,
            &[
                ("A", "intercepting-and-tracking"),
                ("B", "departure-enroute-arrival"),
            ],
        ),
        (
            6,
            &[
                ("A", "nonprecision"),
                ("B", "precision"),
                ("C", "missed"),
                ("D", "circling"),
                ("E", "landing"),
            ],
        ),
        (
            7,
            &[
                ("A", "loss-of-comm"),
                ("B", "one-engine-inop"),
                ("C", "one-engine-inop-approaches"),
                ("D", "loss-of-pfd"),
            ],
        ),
        (8, &[("A", "checking-equipment")]),
    ];

    tables
        .into_iter()
        .map(|(n, tasks)| {
            let tasks = tasks
                .iter()
                .map(|(letter, slug)| ((*letter).to_string(), (*slug).to_string()))
                .collect();
            (n.to_string(), tasks)
        })
        .collect()
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `ACS_SITE_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ACS_SITE_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any slug table key fails to parse as a section
    /// number or task letter, a slug contains characters unfit for a URI,
    /// or a task table references a section with no registered slug.
    pub fn validate(&self) -> Result<()> {
        let slug_re = slug_pattern();

        for (key, slug) in &self.slugs.sections {
            parse_section_key(key)?;
            if !slug_re.is_match(slug) {
                return Err(Error::config_validation(format!(
                    "section {key} has invalid slug \"{slug}\""
                )));
            }
        }

        for (key, tasks) in &self.slugs.tasks {
            parse_section_key(key)?;
            if !self.slugs.sections.contains_key(key) {
                return Err(Error::config_validation(format!(
                    "task slugs registered for section {key}, which has no section slug"
                )));
            }
            for (letter_key, slug) in tasks {
                parse_letter_key(letter_key)?;
                if !slug_re.is_match(slug) {
                    return Err(Error::config_validation(format!(
                        "task {letter_key} of section {key} has invalid slug \"{slug}\""
                    )));
                }
            }
        }

        if self.content.content_dir.is_empty() {
            return Err(Error::config_validation("content_dir must not be empty"));
        }
        if self.content.images_dir.is_empty() {
            return Err(Error::config_validation("images_dir must not be empty"));
        }

        Ok(())
    }

    /// Get the content repository root, resolving the default if not set.
    #[must_use]
    pub fn content_root(&self) -> PathBuf {
        self.content
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the resolved section tree directory.
    #[must_use]
    pub fn content_path(&self) -> PathBuf {
        self.content_root().join(&self.content.content_dir)
    }

    /// Get the resolved image tree directory.
    #[must_use]
    pub fn images_path(&self) -> PathBuf {
        self.content_root().join(&self.content.images_dir)
    }

    /// Look up the slug registered for a section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSectionSlug`] for an unregistered number —
    /// a configuration error, not a runtime condition to recover from.
    pub fn section_slug(&self, number: SectionNumber) -> Result<&str> {
        self.slugs
            .sections
            .get(&number.to_string())
            .map(String::as_str)
            .ok_or(Error::MissingSectionSlug(number.get()))
    }

    /// Look up the slug registered for a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTaskSlug`] for an unregistered pair.
    pub fn task_slug(&self, number: SectionNumber, letter: TaskLetter) -> Result<&str> {
        self.slugs
            .tasks
            .get(&number.to_string())
            .and_then(|tasks| tasks.get(&letter.to_string()))
            .map(String::as_str)
            .ok_or(Error::MissingTaskSlug {
                section: number.get(),
                letter: letter.as_char(),
            })
    }

    /// Build the site URI for a section: `/<number>-<slug>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the section has no registered slug.
    pub fn section_uri(&self, number: SectionNumber) -> Result<String> {
        Ok(format!("/{number}-{}", self.section_slug(number)?))
    }

    /// Build the site URI for a task:
    /// `/<number>-<section-slug>/<letter>-<task-slug>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the section or task has no registered slug.
    pub fn task_uri(&self, number: SectionNumber, letter: TaskLetter) -> Result<String> {
        Ok(format!(
            "/{number}-{}/{letter}-{}",
            self.section_slug(number)?,
            self.task_slug(number, letter)?
        ))
    }

    /// Find the section number registered for a slug, if any.
    ///
    /// Inverse of [`Config::section_slug`] for all registered numbers.
    #[must_use]
    pub fn section_for_slug(&self, slug: &str) -> Option<SectionNumber> {
        self.slugs
            .sections
            .iter()
            .find(|(_, s)| s.as_str() == slug)
            .and_then(|(key, _)| parse_section_key(key).ok())
    }
}

/// Slugs are lowercase alphanumeric words joined by single hyphens.
fn slug_pattern() -> &'static regex::Regex {
    static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex"))
}

fn parse_section_key(key: &str) -> Result<SectionNumber> {
    key.parse::<u8>()
        .map_err(|_| Error::config_validation(format!("\"{key}\" is not a section number")))
        .and_then(SectionNumber::new)
}

fn parse_letter_key(key: &str) -> Result<TaskLetter> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => TaskLetter::try_from(c),
        _ => Err(Error::config_validation(format!(
            "\"{key}\" is not a task letter"
        ))),
    }
}
