//! `acs-site` - Build-time data pipeline for an instrument rating study site
//!
//! This library scans a curated content tree (section directories holding
//! TOML task documents and per-section image directories), parses it into
//! typed records, and assembles the site structure consumed by static page
//! rendering. Everything runs synchronously at build time; nothing here
//! serves requests.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod acs;
pub mod cli;
pub mod config;
pub mod error;
pub mod images;
pub mod logging;
pub mod scanner;
pub mod structure;
pub mod task;

pub use config::Config;
pub use error::{Error, Result};
pub use images::scan_images;
pub use logging::init_logging;
pub use scanner::scan_sections;
pub use structure::{assemble, SiteStructure};
pub use task::{load_task, load_task_by_name};
