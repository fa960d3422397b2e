//! `acsgen` - CLI for the acs-site data pipeline
//!
//! This binary drives the build-time pipeline: content-tree scanning, task
//! loading, image probing, and site-structure assembly.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use acs_site::acs::{SectionNumber, TaskLetter};
use acs_site::cli::{
    Cli, Command, ConfigCommand, ImagesCommand, SectionsCommand, StructureCommand, TaskCommand,
};
use acs_site::{assemble, init_logging, load_task, scan_images, scan_sections, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Structure(cmd) => handle_structure(&config, &cmd),
        Command::Sections(cmd) => handle_sections(&config, &cmd),
        Command::Task(cmd) => handle_task(&config, &cmd),
        Command::Images(cmd) => handle_images(&config, &cmd),
        Command::Check(_) => handle_check(&config),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_structure(config: &Config, cmd: &StructureCommand) -> anyhow::Result<()> {
    let structure = assemble(config)?;
    let json = if cmd.pretty {
        serde_json::to_string_pretty(&structure)?
    } else {
        serde_json::to_string(&structure)?
    };

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote site structure to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn handle_sections(config: &Config, cmd: &SectionsCommand) -> anyhow::Result<()> {
    let sections = scan_sections(config)?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    for section in &sections {
        println!("{}. {}  ({})", section.number, section.name, section.uri);
        for task in &section.tasks {
            println!("  Task {}. {}  ({})", task.letter, task.name, task.uri);
        }
    }
    Ok(())
}

fn handle_task(config: &Config, cmd: &TaskCommand) -> anyhow::Result<()> {
    let number = SectionNumber::new(cmd.section)?;
    let letter = TaskLetter::try_from(cmd.letter)?;
    let sections = scan_sections(config)?;
    let record = load_task(&sections, number, letter)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!(
        "Section {} ({}): Task {}. {}",
        number, record.meta.section.name, letter, record.meta.name
    );
    println!();
    println!("Objective: {}", record.meta.objective);
    println!();
    println!("References:");
    for reference in &record.meta.references {
        println!("  - {reference}");
    }
    println!();
    println!(
        "Items: {} knowledge, {} risk management, {} skills",
        record.knowledge.len(),
        record.risk_management.len(),
        record.skills.len()
    );
    if record.notes.is_some() {
        println!("Notes: present");
    }
    Ok(())
}

fn handle_images(config: &Config, cmd: &ImagesCommand) -> anyhow::Result<()> {
    let images = scan_images(&config.images_path())?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }

    for (key, meta) in &images {
        println!("{key}  {}x{}", meta.width, meta.height);
    }
    Ok(())
}

/// Full content-tree validation: everything the build would touch, touched.
fn handle_check(config: &Config) -> anyhow::Result<()> {
    let sections = scan_sections(config)?;
    let mut task_count = 0;
    for section in &sections {
        for task in &section.tasks {
            load_task(&sections, section.number, task.letter).with_context(|| {
                format!("task {} of section {}", task.letter, section.number)
            })?;
            task_count += 1;
        }
    }
    let images = scan_images(&config.images_path())?;

    println!(
        "OK: {} sections, {task_count} tasks, {} images",
        sections.len(),
        images.len()
    );
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Content]");
                println!("  Root:         {}", config.content_root().display());
                println!("  Sections:     {}", config.content_path().display());
                println!("  Images:       {}", config.images_path().display());
                println!();
                println!("[Slugs]");
                println!("  Sections:     {}", config.slugs.sections.len());
                println!(
                    "  Tasks:        {}",
                    config.slugs.tasks.values().map(std::collections::BTreeMap::len).sum::<usize>()
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
