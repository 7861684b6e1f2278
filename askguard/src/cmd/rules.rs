use std::path::Path;

use anyhow::{Context, Result};
use guard_settings::RuleEntry;
use serde_json::json;
use tracing::{Level, instrument};

use crate::settings::GuardSettings;
use crate::style;

/// Print the effective rule set and where it came from.
///
/// With `check`, an unreadable or malformed settings file is an error
/// instead of an empty rule set.
#[instrument(level = Level::TRACE)]
pub fn run(json_output: bool, check: bool, project_dir: Option<&Path>) -> Result<()> {
    let settings = if check {
        GuardSettings::try_load(project_dir).context("failed to load ask rules")?
    } else {
        GuardSettings::load(project_dir)
    };

    if json_output {
        let output = json!({
            "project_root": settings.project_root,
            "source": settings.source,
            "rules": settings.rules,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {}",
        style::bold("Project:"),
        settings.project_root.display()
    );
    match &settings.source {
        Some(source) => println!(
            "{} {} ({})",
            style::bold("Source: "),
            source.path.display(),
            source.level
        ),
        None => println!(
            "{} {}",
            style::bold("Source: "),
            style::dim("no settings file found; everything is allowed")
        ),
    }
    println!();

    print_entries("ask_always", &settings.rules.ask_always);
    print_entries("ask_outside_project", &settings.rules.ask_outside_project);

    println!("{}", style::header("write_allow_outside_project:"));
    if settings.rules.write_allow_outside_project.is_empty() {
        println!("  {}", style::dim("(none)"));
    }
    for location in &settings.rules.write_allow_outside_project {
        println!("  - {location}");
    }

    if check {
        println!();
        println!("{}", style::green("settings OK"));
    }
    Ok(())
}

fn print_entries(key: &str, entries: &[RuleEntry]) {
    println!("{}", style::header(&format!("{key}:")));
    if entries.is_empty() {
        println!("  {}", style::dim("(none)"));
    }
    for entry in entries {
        println!("  - {entry}");
    }
    println!();
}
