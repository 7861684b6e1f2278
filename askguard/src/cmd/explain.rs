use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tracing::{Level, instrument};

use crate::hooks::HookInput;
use crate::permissions::evaluate;
use crate::policy::WriterKind;
use crate::settings::GuardSettings;
use crate::style;

/// Build a hook input from `explain` arguments.
///
/// `bash` takes the rest as a command line; the writer tools take it as a
/// `file_path`; any other tool name takes it as a `path`.
pub fn synthetic_input(tool: &str, args: &[String]) -> HookInput {
    let rest = args.join(" ");
    let (tool_name, tool_input) = match tool.to_lowercase().as_str() {
        "bash" => ("Bash".to_string(), json!({ "command": rest })),
        lower => match ["Write", "Edit", "MultiEdit"]
            .into_iter()
            .find(|name| name.to_lowercase() == lower)
            .and_then(WriterKind::from_tool_name)
        {
            Some(kind) => (kind.tool_name().to_string(), json!({ "file_path": rest })),
            None if rest.is_empty() => (tool.to_string(), json!({})),
            None => (tool.to_string(), json!({ "path": rest })),
        },
    };
    HookInput {
        tool_name,
        tool_input,
        ..Default::default()
    }
}

/// Explain how a tool invocation would be decided.
///
/// Accepts CLI args (`askguard explain bash "rm -rf x"`) or JSON from stdin.
#[instrument(level = Level::TRACE)]
pub fn run(
    json_output: bool,
    tool: Option<String>,
    args: Vec<String>,
    project_dir: Option<&Path>,
) -> Result<()> {
    let input = match tool {
        Some(tool) => synthetic_input(&tool, &args),
        None => serde_json::from_reader::<_, Value>(std::io::stdin().lock())
            .map(|value| HookInput::from_value(&value))
            .context(
                "failed to parse JSON from stdin (expected {\"tool_name\":..., \"tool_input\":...})\n\nUsage: askguard explain bash \"rm -rf x\"  OR  echo '{...}' | askguard explain",
            )?,
    };

    let settings = GuardSettings::load(project_dir);
    let decision = evaluate(&input, &settings);

    if json_output {
        let output = json!({
            "tool_name": input.tool_name,
            "tool_input": input.tool_input,
            "project_root": settings.project_root,
            "source": settings.source,
            "decision": decision,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", style::bold("Input:"));
    println!("  {}     {}", style::cyan("tool:"), input.tool_name);
    match input.tool_input.get("command").and_then(Value::as_str) {
        Some(command) if input.tool_name == "Bash" => {
            println!("  {}  {}", style::cyan("command:"), command)
        }
        _ => println!("  {}    {}", style::cyan("input:"), input.tool_input),
    }
    println!(
        "  {}  {}",
        style::cyan("project:"),
        settings.project_root.display()
    );
    match &settings.source {
        Some(source) => println!(
            "  {}    {} ({})",
            style::cyan("rules:"),
            source.path.display(),
            source.level
        ),
        None => println!("  {}    {}", style::cyan("rules:"), style::dim("none")),
    }
    println!();

    println!(
        "{} {}",
        style::bold("Decision:"),
        style::outcome(decision.outcome)
    );
    println!("{}", style::bold("Reason:"));
    for line in decision.reason.lines() {
        println!("  {line}");
    }
    println!();

    println!("{}", style::header("Trace:"));
    for line in decision.trace.render() {
        println!("  {line}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn bash_joins_command_words() {
        let input = synthetic_input("bash", &args(&["rm", "-rf", "x"]));
        assert_eq!(input.tool_name, "Bash");
        assert_eq!(input.tool_input, json!({"command": "rm -rf x"}));
    }

    #[test]
    fn writer_tools_take_file_path() {
        let input = synthetic_input("multiedit", &args(&["/etc/hosts"]));
        assert_eq!(input.tool_name, "MultiEdit");
        assert_eq!(input.tool_input, json!({"file_path": "/etc/hosts"}));
    }

    #[test]
    fn other_tools_take_path() {
        let input = synthetic_input("mcp__fs__read", &args(&["notes/a.md"]));
        assert_eq!(input.tool_name, "mcp__fs__read");
        assert_eq!(input.tool_input, json!({"path": "notes/a.md"}));

        let bare = synthetic_input("mcp__db__drop", &[]);
        assert_eq!(bare.tool_input, json!({}));
    }
}
