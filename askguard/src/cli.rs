use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "askguard")]
#[command(version)]
#[command(about = "Ask before an agent runs dangerous tools or touches files outside the project")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (default: $CLAUDE_PROJECT_DIR, $PROJECT_DIR, or the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum HooksCmd {
    /// Handle PreToolUse hook - called before a tool is executed
    #[command(name = "pre-tool-use")]
    PreToolUse,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Claude Code hook entry points
    #[command(subcommand)]
    Hook(HooksCmd),

    /// Show the decision for a tool invocation without running it
    ///
    /// Examples: `askguard explain bash "rm -rf build"`, `askguard explain write /etc/hosts`,
    /// or pipe `{"tool_name": ..., "tool_input": ...}` on stdin.
    Explain {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Tool: bash, write, edit, multiedit, or a full tool name
        tool: Option<String>,

        /// Command line (bash) or path (everything else)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show the effective rules and the file they came from
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Fail if the settings file cannot be read or parsed
        #[arg(long)]
        check: bool,
    },
}
