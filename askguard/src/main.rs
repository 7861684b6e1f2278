use clap::Parser;
use tracing::{error, info};

use askguard::cli::{Cli, Commands};
use askguard::cmd;
use askguard::errors::display_error;
use askguard::hooks::exit_code;
use askguard::tracing_init::init_tracing;

fn main() {
    init_tracing();
    let cli = Cli::parse();
    info!(args = ?std::env::args(), "askguard started");

    let project_dir = cli.project_dir.as_deref();
    let result = match cli.command {
        Commands::Hook(hook_cmd) => hook_cmd.run(project_dir),
        Commands::Explain { json, tool, args } => cmd::explain::run(json, tool, args, project_dir),
        Commands::Rules { json, check } => cmd::rules::run(json, check, project_dir),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        display_error(&e, cli.verbose);
        std::process::exit(1);
    }
    std::process::exit(exit_code::SUCCESS);
}
