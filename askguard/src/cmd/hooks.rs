use std::path::Path;

use anyhow::Result;
use tracing::{Level, instrument, warn};

use crate::cli::HooksCmd;
use crate::hooks::HookInput;
use crate::permissions::check_permission;
use crate::settings::GuardSettings;

impl HooksCmd {
    /// Answer one hook request on stdout. Unreadable input degrades to `{}`,
    /// so only a failed write to stdout is an error.
    #[instrument(level = Level::TRACE, skip(self))]
    pub fn run(&self, project_dir: Option<&Path>) -> Result<()> {
        let output = match self {
            Self::PreToolUse => {
                let input = HookInput::from_stdin().unwrap_or_else(|e| {
                    warn!(error = %e, "Failed to read hook input; treating as {{}}");
                    HookInput::default()
                });
                let settings = GuardSettings::load(project_dir);
                check_permission(&input, &settings)
            }
        };

        output.write_stdout()?;
        Ok(())
    }
}
