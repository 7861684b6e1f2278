use tracing::{Level, info, instrument};

use crate::hooks::{HookInput, HookOutput};
use crate::policy::Decision;
use crate::settings::GuardSettings;

/// Decide whether a tool invocation runs silently or requires confirmation.
#[instrument(level = Level::INFO, skip_all, fields(tool = %input.tool_name))]
pub fn check_permission(input: &HookInput, settings: &GuardSettings) -> HookOutput {
    let decision = evaluate(input, settings);
    HookOutput::from(decision)
}

/// The full decision for a hook input, trace included.
pub fn evaluate(input: &HookInput, settings: &GuardSettings) -> Decision {
    let decision = settings.engine().evaluate(&input.invocation());
    info!(
        outcome = %decision.outcome,
        category = %decision.trace.category,
        entry = ?decision.trace.entry.as_ref().map(ToString::to_string),
        "Permission decision"
    );
    decision
}
