use std::io::{Read, Write};

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::policy::{Decision, Invocation, Outcome};

/// The PreToolUse hook input received from Claude Code via stdin.
///
/// Fields are read one by one: a missing, null or mistyped field becomes
/// empty without affecting the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookInput {
    pub session_id: String,
    pub transcript_path: String,
    pub cwd: String,
    pub permission_mode: String,
    pub hook_event_name: String,
    pub tool_name: String,
    pub tool_input: Value,
    pub tool_use_id: String,
}

impl HookInput {
    /// Parse from any reader (for testability).
    ///
    /// Empty or malformed input is logged and treated as `{}`. Only an I/O
    /// failure is an error.
    pub fn from_reader(mut reader: impl Read) -> anyhow::Result<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        if raw.trim().is_empty() {
            warn!("Empty hook input; treating as {{}}");
            return Ok(Self::default());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Ok(Self::from_value(&value)),
            Err(e) => {
                warn!(error = %e, "Malformed hook input; treating as {{}}");
                Ok(Self::default())
            }
        }
    }

    /// Parse from stdin (convenience wrapper for production).
    pub fn from_stdin() -> anyhow::Result<Self> {
        Self::from_reader(std::io::stdin().lock())
    }

    /// Pick the known fields out of a JSON payload. A non-object payload
    /// yields the default input.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            warn!(payload = %value, "Hook input is not an object; treating as {{}}");
            return Self::default();
        }
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            session_id: text("session_id"),
            transcript_path: text("transcript_path"),
            cwd: text("cwd"),
            permission_mode: text("permission_mode"),
            hook_event_name: text("hook_event_name"),
            tool_name: text("tool_name"),
            tool_input: value.get("tool_input").cloned().unwrap_or_default(),
            tool_use_id: text("tool_use_id"),
        }
    }

    /// The invocation the decision engine evaluates.
    pub fn invocation(&self) -> Invocation {
        Invocation::new(self.tool_name.clone(), self.tool_input.clone())
    }
}

/// Hook-specific output for PreToolUse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreToolUseOutput {
    pub hook_event_name: &'static str,
    pub permission_decision: Outcome,
    pub permission_decision_reason: String,
}

/// The complete hook output sent to Claude Code via stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: PreToolUseOutput,
}

impl HookOutput {
    fn with_outcome(outcome: Outcome, reason: impl Into<String>) -> Self {
        Self {
            hook_specific_output: PreToolUseOutput {
                hook_event_name: "PreToolUse",
                permission_decision: outcome,
                permission_decision_reason: reason.into(),
            },
        }
    }

    /// Create an "allow" response - the tool runs without a prompt.
    pub fn allow(reason: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Allow, reason)
    }

    /// Create an "ask" response - prompts user for confirmation.
    pub fn ask(reason: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Ask, reason)
    }

    pub fn outcome(&self) -> Outcome {
        self.hook_specific_output.permission_decision
    }

    pub fn reason(&self) -> &str {
        &self.hook_specific_output.permission_decision_reason
    }

    /// Write response to any writer (for testability).
    pub fn write_to(&self, mut writer: impl Write) -> anyhow::Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }

    /// Write response to stdout (convenience wrapper for production).
    pub fn write_stdout(&self) -> anyhow::Result<()> {
        self.write_to(std::io::stdout().lock())
    }
}

impl From<Decision> for HookOutput {
    fn from(decision: Decision) -> Self {
        Self::with_outcome(decision.outcome, decision.reason)
    }
}

/// Exit codes for hook responses
pub mod exit_code {
    /// Success - response written to stdout
    pub const SUCCESS: i32 = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ToolKind;
    use serde_json::json;

    fn sample_hook_json() -> &'static str {
        r#"{
            "session_id": "test-session",
            "transcript_path": "/tmp/transcript.jsonl",
            "cwd": "/home/user/project",
            "permission_mode": "default",
            "hook_event_name": "PreToolUse",
            "tool_name": "Bash",
            "tool_input": {"command": "git status", "timeout": 120000},
            "tool_use_id": "toolu_01ABC"
        }"#
    }

    #[test]
    fn test_parse_hook_input() {
        let input = HookInput::from_reader(sample_hook_json().as_bytes()).unwrap();
        assert_eq!(input.session_id, "test-session");
        assert_eq!(input.tool_name, "Bash");
        assert_eq!(input.hook_event_name, "PreToolUse");
        assert_eq!(input.invocation().command(), "git status");
    }

    #[test]
    fn test_partial_input_defaults() {
        let input = HookInput::from_reader(r#"{"tool_name": "Write"}"#.as_bytes()).unwrap();
        assert_eq!(input.tool_name, "Write");
        assert!(input.session_id.is_empty());
        assert_eq!(input.invocation().input(), &json!({}));
    }

    #[test]
    fn test_empty_and_malformed_input_are_empty_objects() {
        for raw in ["", "   \n", "{not json", "[1, 2]"] {
            let input = HookInput::from_reader(raw.as_bytes()).unwrap();
            assert_eq!(input, HookInput::default(), "{raw:?}");
            assert_eq!(input.invocation().kind(), &ToolKind::Other);
        }
    }

    #[test]
    fn test_mistyped_metadata_keeps_tool_fields() {
        let raw = r#"{
            "session_id": null,
            "cwd": 42,
            "tool_use_id": {"nested": true},
            "tool_name": "Bash",
            "tool_input": {"command": "rm -rf /"}
        }"#;
        let input = HookInput::from_reader(raw.as_bytes()).unwrap();
        assert_eq!(input.tool_name, "Bash");
        assert_eq!(input.invocation().command(), "rm -rf /");
        assert!(input.session_id.is_empty());
        assert!(input.cwd.is_empty());
    }

    #[test]
    fn test_mistyped_metadata_still_asks() {
        use crate::permissions::check_permission;
        use crate::settings::GuardSettings;
        use guard_settings::{RuleEntry, RuleSet};

        let settings = GuardSettings::with_rules(
            "/nonexistent-askguard/proj",
            RuleSet::new().with_ask_always(RuleEntry::bash("rm")),
        );
        let raw = r#"{"session_id": null, "tool_name": "Bash", "tool_input": {"command": "rm -rf /"}}"#;
        let input = HookInput::from_reader(raw.as_bytes()).unwrap();
        assert_eq!(check_permission(&input, &settings).outcome(), Outcome::Ask);
    }

    #[test]
    fn test_non_object_tool_input_is_empty() {
        let input =
            HookInput::from_reader(r#"{"tool_name": "Bash", "tool_input": "rm -rf /"}"#.as_bytes())
                .unwrap();
        assert_eq!(input.invocation().command(), "");
    }

    #[test]
    fn test_output_allow() {
        let output = HookOutput::allow("Safe command");
        let mut buf = Vec::new();
        output.write_to(&mut buf).unwrap();
        assert!(buf.ends_with(b"\n"));

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(
            json,
            json!({"hookSpecificOutput": {
                "hookEventName": "PreToolUse",
                "permissionDecision": "allow",
                "permissionDecisionReason": "Safe command"
            }})
        );
    }

    #[test]
    fn test_output_ask() {
        let output = HookOutput::ask("needs a look");
        let mut buf = Vec::new();
        output.write_to(&mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["hookSpecificOutput"]["permissionDecision"], "ask");
        assert_eq!(
            json["hookSpecificOutput"]["permissionDecisionReason"],
            "needs a look"
        );
    }
}
