//! Tool invocations as seen by the decision engine.

use std::fmt;

use serde_json::Value;

/// Tool name of the shell tool.
pub const SHELL_TOOL: &str = "Bash";

/// Prefix marking tools served by an external MCP server: `mcp__<server>__<tool>`.
pub const NAMESPACE_PREFIX: &str = "mcp__";

/// The content-writing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriterKind {
    Write,
    Edit,
    MultiEdit,
}

impl WriterKind {
    pub fn from_tool_name(name: &str) -> Option<Self> {
        match name {
            "Write" => Some(WriterKind::Write),
            "Edit" => Some(WriterKind::Edit),
            "MultiEdit" => Some(WriterKind::MultiEdit),
            _ => None,
        }
    }

    pub fn tool_name(self) -> &'static str {
        match self {
            WriterKind::Write => "Write",
            WriterKind::Edit => "Edit",
            WriterKind::MultiEdit => "MultiEdit",
        }
    }
}

impl fmt::Display for WriterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_name())
    }
}

/// What kind of tool an invocation targets, decided once from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolKind {
    /// `Bash`: the input carries a command line.
    Shell,
    /// One of the content-writing tools.
    Writer(WriterKind),
    /// An `mcp__<namespace>__...` tool.
    Namespaced { namespace: String },
    /// Any other tool.
    Other,
}

impl ToolKind {
    pub fn classify(tool_name: &str) -> Self {
        if tool_name == SHELL_TOOL {
            return ToolKind::Shell;
        }
        if let Some(kind) = WriterKind::from_tool_name(tool_name) {
            return ToolKind::Writer(kind);
        }
        if let Some(rest) = tool_name.strip_prefix(NAMESPACE_PREFIX) {
            let namespace = rest.split("__").next().unwrap_or_default();
            return ToolKind::Namespaced {
                namespace: namespace.to_string(),
            };
        }
        ToolKind::Other
    }
}

/// One tool call: the tool's name and its argument tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    tool_name: String,
    input: Value,
    kind: ToolKind,
    command: String,
}

impl Invocation {
    /// Build an invocation. A non-object `input` is replaced by an empty mapping.
    pub fn new(tool_name: impl Into<String>, input: Value) -> Self {
        let tool_name = tool_name.into();
        let input = match input {
            Value::Object(_) => input,
            _ => Value::Object(Default::default()),
        };
        let kind = ToolKind::classify(&tool_name);
        let command = match kind {
            ToolKind::Shell => input
                .get("command")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string(),
            _ => String::new(),
        };
        Self {
            tool_name,
            input,
            kind,
            command,
        }
    }

    /// Convenience constructor for a shell invocation.
    pub fn shell(command: &str) -> Self {
        Self::new(SHELL_TOOL, serde_json::json!({ "command": command }))
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn input(&self) -> &Value {
        &self.input
    }

    pub fn kind(&self) -> &ToolKind {
        &self.kind
    }

    /// The trimmed shell command; empty for non-shell tools or a missing command.
    pub fn command(&self) -> &str {
        &self.command
    }
}
