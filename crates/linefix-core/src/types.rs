use crate::matcher::Marker;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_OFFSET: usize = 2;
pub const DEFAULT_MESSAGE: &str = "Patched line {line}";
pub const LINE_PLACEHOLDER: &str = "{line}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    #[default]
    Literal,
    Regex,
}

/// One edit: find the first line matching `marker`, then replace the line
/// `offset` positions below it with `replacement` if it contains `guard`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Rule {
    pub marker: String,

    #[serde(default)]
    pub marker_kind: MarkerKind,

    #[serde(default = "default_offset")]
    pub offset: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,

    pub replacement: String,

    #[serde(default = "default_message")]
    pub message: String,
}

fn default_offset() -> usize {
    DEFAULT_OFFSET
}

fn default_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

impl Rule {
    pub fn new(marker: &str, offset: usize, replacement: &str) -> Self {
        Self {
            marker: marker.to_string(),
            marker_kind: MarkerKind::Literal,
            offset,
            guard: None,
            replacement: replacement.to_string(),
            message: default_message(),
        }
    }

    pub fn with_guard(mut self, guard: &str) -> Self {
        self.guard = Some(guard.to_string());
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    pub fn with_kind(mut self, kind: MarkerKind) -> Self {
        self.marker_kind = kind;
        self
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        Marker::for_rule(self).map(|_| ())
    }

    /// Status line for a patched target, `line` being 1-based.
    pub fn render_message(&self, line: usize) -> String {
        self.message.replace(LINE_PLACEHOLDER, &line.to_string())
    }
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("marker must not be empty")]
    EmptyMarker,

    #[error("offset must be at least 1")]
    ZeroOffset,

    #[error("replacement must be a single line")]
    MultilineReplacement,

    #[error("invalid marker pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result of applying one rule. Line numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Patched { line: usize },
    AlreadyApplied { line: usize },
    MarkerNotFound,
    TargetOutOfRange { marker_line: usize },
    GuardRejected { marker_line: usize, target_line: usize },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Patched { .. } | Outcome::AlreadyApplied { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Patched { line } => write!(f, "patched line {}", line),
            Outcome::AlreadyApplied { line } => write!(f, "line {} already up to date", line),
            Outcome::MarkerNotFound => write!(f, "marker not found"),
            Outcome::TargetOutOfRange { marker_line } => write!(
                f,
                "marker found on line {} but target line is past end of file",
                marker_line
            ),
            Outcome::GuardRejected {
                marker_line,
                target_line,
            } => write!(
                f,
                "marker found on line {} but line {} failed the guard check",
                marker_line, target_line
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleReport {
    pub rule: Rule,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatchReport {
    pub file_path: PathBuf,
    pub rules: Vec<RuleReport>,
    pub written: bool,
}

impl PatchReport {
    pub fn changed(&self) -> bool {
        self.rules
            .iter()
            .any(|r| matches!(r.outcome, Outcome::Patched { .. }))
    }

    pub fn all_applied(&self) -> bool {
        self.rules.iter().all(|r| r.outcome.is_applied())
    }
}
