use crate::types::{Rule, RuleError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TARGET_FILE: &str = "src/lib/mockData.ts";
pub const DEFAULT_DONE_MESSAGE: &str = "File rewritten successfully.";

const FAMILY_MARKER: &str = "name: \"Família & Visitas\"";
const FAMILY_ICON_LINE: &str = "    icon: \"\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\",";

/// A target file and the rules applied to it, in order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuleSet {
    #[serde(default = "default_file", alias = "path")]
    pub file: PathBuf,

    #[serde(default = "default_done_message")]
    pub done_message: String,

    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_TARGET_FILE)
}

fn default_done_message() -> String {
    DEFAULT_DONE_MESSAGE.to_string()
}

impl RuleSet {
    /// Repairs the corrupted "Família & Visitas" icon in the mock data file.
    pub fn builtin() -> Self {
        Self {
            file: default_file(),
            done_message: "Arquivo corrigido com sucesso!".to_string(),
            rules: vec![Rule::new(FAMILY_MARKER, 2, FAMILY_ICON_LINE)
                .with_guard("icon:")
                .with_message("Ícone corrigido na linha {line}")],
        }
    }

    /// Checks every rule, returning the failures with their 1-based rule number.
    pub fn validate(&self) -> Result<(), Vec<(usize, RuleError)>> {
        let errors: Vec<(usize, RuleError)> = self
            .rules
            .iter()
            .enumerate()
            .filter_map(|(i, rule)| rule.validate().err().map(|e| (i + 1, e)))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub fn load_from_str(content: &str) -> Result<RuleSet> {
    toml::from_str(content).context("Failed to parse rule set")
}

pub fn load_from_path(path: &Path) -> Result<RuleSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule set at {:?}", path))?;
    load_from_str(&content).with_context(|| format!("Invalid rule set in {:?}", path))
}
