pub mod config;
pub mod document;
pub mod matcher;
pub mod operations;
pub mod types;

pub use config::{load_from_path, load_from_str, RuleSet};
pub use document::Document;
pub use operations::{apply_rule, apply_rules, patch_file, run_preflight_checks};
pub use types::{MarkerKind, Outcome, PatchReport, Rule, RuleError, RuleReport};
