pub mod file_operations;
pub mod patcher;
pub mod preflight_checks;

pub use patcher::{apply_rule, apply_rules, patch_file};
pub use preflight_checks::run_preflight_checks;
