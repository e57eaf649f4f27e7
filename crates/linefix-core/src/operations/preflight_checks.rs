use crate::operations::file_operations::is_read_only;
use crate::types::Rule;
use log::debug;
use std::path::Path;

/// Checks the target file and every rule before anything is written.
pub fn run_preflight_checks(path: &Path, rules: &[Rule]) -> Result<(), Vec<String>> {
    debug!("Running preflight checks for {:?}", path);
    let mut errors = Vec::new();
    let prefix = format!("  - Target '{:?}':", path);

    if !path.exists() {
        errors.push(format!("{} FAILED (File not found)", prefix));
    } else if !path.is_file() {
        errors.push(format!("{} FAILED (Not a regular file)", prefix));
    } else if is_read_only(path) {
        errors.push(format!("{} FAILED (File is read-only)", prefix));
    }

    for (i, rule) in rules.iter().enumerate() {
        if let Err(e) = rule.validate() {
            errors.push(format!(
                "  - Rule #{} ({:?}): FAILED ({})",
                i + 1,
                rule.marker,
                e
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_passes_for_writable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.ts");
        fs::write(&path, "x").unwrap();
        assert!(run_preflight_checks(&path, &[Rule::new("x", 1, "y")]).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let errors =
            run_preflight_checks(&dir.path().join("gone.ts"), &[Rule::new("x", 1, "y")])
                .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("File not found"));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let errors = run_preflight_checks(dir.path(), &[Rule::new("x", 1, "y")]).unwrap_err();
        assert!(errors[0].contains("Not a regular file"));
    }

    #[test]
    fn test_read_only_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locked.ts");
        fs::write(&path, "x").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&path, perms).unwrap();

        let errors = run_preflight_checks(&path, &[Rule::new("x", 1, "y")]).unwrap_err();
        assert!(errors[0].contains("read-only"));
    }

    #[test]
    fn test_collects_all_rule_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.ts");
        fs::write(&path, "x").unwrap();

        let rules = vec![
            Rule::new("", 1, "y"),
            Rule::new("ok", 1, "y"),
            Rule::new("x", 0, "y"),
        ];
        let errors = run_preflight_checks(&path, &rules).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Rule #1"));
        assert!(errors[1].contains("Rule #3"));
    }

    #[test]
    fn test_empty_rule_list_passes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.ts");
        fs::write(&path, "x").unwrap();
        assert!(run_preflight_checks(&path, &[]).is_ok());
    }
}
