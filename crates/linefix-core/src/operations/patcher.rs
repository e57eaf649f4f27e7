use crate::document::Document;
use crate::matcher::{find_first, Marker};
use crate::operations::file_operations::{read_file_content, write_file_content};
use crate::types::{Outcome, PatchReport, Rule, RuleError, RuleReport};
use anyhow::Result;
use log::{debug, info, warn};
use std::path::Path;

/// Applies one rule to `doc`. Only the first marker match is considered.
pub fn apply_rule(doc: &mut Document, rule: &Rule) -> Result<Outcome, RuleError> {
    let marker = Marker::for_rule(rule)?;

    let Some(marker_idx) = find_first(doc.lines(), &marker) else {
        debug!("Marker {:?} not found", rule.marker);
        return Ok(Outcome::MarkerNotFound);
    };
    debug!("Marker {:?} found on line {}", rule.marker, marker_idx + 1);

    let target = marker_idx
        .checked_add(rule.offset)
        .and_then(|idx| doc.line(idx).map(|line| (idx, line)));
    let Some((target_idx, target)) = target else {
        return Ok(Outcome::TargetOutOfRange {
            marker_line: marker_idx + 1,
        });
    };

    if let Some(guard) = &rule.guard {
        if !target.contains(guard.as_str()) {
            return Ok(Outcome::GuardRejected {
                marker_line: marker_idx + 1,
                target_line: target_idx + 1,
            });
        }
    }

    if target == rule.replacement {
        return Ok(Outcome::AlreadyApplied {
            line: target_idx + 1,
        });
    }

    doc.replace_line(target_idx, &rule.replacement);
    Ok(Outcome::Patched {
        line: target_idx + 1,
    })
}

/// Applies `rules` in order to the same document.
pub fn apply_rules(doc: &mut Document, rules: &[Rule]) -> Result<Vec<RuleReport>, RuleError> {
    let mut reports = Vec::with_capacity(rules.len());

    for rule in rules {
        let outcome = apply_rule(doc, rule)?;
        if outcome.is_applied() {
            info!("Rule {:?}: {}", rule.marker, outcome);
        } else {
            warn!("Rule {:?} not applied: {}", rule.marker, outcome);
        }
        reports.push(RuleReport {
            rule: rule.clone(),
            outcome,
        });
    }

    Ok(reports)
}

/// Reads `path`, applies `rules`, and rewrites the file unless `dry_run`.
///
/// The file is rewritten even when no rule changed anything.
pub fn patch_file(path: &Path, rules: &[Rule], dry_run: bool) -> Result<PatchReport> {
    let content = read_file_content(path)?;
    let mut doc = Document::parse(&content);
    debug!("Read {} lines from {:?}", doc.len(), path);

    let reports = apply_rules(&mut doc, rules)?;

    if dry_run {
        info!("Dry run, leaving {:?} untouched", path);
    } else {
        write_file_content(path, &doc.to_text())?;
        info!("Rewrote {:?}", path);
    }

    Ok(PatchReport {
        file_path: path.to_path_buf(),
        rules: reports,
        written: !dry_run,
    })
}
