use crate::types::{MarkerKind, Rule, RuleError};
use regex::Regex;

#[derive(Debug, Clone)]
pub enum Marker {
    Literal(String),
    Pattern(Regex),
}

impl Marker {
    pub fn compile(pattern: &str, kind: MarkerKind) -> Result<Self, RuleError> {
        if pattern.is_empty() {
            return Err(RuleError::EmptyMarker);
        }

        match kind {
            MarkerKind::Literal => Ok(Marker::Literal(pattern.to_string())),
            MarkerKind::Regex => Regex::new(pattern)
                .map(Marker::Pattern)
                .map_err(|e| RuleError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source: e,
                }),
        }
    }

    /// Checks the rule's offset and replacement, then compiles its marker.
    pub fn for_rule(rule: &Rule) -> Result<Self, RuleError> {
        if rule.offset == 0 {
            return Err(RuleError::ZeroOffset);
        }
        if rule.replacement.contains('\n') {
            return Err(RuleError::MultilineReplacement);
        }
        Self::compile(&rule.marker, rule.marker_kind)
    }

    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Marker::Literal(s) => line.contains(s.as_str()),
            Marker::Pattern(re) => re.is_match(line),
        }
    }
}

/// Index of the first line matching `marker`. Later matches are ignored.
pub fn find_first(lines: &[String], marker: &Marker) -> Option<usize> {
    lines.iter().position(|line| marker.is_match(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_literal_substring_match() {
        let src = lines(&["a", "  name: \"Família & Visitas\",", "b"]);
        let marker = Marker::compile("name: \"Família & Visitas\"", MarkerKind::Literal).unwrap();
        assert_eq!(find_first(&src, &marker), Some(1));
    }

    #[test]
    fn test_literal_does_not_interpret_regex() {
        let src = lines(&["price: 1+1", "price: 11"]);
        let marker = Marker::compile("1+1", MarkerKind::Literal).unwrap();
        assert_eq!(find_first(&src, &marker), Some(0));

        let marker = Marker::compile("a.c", MarkerKind::Literal).unwrap();
        assert!(!marker.is_match("abc"));
    }

    #[test]
    fn test_regex_marker() {
        let src = lines(&["id: 1", "name: \"Visitas\"", "name: \"Outro\""]);
        let marker = Marker::compile(r#"^name: "\w+"$"#, MarkerKind::Regex).unwrap();
        assert_eq!(find_first(&src, &marker), Some(1));
    }

    #[test]
    fn test_first_match_only() {
        let src = lines(&["x", "m", "y", "m"]);
        let marker = Marker::compile("m", MarkerKind::Literal).unwrap();
        assert_eq!(find_first(&src, &marker), Some(1));
    }

    #[test]
    fn test_no_match() {
        let src = lines(&["x", "y"]);
        let marker = Marker::compile("z", MarkerKind::Literal).unwrap();
        assert_eq!(find_first(&src, &marker), None);
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(
            Marker::compile("", MarkerKind::Literal),
            Err(RuleError::EmptyMarker)
        ));
        assert!(matches!(
            Marker::compile("[", MarkerKind::Regex),
            Err(RuleError::InvalidPattern { .. })
        ));
    }
}
