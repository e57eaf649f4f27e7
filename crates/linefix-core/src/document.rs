/// Text held as lines split on `\n`.
///
/// Splitting keeps `\r` and a trailing empty line, so `to_text` reproduces
/// the original content exactly when no line was replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(|s| s.to_string()).collect(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Replaces the line at `index`, returning the previous text.
    pub fn replace_line(&mut self, index: usize, text: &str) -> Option<String> {
        let slot = self.lines.get_mut(index)?;
        Some(std::mem::replace(slot, text.to_string()))
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}
