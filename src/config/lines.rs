use std::fmt;
use std::path::Path;

/// Where a widget was declared in its source document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SourceLocation {
    /// Source file, when the document came from disk.
    pub file: Option<String>,
    /// 1-based line number.
    pub line: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file}:{}", self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

/// Line index of every `"alias": "..."` declaration in a document, in document order.
#[derive(Clone, Debug, Default)]
pub struct SourceLines {
    file: Option<String>,
    occurrences: Vec<(String, usize)>,
}

impl SourceLines {
    /// Scan `text` for alias declarations.
    pub fn scan(file: Option<&Path>, text: &str) -> Self {
        let mut occurrences = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let mut rest = line;
            while let Some(pos) = rest.find("\"alias\"") {
                rest = &rest[pos + "\"alias\"".len()..];
                if let Some((value, tail)) = quoted_value_after_colon(rest) {
                    occurrences.push((value, idx + 1));
                    rest = tail;
                }
            }
        }
        Self {
            file: file.map(|p| p.display().to_string()),
            occurrences,
        }
    }

    /// Match `aliases` (in document order) to their declaration lines.
    ///
    /// Each alias consumes the next unused occurrence with the same value, so repeated aliases
    /// in different frames map to their own lines.
    pub fn locate<'a>(
        &self,
        aliases: impl IntoIterator<Item = &'a str>,
    ) -> Vec<Option<SourceLocation>> {
        let mut cursor = 0usize;
        aliases
            .into_iter()
            .map(|alias| {
                let found = self.occurrences[cursor.min(self.occurrences.len())..]
                    .iter()
                    .position(|(a, _)| a == alias)?;
                let (_, line) = &self.occurrences[cursor + found];
                cursor += found + 1;
                Some(SourceLocation {
                    file: self.file.clone(),
                    line: *line,
                })
            })
            .collect()
    }
}

fn quoted_value_after_colon(s: &str) -> Option<(String, &str)> {
    let s = s.trim_start().strip_prefix(':')?.trim_start().strip_prefix('"')?;
    let mut out = String::new();
    let mut escaped = false;
    for (i, ch) in s.char_indices() {
        if escaped {
            out.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            return Some((out, &s[i + 1..]));
        } else {
            out.push(ch);
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/config/lines.rs"]
mod tests;
