//! Finding URL-like substrings in raw record text.

use regex::Regex;

use crate::error::LinkError;

/// Three surface forms are recognized: `<http...>` after whitespace, the
/// target of a markdown link `](http...)` and a bare URL between whitespace.
/// A bare URL ends at whitespace, a comma or a closing parenthesis; the
/// terminator is not consumed so the next URL keeps its leading space.
const URL_PATTERN: &str = r"\s<(http.+?)>|\]\((http.+?)\)|\s(http[^\s,)]+)";

/// Extracts URLs from free text.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    pub fn new() -> Result<Self, LinkError> {
        Ok(Self {
            pattern: Regex::new(URL_PATTERN)?,
        })
    }

    /// All URLs in `text`, in order of appearance. Duplicates are kept.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .flat_map(|caps| {
                (1..=3)
                    .filter_map(|i| caps.get(i))
                    .map(|m| m.as_str().to_string())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
