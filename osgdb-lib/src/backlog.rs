//! Maintenance of the plain URL lists (backlog and rejected entries).

use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;

use osgdb_core::util::sort_casefold;

use crate::error::MaintError;

const WEB_ARCHIVE_PREFIX: &str = "https://web.archive.org/web";

/// Reduce a URL to a comparable form: no scheme, no `www.`, and no
/// trailing `/`, `.git` or `/index.html`.
pub fn strip_url(url: &str) -> String {
    let mut url = url.trim();
    for prefix in ["http://", "https://"] {
        if let Some(rest) = url.strip_prefix(prefix) {
            url = rest;
        }
    }
    if let Some(rest) = url.strip_prefix("www.") {
        url = rest;
    }
    for suffix in ["/", ".git", "/index.html"] {
        if let Some(rest) = url.strip_suffix(suffix) {
            url = rest;
        }
    }
    url.to_string()
}

/// The archived address behind a web.archive.org link.
pub fn archived_original(url: &str) -> Option<&str> {
    if !url.starts_with(WEB_ARCHIVE_PREFIX) {
        return None;
    }
    let offset = url[5..].find("http")? + 5;
    Some(&url[offset..])
}

/// URLs mentioned in the rejected list. Each rejected item lists its
/// URLs comma separated in parentheses: `Name (http://a, http://b): reason`.
pub fn rejected_urls(text: &str) -> Result<Vec<String>, MaintError> {
    let pattern =
        Regex::new(r"\((http.*?)\)").map_err(|e| MaintError::config(e.to_string()))?;
    Ok(pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .flat_map(|m| m.as_str().split(','))
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect())
}

/// Deduplicate and sort lines case-insensitively. Blank lines are dropped.
pub fn sorted_unique_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = lines.into_iter().filter(|l| !l.trim().is_empty()).collect();
    let mut lines: Vec<String> = unique.into_iter().map(str::to_string).collect();
    sort_casefold(&mut lines);
    lines
}

/// Remove every backlog line whose stripped form matches one of `known`
/// (or the original behind an archived link in `known`), then deduplicate
/// and sort what is left.
pub fn clean_backlog<'a>(backlog: &str, known: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut excluded = BTreeSet::new();
    for url in known {
        excluded.insert(strip_url(url));
        if let Some(original) = archived_original(url) {
            excluded.insert(strip_url(original));
        }
    }
    sorted_unique_lines(
        backlog
            .lines()
            .filter(|line| !excluded.contains(&strip_url(line))),
    )
}

/// First token of every non-blank backlog line.
pub fn backlog_urls(backlog: &str) -> Vec<&str> {
    backlog
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect()
}

/// Sort and deduplicate a text file in place. Returns the number of lines.
pub fn sort_text_file(path: &Path) -> Result<usize, MaintError> {
    let text = std::fs::read_to_string(path).map_err(|e| MaintError::io(path, e))?;
    let lines = sorted_unique_lines(text.lines());
    write_lines(path, &lines)?;
    Ok(lines.len())
}

/// Write lines joined by newlines, with a trailing newline.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), MaintError> {
    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    std::fs::write(path, text).map_err(|e| MaintError::io(path, e))
}
