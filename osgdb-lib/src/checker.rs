//! Cross-entry consistency checks.
//!
//! The checks only read the store. Everything they notice is returned as a
//! [`Finding`] for the operator; nothing here fails.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use osgdb_core::schema::collapse_keyword;
use osgdb_core::util::casefold_key;
use osgdb_core::{Entry, Field, Platform, Schema};

use crate::similarity::SimilarityScorer;

/// Keywords marking an entry as something other entries can depend on.
pub const DEPENDENCY_KEYWORDS: &[&str] = &["framework", "library", "game engine"];

#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// Two distinct keywords that are probably the same.
    SimilarKeywords {
        first: String,
        first_count: usize,
        second: String,
        second_count: usize,
    },
    /// A `Code dependencies` value without a matching entry.
    UnknownDependency { name: String, count: usize },
    /// `Play` is set but `Platform` is missing.
    PlayWithoutPlatform { file: String },
    /// `Play` is set but `Platform` does not list `Web`.
    PlayWithoutWeb { file: String },
    /// A line of the entry template left in an entry.
    TemplateLeftover { file: String, line: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimilarKeywords {
                first,
                first_count,
                second,
                second_count,
            } => write!(
                f,
                "Keywords {first} ({first_count}) - {second} ({second_count}) are similar"
            ),
            Self::UnknownDependency { name, count } => {
                write!(f, "Code dependency {name} ({count}) has no entry")
            }
            Self::PlayWithoutPlatform { file } => write!(
                f,
                "Entry \"{file}\" has \"Play\" field but not \"Platform\" field, add it with \"Web\""
            ),
            Self::PlayWithoutWeb { file } => write!(
                f,
                "Entry \"{file}\" has \"Play\" field but not \"Web\" in \"Platform\" field"
            ),
            Self::TemplateLeftover { file, line } => write!(f, "{file}: found {line}"),
        }
    }
}

pub struct ConsistencyChecker<'a> {
    schema: &'a Schema,
    scorer: &'a dyn SimilarityScorer,
    threshold: f64,
}

impl<'a> ConsistencyChecker<'a> {
    pub fn new(schema: &'a Schema, scorer: &'a dyn SimilarityScorer, threshold: f64) -> Self {
        Self {
            schema,
            scorer,
            threshold,
        }
    }

    /// Run every store-wide check.
    pub fn check(&self, entries: &[Entry]) -> Vec<Finding> {
        let mut findings = self.similar_keywords(entries);
        findings.extend(self.unknown_dependencies(entries));
        findings.extend(play_requires_web(entries));
        findings
    }

    /// Pairs of distinct keywords scoring above the threshold. Multiplayer
    /// keywords are collapsed first.
    pub fn similar_keywords(&self, entries: &[Entry]) -> Vec<Finding> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in entries {
            for keyword in entry.texts(Field::Keywords) {
                *counts.entry(collapse_keyword(keyword)).or_default() += 1;
            }
        }

        let unique: Vec<(&str, usize)> = counts.into_iter().collect();
        let mut findings = Vec::new();
        for (i, (first, first_count)) in unique.iter().enumerate() {
            for (second, second_count) in &unique[i + 1..] {
                if self.scorer.score(first, second) > self.threshold {
                    findings.push(Finding::SimilarKeywords {
                        first: first.to_string(),
                        first_count: *first_count,
                        second: second.to_string(),
                        second_count: *second_count,
                    });
                }
            }
        }
        findings
    }

    /// Names that count as satisfied dependencies: the configured list of
    /// dependencies without entry plus the titles (or their aliases) of all
    /// frameworks, libraries and game engines.
    pub fn valid_dependencies(&self, entries: &[Entry]) -> BTreeSet<String> {
        let mut valid: BTreeSet<String> =
            self.schema.dependencies_without_entry.keys().cloned().collect();
        for entry in entries {
            if !DEPENDENCY_KEYWORDS.iter().any(|k| entry.has_keyword(k)) {
                continue;
            }
            match self.schema.dependency_aliases.get(&entry.title) {
                Some(aliases) => valid.extend(aliases.iter().cloned()),
                None => {
                    valid.insert(entry.title.clone());
                }
            }
        }
        valid
    }

    /// Referenced dependencies without entry, most referenced first.
    pub fn unknown_dependencies(&self, entries: &[Entry]) -> Vec<Finding> {
        let valid = self.valid_dependencies(entries);
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in entries {
            for dependency in entry.texts(Field::CodeDependencies) {
                if !valid.contains(dependency) {
                    *counts.entry(dependency).or_default() += 1;
                }
            }
        }

        let mut unknown: Vec<(&str, usize)> = counts.into_iter().collect();
        unknown.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| casefold_key(a.0).cmp(&casefold_key(b.0))));
        unknown
            .into_iter()
            .map(|(name, count)| Finding::UnknownDependency {
                name: name.to_string(),
                count,
            })
            .collect()
    }
}

/// Entries with a `Play` field must list the `Web` platform.
pub fn play_requires_web(entries: &[Entry]) -> Vec<Finding> {
    let web = Platform::Web.name();
    entries
        .iter()
        .filter(|e| e.has(Field::Play))
        .filter_map(|e| {
            if !e.has(Field::Platform) {
                Some(Finding::PlayWithoutPlatform {
                    file: e.file.clone(),
                })
            } else if !e.has_value(Field::Platform, web) {
                Some(Finding::PlayWithoutWeb {
                    file: e.file.clone(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Every non-empty template line that is not a heading and occurs verbatim
/// in an entry's raw text.
pub fn template_leftovers<'a>(
    template: &str,
    sources: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Vec<Finding> {
    let checks: Vec<&str> = template
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with("##"))
        .collect();

    let mut findings = Vec::new();
    for (file, text) in sources {
        for line in &checks {
            if text.contains(line) {
                findings.push(Finding::TemplateLeftover {
                    file: file.to_string(),
                    line: line.to_string(),
                });
            }
        }
    }
    findings
}

#[cfg(test)]
#[path = "tests/checker_tests.rs"]
mod tests;
