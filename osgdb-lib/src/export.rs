//! Machine-readable exports: the JSON snapshot for the web table and the
//! repository manifest for local mirroring.

use std::collections::BTreeSet;

use serde::Serialize;

use osgdb_core::util::casefold_key;
use osgdb_core::{Entry, Field};

/// Column headings of the JSON snapshot.
pub const SNAPSHOT_HEADINGS: [&str; 6] =
    ["Game", "Description", "Download", "State", "Keywords", "Source"];

/// Maximum length of the description column.
pub const DESCRIPTION_WIDTH: usize = 60;
const DESCRIPTION_PLACEHOLDER: &str = "..";

/// Marks a further code repository that should be mirrored too.
pub const ADDITIONAL_REPO_MARKER: &str = "@add";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonSnapshot {
    pub headings: Vec<String>,
    pub data: Vec<Vec<String>>,
}

/// Collapse whitespace and cut `text` at a word boundary so that, with the
/// placeholder appended, it is at most `width` characters long.
pub fn shorten(text: &str, width: usize, placeholder: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let joined = words.join(" ");
    if joined.chars().count() <= width {
        return joined;
    }

    let budget = width.saturating_sub(placeholder.chars().count());
    let mut out = String::new();
    for word in words {
        let extra = if out.is_empty() { 0 } else { 1 };
        if out.chars().count() + extra + word.chars().count() > budget {
            break;
        }
        if extra == 1 {
            out.push(' ');
        }
        out.push_str(word);
    }
    out.push_str(placeholder);
    out
}

/// One table row per entry, sorted case-insensitively by the first column.
pub fn build_snapshot(entries: &[Entry], entry_base_url: &str) -> JsonSnapshot {
    let mut data: Vec<Vec<String>> = entries
        .iter()
        .map(|e| snapshot_row(e, entry_base_url))
        .collect();
    data.sort_by_cached_key(|row| casefold_key(&row[0]));
    JsonSnapshot {
        headings: SNAPSHOT_HEADINGS.iter().map(|h| h.to_string()).collect(),
        data,
    }
}

fn snapshot_row(entry: &Entry, entry_base_url: &str) -> Vec<String> {
    let home = entry.texts(Field::Home).next().unwrap_or_default();
    let game = format!(
        "{} (<a href=\"{home}\">home</a>, <a href=\"{entry_base_url}{}\">entry</a>)",
        entry.title, entry.file
    );
    let description = shorten(&entry.note, DESCRIPTION_WIDTH, DESCRIPTION_PLACEHOLDER);

    let download = entry
        .texts(Field::Download)
        .next()
        .map(|url| format!("<a href=\"{url}\">Link</a>"))
        .unwrap_or_default();

    let state = match entry.state {
        Some(state) => {
            let activity = match state.inactive_since {
                Some(year) => format!("inactive since {year}"),
                None => "active".to_string(),
            };
            format!("{} / {activity}", state.status.as_str())
        }
        None => String::new(),
    };

    let keywords = entry.texts(Field::Keywords).collect::<Vec<_>>().join(", ");

    let mut source = Vec::new();
    if let Some(repo) = entry.texts(Field::CodeRepository).next() {
        source.push(format!("<a href=\"{repo}\">Source</a>"));
    }
    source.push(entry.texts(Field::CodeLanguage).collect::<Vec<_>>().join(", "));
    source.push(entry.texts(Field::CodeLicense).collect::<Vec<_>>().join(", "));

    vec![game, description, download, state, keywords, source.join(" - ")]
}

/// Version control system of a repository URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RepoKind {
    Git,
    Svn,
    Hg,
}

const GIT_SERVICES: &[&str] = &[
    "https://git.tuxfamily.org/",
    "http://git.pond.sub.org/",
    "https://gitorious.org/",
    "https://git.code.sf.net/p/",
    "https://git.savannah.gnu.org/cgit/",
];

/// Hosts whose web URLs become clone URLs by appending `.git`.
const GIT_WEB_HOSTS: &[&str] = &["https://github.com/", "https://gitlab.com/"];

const SVN_SERVICES: &[&str] = &[
    "https://svn.code.sf.net/p/",
    "http://svn.uktrainsim.com/svn/",
    "http://svn.savannah.gnu.org/svn/",
    "svn://",
    "https://svn.icculus.org/",
    "http://svn.icculus.org/",
];

impl RepoKind {
    /// Classify a repository URL, returning the URL to clone from.
    pub fn classify(url: &str) -> Option<(RepoKind, String)> {
        if (url.starts_with("https://") && url.ends_with(".git"))
            || url.starts_with("git://")
            || GIT_SERVICES.iter().any(|s| url.starts_with(s))
        {
            return Some((Self::Git, url.to_string()));
        }
        if GIT_WEB_HOSTS.iter().any(|s| url.starts_with(s)) {
            return Some((Self::Git, format!("{url}.git")));
        }
        if SVN_SERVICES.iter().any(|s| url.starts_with(s)) {
            return Some((Self::Svn, url.to_string()));
        }
        if url.starts_with("https://bitbucket.org/") || url.starts_with("http://hg.") {
            return Some((Self::Hg, url.to_string()));
        }
        None
    }
}

/// Primary repositories grouped by system, sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoManifest {
    pub git: Vec<String>,
    pub svn: Vec<String>,
    pub hg: Vec<String>,
}

/// A repository that could not be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclassifiedRepo {
    pub file: String,
    pub url: String,
}

/// Collect the first code repository of every entry plus every further one
/// commented `@add`.
pub fn build_manifest(entries: &[Entry]) -> (RepoManifest, Vec<UnclassifiedRepo>) {
    let mut git = BTreeSet::new();
    let mut svn = BTreeSet::new();
    let mut hg = BTreeSet::new();
    let mut unclassified = Vec::new();

    for entry in entries {
        let repos = entry.values(Field::CodeRepository);
        let selected = repos.iter().enumerate().filter(|(i, v)| {
            *i == 0
                || v.comment
                    .as_deref()
                    .is_some_and(|c| c.contains(ADDITIONAL_REPO_MARKER))
        });
        for (_, value) in selected {
            match RepoKind::classify(&value.text) {
                Some((RepoKind::Git, url)) => {
                    git.insert(url);
                }
                Some((RepoKind::Svn, url)) => {
                    svn.insert(url);
                }
                Some((RepoKind::Hg, url)) => {
                    hg.insert(url);
                }
                None => unclassified.push(UnclassifiedRepo {
                    file: entry.file.clone(),
                    url: value.text.clone(),
                }),
            }
        }
    }

    let manifest = RepoManifest {
        git: git.into_iter().collect(),
        svn: svn.into_iter().collect(),
        hg: hg.into_iter().collect(),
    };
    (manifest, unclassified)
}

/// Hosts reported in the git repository summary.
pub const GIT_HOSTS: &[&str] = &[
    "repo.or.cz",
    "anongit.kde.org",
    "bitbucket.org",
    "git.code.sf.net",
    "git.savannah",
    "git.tuxfamily",
    "github.com",
    "gitlab.com",
    "gitlab.com/osgames",
    "gitlab.gnome.org",
];

/// Number of git repositories on each of [`GIT_HOSTS`].
pub fn git_host_counts(manifest: &RepoManifest) -> Vec<(&'static str, usize)> {
    GIT_HOSTS
        .iter()
        .map(|host| (*host, manifest.git.iter().filter(|u| u.contains(host)).count()))
        .collect()
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
