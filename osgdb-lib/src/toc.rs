//! Table-of-contents documents and the summary block of the README.
//!
//! Generation is a pure function of the entries: the same store yields
//! byte-identical documents. Writing replaces the whole TOC directory.

use std::path::Path;

use osgdb_core::util::{capitalize, sort_casefold};
use osgdb_core::{Entry, Field, Platform, Schema};

use crate::error::{MaintError, RegionError};

/// First line of every generated document.
pub const AUTOGENERATED_HEADER: &str = "[comment]: # (autogenerated content, do not edit)";

/// Delimiters of the generated region in the README.
pub const REGION_START: &str = "[comment]: # (start of autogenerated content, do not edit)";
pub const REGION_END: &str = "[comment]: # (end of autogenerated content)";

/// Link prefix from the README into the TOC directory.
const TOCS_LINK_PREFIX: &str = "entries/tocs/";

/// The four disjoint primary buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimaryCategory {
    Game,
    Tool,
    Framework,
    Library,
}

impl PrimaryCategory {
    /// Display order in the summary.
    pub const ALL: [PrimaryCategory; 4] = [Self::Game, Self::Tool, Self::Framework, Self::Library];

    /// Bucket of an entry. Precedence is tool, framework, library; anything
    /// with none of those keywords is a game.
    pub fn of(entry: &Entry) -> Self {
        [Self::Tool, Self::Framework, Self::Library]
            .into_iter()
            .find(|c| c.keyword().is_some_and(|k| entry.has_keyword(k)))
            .unwrap_or(Self::Game)
    }

    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Game => None,
            Self::Tool => Some("tool"),
            Self::Framework => Some("framework"),
            Self::Library => Some("library"),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Game => "Games",
            Self::Tool => "Tools",
            Self::Framework => "Frameworks",
            Self::Library => "Libraries",
        }
    }

    pub fn file_name(&self) -> String {
        format!("_{}.md", self.title().to_lowercase())
    }
}

/// One generated TOC file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocDocument {
    pub file_name: String,
    pub title: String,
    /// Anchor used when linking from the README.
    pub anchor: String,
    pub count: usize,
    pub content: String,
}

impl TocDocument {
    fn new(file_name: String, title: String, anchor: String, entries: &[&Entry]) -> Self {
        Self {
            content: render_toc(&title, entries),
            count: entries.len(),
            file_name,
            title,
            anchor,
        }
    }

    fn summary_link(&self) -> String {
        format!(
            "**[{}]({TOCS_LINK_PREFIX}{}#{})** ({})",
            self.title, self.file_name, self.anchor, self.count
        )
    }
}

/// All TOC documents of a store, grouped as they appear in the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocSet {
    pub primary: Vec<TocDocument>,
    pub categories: Vec<TocDocument>,
    pub platforms: Vec<TocDocument>,
}

impl TocSet {
    pub fn documents(&self) -> impl Iterator<Item = &TocDocument> {
        self.primary
            .iter()
            .chain(&self.categories)
            .chain(&self.platforms)
    }

    /// Text for the README region: primary buckets, then categories sorted
    /// by their link text, then platforms in canonical order.
    pub fn summary(&self) -> String {
        let primary: Vec<String> = self.primary.iter().map(TocDocument::summary_link).collect();
        let mut categories: Vec<String> =
            self.categories.iter().map(TocDocument::summary_link).collect();
        categories.sort();
        let platforms: Vec<String> = self.platforms.iter().map(TocDocument::summary_link).collect();

        format!(
            "{}\n\nBy category: {}\n\nBy platform: {}\n",
            primary.join(" - "),
            categories.join(", "),
            platforms.join(", ")
        )
    }
}

/// Render one TOC: header, title and one bullet per entry sorted
/// case-insensitively.
pub fn render_toc(title: &str, entries: &[&Entry]) -> String {
    let mut rows: Vec<String> = entries.iter().map(|e| toc_row(e)).collect();
    sort_casefold(&mut rows);

    let mut text = format!("{AUTOGENERATED_HEADER}\n# {title}\n\n");
    for row in rows {
        text.push_str(&row);
        text.push('\n');
    }
    text
}

fn toc_row(entry: &Entry) -> String {
    let mut info: Vec<String> = entry
        .texts(Field::CodeLanguage)
        .chain(entry.texts(Field::CodeLicense))
        .map(str::to_string)
        .collect();
    if let Some(state) = entry.state {
        info.extend(state.to_values().into_iter().map(|v| v.text));
    }
    format!(
        "- **[{}](../{})** ({})",
        entry.title,
        entry.file,
        info.join(", ")
    )
}

/// Build every TOC document from the entries.
pub fn generate_tocs(entries: &[Entry], schema: &Schema) -> TocSet {
    let primary = PrimaryCategory::ALL
        .iter()
        .map(|category| {
            let members: Vec<&Entry> = entries
                .iter()
                .filter(|e| PrimaryCategory::of(e) == *category)
                .collect();
            TocDocument::new(
                category.file_name(),
                category.title().to_string(),
                category.title().to_string(),
                &members,
            )
        })
        .collect();

    let categories = schema
        .recommended_keywords
        .iter()
        .map(|keyword| {
            let members: Vec<&Entry> = entries.iter().filter(|e| e.has_keyword(keyword)).collect();
            let name = keyword.replace(' ', "-");
            TocDocument::new(format!("_{name}.md"), capitalize(keyword), name, &members)
        })
        .collect();

    let platforms = Platform::all()
        .iter()
        .map(|platform| {
            let members: Vec<&Entry> = entries
                .iter()
                .filter(|e| e.has_value(Field::Platform, platform.name()))
                .collect();
            TocDocument::new(
                format!("_{}.md", platform.slug()),
                platform.name().to_string(),
                platform.slug().to_string(),
                &members,
            )
        })
        .collect();

    TocSet {
        primary,
        categories,
        platforms,
    }
}

/// Replace the text strictly between the region markers of `document` by
/// `content`. Text outside the markers is kept byte for byte.
pub fn replace_autogenerated_region(document: &str, content: &str) -> Result<String, RegionError> {
    let starts = document.matches(REGION_START).count();
    let ends = document.matches(REGION_END).count();
    match (starts, ends) {
        (1, 1) => {}
        (0, _) | (_, 0) => return Err(RegionError::Missing),
        _ => return Err(RegionError::Duplicated { starts, ends }),
    }

    let (Some(start), Some(end)) = (document.find(REGION_START), document.find(REGION_END)) else {
        return Err(RegionError::Missing);
    };
    let inner_start = start + REGION_START.len();
    if end < inner_start {
        return Err(RegionError::Malformed);
    }

    // The newline before the end marker keeps it out of the preceding list.
    Ok(format!(
        "{}\n{content}\n{}",
        &document[..inner_start],
        &document[end..]
    ))
}

/// Delete every file in `dir` and write the documents. Returns the number of
/// documents written.
pub fn write_tocs(dir: &Path, tocs: &TocSet) -> Result<usize, MaintError> {
    std::fs::create_dir_all(dir).map_err(|e| MaintError::io(dir, e))?;

    let existing = std::fs::read_dir(dir).map_err(|e| MaintError::io(dir, e))?;
    for item in existing.filter_map(|e| e.ok()) {
        let path = item.path();
        if path.is_file() {
            std::fs::remove_file(&path).map_err(|e| MaintError::io(&path, e))?;
        }
    }

    let mut written = 0;
    for doc in tocs.documents() {
        let path = dir.join(&doc.file_name);
        std::fs::write(&path, &doc.content).map_err(|e| MaintError::io(&path, e))?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
#[path = "tests/toc_tests.rs"]
mod tests;
