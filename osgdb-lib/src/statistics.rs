//! The statistics report.
//!
//! [`Statistics::compute`] does all counting; [`Statistics::render`] only
//! formats. The timestamp is passed in so rendering stays deterministic.

use std::collections::BTreeMap;

use osgdb_core::schema::collapse_keyword;
use osgdb_core::util::{casefold_key, percent, sort_casefold};
use osgdb_core::{BuildingField, Entry, Field, Status};

use crate::toc::AUTOGENERATED_HEADER;

/// Hosts counted as popular code hosting sites.
pub const POPULAR_CODE_HOSTS: &[&str] = &[
    "github.com",
    "gitlab.com",
    "bitbucket.org",
    "code.sf.net",
    "code.launchpad.net",
];

const C_LANGUAGES: &[&str] = &["C", "C++"];
const DEFAULT_BUILD_SYSTEM: &str = "CMake";

/// Occurrence counts of the values of one field over the whole store,
/// ordered by descending count, ties case-insensitively by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    total: usize,
    rows: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut total = 0;
        for value in values {
            *counts.entry(value).or_default() += 1;
            total += 1;
        }
        let mut rows: Vec<(String, usize)> =
            counts.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| casefold_key(&a.0).cmp(&casefold_key(&b.0))));
        Self { total, rows }
    }

    /// Number of values seen, counting repeats.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn rows(&self) -> &[(String, usize)] {
        &self.rows
    }

    pub fn count(&self, name: &str) -> usize {
        self.rows
            .iter()
            .find(|(n, _)| n == name)
            .map_or(0, |(_, c)| *c)
    }

    /// Share of `name` among all values of the field.
    pub fn percent(&self, name: &str) -> f64 {
        percent(self.count(name), self.total)
    }

    fn render(&self) -> String {
        self.rows
            .iter()
            .map(|(name, count)| format!("- {name} ({:.1}%)\n", percent(*count, self.total)))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub total: usize,
    pub mature: usize,
    pub beta: usize,
    /// `(title, year)`, most recently inactive first.
    pub inactive: Vec<(String, u32)>,
    pub languages: FrequencyTable,
    pub licenses: FrequencyTable,
    pub keywords: FrequencyTable,
    pub without_download: Vec<String>,
    pub unpopular_repository: Vec<String>,
    pub with_dependencies: usize,
    pub dependencies: FrequencyTable,
    pub with_build_system: usize,
    pub build_systems: FrequencyTable,
    pub c_without_build_system: Vec<String>,
    pub c_not_cmake: Vec<String>,
    pub with_platform: usize,
    pub platforms: FrequencyTable,
}

impl Statistics {
    pub fn compute(entries: &[Entry]) -> Self {
        let count_status = |status: Status| {
            entries
                .iter()
                .filter(|e| e.state.is_some_and(|s| s.status == status))
                .count()
        };

        let mut inactive: Vec<(String, u32)> = entries
            .iter()
            .filter_map(|e| e.inactive_since().map(|y| (e.title.clone(), y)))
            .collect();
        inactive.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| casefold_key(&a.0).cmp(&casefold_key(&b.0))));

        let titles = |filter: &dyn Fn(&Entry) -> bool| {
            let mut titles: Vec<String> = entries
                .iter()
                .filter(|e| filter(e))
                .map(|e| e.title.clone())
                .collect();
            sort_casefold(&mut titles);
            titles
        };

        let is_c = |e: &Entry| C_LANGUAGES.iter().any(|l| e.has_value(Field::CodeLanguage, l));

        Self {
            total: entries.len(),
            mature: count_status(Status::Mature),
            beta: count_status(Status::Beta),
            inactive,
            languages: FrequencyTable::from_values(entries.iter().flat_map(|e| e.texts(Field::CodeLanguage))),
            licenses: FrequencyTable::from_values(entries.iter().flat_map(|e| e.texts(Field::CodeLicense))),
            keywords: FrequencyTable::from_values(
                entries
                    .iter()
                    .flat_map(|e| e.texts(Field::Keywords))
                    .map(collapse_keyword),
            ),
            without_download: titles(&|e| !e.has(Field::Download) && !e.has(Field::Play)),
            unpopular_repository: titles(&|e| {
                !e.texts(Field::CodeRepository)
                    .any(|r| POPULAR_CODE_HOSTS.iter().any(|h| r.contains(h)))
            }),
            with_dependencies: entries.iter().filter(|e| e.has(Field::CodeDependencies)).count(),
            dependencies: FrequencyTable::from_values(
                entries.iter().flat_map(|e| e.texts(Field::CodeDependencies)),
            ),
            with_build_system: entries.iter().filter(|e| !build_systems(e).is_empty()).count(),
            build_systems: FrequencyTable::from_values(entries.iter().flat_map(|e| build_systems(e))),
            c_without_build_system: titles(&|e| is_c(e) && build_systems(e).is_empty()),
            c_not_cmake: titles(&|e| {
                let systems = build_systems(e);
                is_c(e) && !systems.is_empty() && !systems.contains(&DEFAULT_BUILD_SYSTEM)
            }),
            with_platform: entries.iter().filter(|e| e.has(Field::Platform)).count(),
            platforms: FrequencyTable::from_values(entries.iter().flat_map(|e| e.texts(Field::Platform))),
        }
    }

    /// The report as Markdown. `timestamp` is printed verbatim.
    pub fn render(&self, timestamp: &str) -> String {
        let rel = |n: usize| percent(n, self.total);
        let mut s = format!("{AUTOGENERATED_HEADER}\n# Statistics\n\n");
        s += &format!("analyzed {} entries on {timestamp}\n\n", self.total);

        s += "## State\n\n";
        s += &format!(
            "- mature: {} ({:.1}%)\n- beta: {} ({:.1}%)\n- inactive: {} ({:.1}%)\n\n",
            self.mature,
            rel(self.mature),
            self.beta,
            rel(self.beta),
            self.inactive.len(),
            rel(self.inactive.len())
        );
        if !self.inactive.is_empty() {
            let list: Vec<String> = self
                .inactive
                .iter()
                .map(|(title, year)| format!("{title} ({year})"))
                .collect();
            s += &format!("##### Inactive State\n\n{}\n\n", list.join(", "));
        }

        s += "## Code Languages\n\n";
        s += &format!("##### Language frequency\n\n{}\n", self.languages.render());

        s += "## Code licenses\n\n";
        s += &format!("##### Licenses frequency\n\n{}\n", self.licenses.render());

        s += "## Keywords\n\n";
        s += &format!("##### Keywords frequency\n\n{}\n", self.keywords.render());

        s += "## Entries without download or play fields\n\n";
        s += &title_list(&self.without_download);

        s += "## Entries with a code repository not on a popular site\n\n";
        s += &title_list(&self.unpopular_repository);

        s += "## Code dependencies\n\n";
        s += &format!(
            "With code dependency field {} ({:.1}%)\n\n",
            self.with_dependencies,
            rel(self.with_dependencies)
        );
        s += &format!(
            "##### Code dependencies frequency\n\n{}\n",
            self.dependencies.render()
        );

        s += "## Build systems\n\n";
        s += &format!(
            "Build systems information available for {:.1}% of all projects.\n\n",
            rel(self.with_build_system)
        );
        s += &format!(
            "##### Build systems frequency ({})\n\n{}\n",
            self.build_systems.total(),
            self.build_systems.render()
        );
        s += &format!(
            "##### C and C++ projects without build system information ({})\n\n{}\n\n",
            self.c_without_build_system.len(),
            self.c_without_build_system.join(", ")
        );
        s += &format!(
            "##### C and C++ projects with a build system different from CMake ({})\n\n{}\n\n",
            self.c_not_cmake.len(),
            self.c_not_cmake.join(", ")
        );

        s += "## Platform\n\n";
        s += &format!(
            "Platform information available for {:.1}% of all projects.\n\n",
            rel(self.with_platform)
        );
        s += &format!("##### Platforms frequency\n\n{}\n", self.platforms.render());
        s
    }
}

fn build_systems(entry: &Entry) -> Vec<&str> {
    entry
        .building
        .values(BuildingField::BuildSystem)
        .iter()
        .map(|v| v.text.as_str())
        .collect()
}

fn title_list(titles: &[String]) -> String {
    format!("{}: {}\n\n", titles.len(), titles.join(", "))
}

#[cfg(test)]
#[path = "tests/statistics_tests.rs"]
mod tests;
