//! The maintenance operations, one method each.
//!
//! Operations that need the entries fail with
//! [`MaintError::EntriesNotLoaded`] before touching anything when
//! [`Maintainer::read_entries`] has not run.

use std::path::Path;

use osgdb_catalog::EntryStore;
use osgdb_links::{LinkExtractor, LinkFinding, Probe, audit_links, audit_urls, collect_links};

use crate::backlog;
use crate::checker::{self, ConsistencyChecker, Finding};
use crate::error::MaintError;
use crate::export::{self, RepoManifest};
use crate::settings::Settings;
use crate::similarity::LevenshteinScorer;
use crate::statistics::Statistics;
use crate::toc::{self, TocSet};

/// Timestamp format used in the statistics report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Maintainer<'a> {
    settings: &'a Settings,
    store: Option<EntryStore>,
}

impl<'a> Maintainer<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            store: None,
        }
    }

    /// Start from an already loaded store.
    pub fn with_store(settings: &'a Settings, store: EntryStore) -> Self {
        Self {
            settings,
            store: Some(store),
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn store(&self) -> Result<&EntryStore, MaintError> {
        self.store.as_ref().ok_or(MaintError::EntriesNotLoaded)
    }

    /// Parse every entry file. Returns the number of entries read.
    pub fn read_entries(&mut self) -> Result<usize, MaintError> {
        let store = EntryStore::load(&self.settings.paths.entries, &self.settings.schema)?;
        let count = store.len();
        log::info!("{count} entries read");
        if !store.diagnostics().is_empty() {
            log::info!("{} validation findings", store.diagnostics().len());
        }
        self.store = Some(store);
        Ok(count)
    }

    /// Write every entry back in canonical form.
    pub fn write_entries(&self) -> Result<usize, MaintError> {
        let written = self.store()?.save(&self.settings.paths.entries)?;
        log::info!("{written} entries written");
        Ok(written)
    }

    pub fn check_template_leftovers(&self) -> Result<Vec<Finding>, MaintError> {
        let store = self.store()?;
        let path = &self.settings.paths.template;
        let template = std::fs::read_to_string(path).map_err(|e| MaintError::io(path, e))?;
        let findings = checker::template_leftovers(&template, store.sources());
        log::info!("Checked for template leftovers");
        Ok(findings)
    }

    pub fn check_inconsistencies(&self) -> Result<Vec<Finding>, MaintError> {
        let store = self.store()?;
        let scorer = LevenshteinScorer;
        let checker = ConsistencyChecker::new(
            &self.settings.schema,
            &scorer,
            self.settings.similarity_threshold,
        );
        Ok(checker.check(store.entries()))
    }

    /// Deduplicate and sort the rejected list.
    pub fn clean_rejected(&self) -> Result<usize, MaintError> {
        let count = backlog::sort_text_file(&self.settings.paths.rejected)?;
        log::info!("rejected games list contains {count} items");
        Ok(count)
    }

    /// Drop backlog URLs already covered by entries or the rejected list,
    /// then deduplicate and sort. Returns the remaining number of items.
    pub fn clean_backlog(&self) -> Result<usize, MaintError> {
        let store = self.store()?;
        let paths = &self.settings.paths;

        let rejected = read(&paths.rejected)?;
        let mut known: Vec<String> = store.all_urls().into_keys().collect();
        known.extend(backlog::rejected_urls(&rejected)?);

        let text = read(&paths.backlog)?;
        let cleaned = backlog::clean_backlog(&text, known.iter().map(String::as_str));
        backlog::write_lines(&paths.backlog, &cleaned)?;
        log::info!("backlog contains {} items", cleaned.len());
        Ok(cleaned.len())
    }

    /// Probe every link found in the entry files.
    pub fn check_external_links(&self, probe: &dyn Probe) -> Result<Vec<LinkFinding>, MaintError> {
        let store = self.store()?;
        let extractor = LinkExtractor::new()?;
        let links = collect_links(&extractor, store.sources());
        log::info!("Start checking external links (can take a while)");
        Ok(audit_links(&links, probe))
    }

    /// Probe every URL of the backlog.
    pub fn check_backlog_links(&self, probe: &dyn Probe) -> Result<Vec<LinkFinding>, MaintError> {
        let text = read(&self.settings.paths.backlog)?;
        let urls = backlog::backlog_urls(&text);
        log::info!("Checking {} backlog URLs", urls.len());
        Ok(audit_urls(urls, probe))
    }

    /// Regenerate all TOC files and the summary region of the README.
    ///
    /// The README is validated before any TOC file is deleted, so a broken
    /// README leaves everything untouched.
    pub fn update_readme_tocs(&self) -> Result<TocSet, MaintError> {
        let store = self.store()?;
        let paths = &self.settings.paths;

        let tocs = toc::generate_tocs(store.entries(), &self.settings.schema);
        let readme = read(&paths.readme)?;
        let updated = toc::replace_autogenerated_region(&readme, &tocs.summary())?;

        let written = toc::write_tocs(&paths.tocs, &tocs)?;
        write(&paths.readme, &updated)?;
        log::info!("Readme and {written} TOCs updated");
        Ok(tocs)
    }

    pub fn update_statistics(&self) -> Result<Statistics, MaintError> {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.update_statistics_at(&timestamp)
    }

    /// Like [`Self::update_statistics`] with a fixed timestamp.
    pub fn update_statistics_at(&self, timestamp: &str) -> Result<Statistics, MaintError> {
        let store = self.store()?;
        let statistics = Statistics::compute(store.entries());
        write(&self.settings.paths.statistics, &statistics.render(timestamp))?;
        log::info!("Statistics updated");
        Ok(statistics)
    }

    /// Write the JSON snapshot. Returns the number of rows.
    pub fn export_json(&self) -> Result<usize, MaintError> {
        let store = self.store()?;
        let snapshot = export::build_snapshot(store.entries(), &self.settings.entry_base_url);
        let text = serde_json::to_string_pretty(&snapshot)?;
        write(&self.settings.paths.json_db, &text)?;
        log::info!("JSON snapshot with {} rows written", snapshot.data.len());
        Ok(snapshot.data.len())
    }

    /// Write the repository manifest.
    pub fn update_repos(&self) -> Result<RepoManifest, MaintError> {
        let store = self.store()?;
        let (manifest, unclassified) = export::build_manifest(store.entries());
        for repo in &unclassified {
            log::warn!("Entry \"{}\" unconsumed repo: {}", repo.file, repo.url);
        }

        log::info!("{} Git repositories", manifest.git.len());
        for (host, count) in export::git_host_counts(&manifest) {
            log::info!("{count} on {host}");
        }

        let text = serde_json::to_string_pretty(&manifest)?;
        write(&self.settings.paths.archives, &text)?;
        log::info!("Repositories updated");
        Ok(manifest)
    }

    /// Remove `Download` fields holding only `@see-home`. The change lives in
    /// memory until [`Self::write_entries`].
    pub fn strip_redundant_downloads(&mut self) -> Result<usize, MaintError> {
        let store = self.store.as_mut().ok_or(MaintError::EntriesNotLoaded)?;
        let changed = store.strip_redundant_downloads();
        log::info!("Removed redundant download fields from {changed} entries");
        Ok(changed)
    }

    /// Read entries, report inconsistencies and regenerate every derived
    /// document.
    pub fn complete_run(&mut self) -> Result<(), MaintError> {
        self.read_entries()?;
        for finding in self.check_inconsistencies()? {
            log::warn!("{finding}");
        }
        self.update_readme_tocs()?;
        self.update_statistics()?;
        self.export_json()?;
        self.update_repos()?;
        Ok(())
    }
}

fn read(path: &Path) -> Result<String, MaintError> {
    std::fs::read_to_string(path).map_err(|e| MaintError::io(path, e))
}

fn write(path: &Path, text: &str) -> Result<(), MaintError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MaintError::io(parent, e))?;
    }
    std::fs::write(path, text).map_err(|e| MaintError::io(path, e))
}
