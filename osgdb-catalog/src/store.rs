//! The in-memory collection of all entries.
//!
//! Loads every record file of the entries directory, keeps the raw text next
//! to the parsed entry (the link auditor and the template check scan raw
//! text) and writes entries back in canonical form.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use osgdb_core::diagnostic::{Diagnostic, DiagnosticKind};
use osgdb_core::entry::Entry;
use osgdb_core::field::Field;
use osgdb_core::schema::{Schema, VALID_URL_PREFIXES};

use crate::error::CatalogError;
use crate::parser::parse_entry;
use crate::writer::write_entry;

/// Extension of record files.
pub const ENTRY_EXTENSION: &str = "md";

/// All entries of the database.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    /// Raw record text keyed by file name.
    sources: BTreeMap<String, String>,
    diagnostics: Vec<Diagnostic>,
}

impl EntryStore {
    /// Load all `.md` record files directly inside `dir`.
    ///
    /// Files are read in file-name order. Validation problems are collected
    /// as diagnostics, only I/O failures are errors.
    pub fn load(dir: &Path, schema: &Schema) -> Result<Self, CatalogError> {
        if !dir.is_dir() {
            return Err(CatalogError::DirNotFound(dir.display().to_string()));
        }

        let mut files: Vec<_> = std::fs::read_dir(dir)
            .map_err(|e| CatalogError::Io {
                path: dir.display().to_string(),
                source: e,
            })?
            .filter_map(|e| e.ok())
            .filter(|e| {
                let path = e.path();
                path.is_file() && path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION)
            })
            .collect();
        files.sort_by_key(|e| e.file_name());

        let mut store = EntryStore::default();
        for file in files {
            let path = file.path();
            let name = file.file_name().to_string_lossy().into_owned();
            let text = std::fs::read_to_string(&path).map_err(|e| CatalogError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            let parsed = parse_entry(&name, &text, schema);
            store.diagnostics.extend(parsed.diagnostics);
            store.entries.push(parsed.entry);
            store.sources.insert(name, text);
        }
        store.check_titles();

        log::debug!("Loaded {} entries from {}", store.entries.len(), dir.display());
        Ok(store)
    }

    /// Build a store from already constructed entries. Raw sources are the
    /// canonical serializations.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let sources = entries
            .iter()
            .map(|e| (e.file.clone(), write_entry(e)))
            .collect();
        let mut store = EntryStore {
            entries,
            sources,
            diagnostics: Vec::new(),
        };
        store.check_titles();
        store
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, file: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.file == file)
    }

    /// Raw record text as read from disk, as `(file, text)` pairs.
    pub fn sources(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sources.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Write every entry back to `dir/<file>` in canonical form.
    pub fn save(&self, dir: &Path) -> Result<usize, CatalogError> {
        std::fs::create_dir_all(dir).map_err(|e| CatalogError::Write {
            path: dir.display().to_string(),
            source: e,
        })?;
        for entry in &self.entries {
            let path = dir.join(&entry.file);
            std::fs::write(&path, write_entry(entry)).map_err(|e| CatalogError::Write {
                path: path.display().to_string(),
                source: e,
            })?;
        }
        Ok(self.entries.len())
    }

    /// All URLs in URL-bearing fields, mapped to the files referencing them.
    pub fn all_urls(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut urls: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for entry in &self.entries {
            for field in Field::all().iter().filter(|f| f.is_url_field()) {
                for text in entry.texts(*field) {
                    if VALID_URL_PREFIXES.iter().any(|p| text.starts_with(p)) {
                        urls.entry(text.to_string())
                            .or_default()
                            .insert(entry.file.clone());
                    }
                }
            }
        }
        urls
    }

    /// Remove `Download` fields consisting only of an uncommented `@see-home`,
    /// which is the default anyway. Returns the number of entries changed.
    pub fn strip_redundant_downloads(&mut self) -> usize {
        let mut changed = 0;
        for entry in &mut self.entries {
            let redundant = matches!(
                entry.values(Field::Download),
                [only] if only.text == "@see-home" && only.comment.is_none()
            );
            if redundant {
                entry.remove(Field::Download);
                changed += 1;
            }
        }
        changed
    }

    /// Titles are expected to be unique; duplicates become diagnostics.
    fn check_titles(&mut self) {
        let mut first_by_title: BTreeMap<&str, &str> = BTreeMap::new();
        let mut found = Vec::new();
        for entry in &self.entries {
            if entry.title.is_empty() {
                continue;
            }
            match first_by_title.get(entry.title.as_str()) {
                Some(other) => found.push(Diagnostic::for_field(
                    entry.file.clone(),
                    "Title",
                    DiagnosticKind::DuplicateTitle {
                        other: other.to_string(),
                    },
                )),
                None => {
                    first_by_title.insert(&entry.title, &entry.file);
                }
            }
        }
        self.diagnostics.extend(found);
    }
}
