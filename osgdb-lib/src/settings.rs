//! User settings (repository root, config file location) and the
//! per-repository configuration.
//!
//! The user settings file is always `~/.config/osgdb/settings.toml`. The
//! repository may carry an `osgdb.toml` next to `README.md` that overrides
//! paths and extends the vocabularies. [`Settings::load`] combines both into
//! one immutable object that every operation receives by reference.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use osgdb_core::Schema;

use crate::error::MaintError;

/// Name of the optional configuration file in the repository root.
pub const REPO_CONFIG_FILE: &str = "osgdb.toml";

/// Keyword similarity above which two keywords are reported.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Where entry files are viewed online, used for links in the JSON export.
pub const DEFAULT_ENTRY_BASE_URL: &str =
    "https://github.com/Trilarion/opensourcegames/blob/master/entries/";

/// Table and key in `settings.toml` holding the remembered repository root.
const ROOT_TABLE: &str = "repository";
const ROOT_KEY: &str = "root";

/// The per-user settings file, `<config dir>/osgdb/settings.toml`.
///
/// Maintainers usually keep one checkout of the games repository. Storing
/// its location here lets `osgdb` run from any directory.
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("osgdb")
        .join("settings.toml")
}

/// The repository to maintain: `--root`, else the remembered root, else the
/// current directory.
///
/// A remembered root that no longer contains a `README.md` is skipped with a
/// warning; the checkout was probably moved or deleted.
pub fn resolve_root(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(root) = cli_override {
        return root;
    }
    let remembered = std::fs::read_to_string(settings_path())
        .ok()
        .and_then(|text| remembered_root(&text));
    match remembered {
        Some(root) if looks_like_repository(&root) => root,
        Some(root) => {
            log::warn!(
                "Remembered repository {} has no README.md, using the current directory",
                root.display()
            );
            current_dir()
        }
        None => current_dir(),
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Whether `root` holds a games repository (its summary document exists).
pub fn looks_like_repository(root: &Path) -> bool {
    root.join("README.md").is_file()
}

/// The repository root stored in the text of a settings file. An empty
/// value counts as unset.
pub fn remembered_root(settings: &str) -> Option<PathBuf> {
    let doc: toml::Value = settings.parse().ok()?;
    let root = doc.get(ROOT_TABLE)?.get(ROOT_KEY)?.as_str()?;
    (!root.is_empty()).then(|| PathBuf::from(root))
}

/// Settings text with the repository root set (or removed when `None`).
/// Other tables and keys are carried over unchanged.
pub fn with_remembered_root(settings: &str, root: Option<&Path>) -> Result<String, MaintError> {
    let mut doc: toml::Value = settings
        .parse()
        .unwrap_or_else(|_| toml::Value::Table(Default::default()));
    let table = doc
        .as_table_mut()
        .ok_or_else(|| MaintError::config("settings.toml is not a table"))?;
    let repository = table
        .entry(ROOT_TABLE)
        .or_insert_with(|| toml::Value::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| MaintError::config(format!("[{ROOT_TABLE}] is not a table")))?;

    match root {
        Some(path) => {
            repository.insert(
                ROOT_KEY.to_string(),
                toml::Value::String(path.to_string_lossy().into_owned()),
            );
        }
        None => {
            repository.remove(ROOT_KEY);
        }
    }
    toml::to_string_pretty(&doc).map_err(|e| MaintError::config(e.to_string()))
}

/// Remember (or forget) the repository root in the settings file.
pub fn save_root(root: Option<&Path>) -> Result<(), MaintError> {
    let path = settings_path();
    let current = std::fs::read_to_string(&path).unwrap_or_default();
    let updated = with_remembered_root(&current, root)?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| MaintError::io(dir, e))?;
    }
    // replace in one step so a crash never leaves half a file
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, updated).map_err(|e| MaintError::io(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| MaintError::io(&path, e))
}

/// The settings file, re-serialized for `osgdb config show`.
pub fn load_settings_string() -> Option<String> {
    let text = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = text.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

/// Contents of `osgdb.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    pub paths: PathOverrides,
    pub extra_languages: Vec<String>,
    pub extra_licenses: Vec<String>,
    pub extra_keywords: Vec<String>,
    /// Dependency name -> home URL.
    pub dependencies_without_entry: BTreeMap<String, String>,
    pub similarity_threshold: Option<f64>,
    pub entry_base_url: Option<String>,
}

/// Paths relative to the repository root.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathOverrides {
    pub entries: Option<PathBuf>,
    pub tocs: Option<PathBuf>,
    pub readme: Option<PathBuf>,
    pub statistics: Option<PathBuf>,
    pub backlog: Option<PathBuf>,
    pub rejected: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub json_db: Option<PathBuf>,
    pub archives: Option<PathBuf>,
}

impl RepoConfig {
    /// Read `osgdb.toml` from `root`; a missing file means defaults.
    pub fn load(root: &Path) -> Result<Self, MaintError> {
        let path = root.join(REPO_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| MaintError::io(&path, e))?;
        toml::from_str(&contents)
            .map_err(|e| MaintError::config(format!("{}: {e}", path.display())))
    }
}

/// Locations of every file the maintenance operations read or write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub root: PathBuf,
    pub entries: PathBuf,
    pub tocs: PathBuf,
    pub readme: PathBuf,
    pub statistics: PathBuf,
    pub backlog: PathBuf,
    pub rejected: PathBuf,
    pub template: PathBuf,
    pub json_db: PathBuf,
    pub archives: PathBuf,
}

impl Paths {
    /// The standard repository layout below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let entries = root.join("entries");
        Self {
            tocs: entries.join("tocs"),
            entries,
            readme: root.join("README.md"),
            statistics: root.join("statistics.md"),
            backlog: root.join("code").join("backlog.txt"),
            rejected: root.join("code").join("rejected.txt"),
            template: root.join("template.md"),
            json_db: root.join("docs").join("data.json"),
            archives: root.join("code").join("archives.json"),
            root,
        }
    }

    fn apply(&mut self, overrides: &PathOverrides) {
        let root = self.root.clone();
        let set = |target: &mut PathBuf, value: &Option<PathBuf>| {
            if let Some(v) = value {
                *target = root.join(v);
            }
        };
        set(&mut self.entries, &overrides.entries);
        set(&mut self.tocs, &overrides.tocs);
        set(&mut self.readme, &overrides.readme);
        set(&mut self.statistics, &overrides.statistics);
        set(&mut self.backlog, &overrides.backlog);
        set(&mut self.rejected, &overrides.rejected);
        set(&mut self.template, &overrides.template);
        set(&mut self.json_db, &overrides.json_db);
        set(&mut self.archives, &overrides.archives);
    }
}

/// Effective configuration, built once at start-up.
#[derive(Debug, Clone)]
pub struct Settings {
    pub paths: Paths,
    pub schema: Schema,
    pub similarity_threshold: f64,
    pub entry_base_url: String,
}

impl Settings {
    /// Defaults for a repository at `root`, without reading any file.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            paths: Paths::new(root),
            schema: Schema::default(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            entry_base_url: DEFAULT_ENTRY_BASE_URL.to_string(),
        }
    }

    /// Defaults for `root` combined with its `osgdb.toml`, if present.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, MaintError> {
        let mut settings = Self::new(root);
        let config = RepoConfig::load(&settings.paths.root)?;
        settings.apply(config)?;
        Ok(settings)
    }

    fn apply(&mut self, config: RepoConfig) -> Result<(), MaintError> {
        self.paths.apply(&config.paths);

        let schema = &mut self.schema;
        schema.languages.extend(config.extra_languages);
        schema.licenses.extend(config.extra_licenses);
        schema.keywords.extend(config.extra_keywords);
        schema
            .dependencies_without_entry
            .extend(config.dependencies_without_entry);

        if let Some(threshold) = config.similarity_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(MaintError::config(format!(
                    "similarity_threshold must be between 0 and 1, got {threshold}"
                )));
            }
            self.similarity_threshold = threshold;
        }
        if let Some(url) = config.entry_base_url {
            self.entry_base_url = url;
        }
        Ok(())
    }

    /// Human-readable summary for `osgdb config show`.
    pub fn describe(&self) -> String {
        let p = &self.paths;
        let rows = [
            ("root", &p.root),
            ("entries", &p.entries),
            ("tocs", &p.tocs),
            ("readme", &p.readme),
            ("statistics", &p.statistics),
            ("backlog", &p.backlog),
            ("rejected", &p.rejected),
            ("template", &p.template),
            ("json snapshot", &p.json_db),
            ("repository manifest", &p.archives),
        ];
        let mut out = String::new();
        for (name, path) in rows {
            out.push_str(&format!("{name:<20} {}\n", path.display()));
        }
        out.push_str(&format!(
            "{:<20} {}\n{:<20} {}\n{:<20} {}\n{:<20} {}\n",
            "languages",
            self.schema.languages.len(),
            "licenses",
            self.schema.licenses.len(),
            "keywords",
            self.schema.keywords.len(),
            "similarity",
            self.similarity_threshold,
        ));
        out
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
