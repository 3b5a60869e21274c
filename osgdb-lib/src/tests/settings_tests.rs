use super::*;
use osgdb_core::Vocabulary;
use tempfile::TempDir;

#[test]
fn test_default_layout() {
    let paths = Paths::new("/repo");
    assert_eq!(paths.entries, PathBuf::from("/repo/entries"));
    assert_eq!(paths.tocs, PathBuf::from("/repo/entries/tocs"));
    assert_eq!(paths.backlog, PathBuf::from("/repo/code/backlog.txt"));
    assert_eq!(paths.json_db, PathBuf::from("/repo/docs/data.json"));
}

#[test]
fn test_missing_repo_config_means_defaults() {
    let tmp = TempDir::new().unwrap();
    let settings = Settings::load(tmp.path()).unwrap();
    assert_eq!(settings.paths, Paths::new(tmp.path()));
    assert_eq!(settings.similarity_threshold, DEFAULT_SIMILARITY_THRESHOLD);
}

#[test]
fn test_repo_config_extends_schema_and_paths() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(REPO_CONFIG_FILE),
        r#"
extra_languages = ["Zig"]
extra_keywords = ["deckbuilder"]
similarity_threshold = 0.9

[dependencies_without_entry]
Raylib = "https://www.raylib.com/"

[paths]
backlog = "lists/backlog.txt"
"#,
    )
    .unwrap();

    let settings = Settings::load(tmp.path()).unwrap();
    assert!(settings.schema.is_known(Vocabulary::Language, "Zig"));
    assert!(settings.schema.is_known(Vocabulary::Language, "C"));
    assert!(settings.schema.is_known(Vocabulary::Keyword, "deckbuilder"));
    assert!(settings.schema.dependencies_without_entry.contains_key("Raylib"));
    assert_eq!(settings.similarity_threshold, 0.9);
    assert_eq!(settings.paths.backlog, tmp.path().join("lists/backlog.txt"));
    assert_eq!(settings.paths.rejected, tmp.path().join("code/rejected.txt"));
}

#[test]
fn test_invalid_repo_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(REPO_CONFIG_FILE), "similarity_threshold = 3.0\n").unwrap();
    assert!(matches!(
        Settings::load(tmp.path()),
        Err(MaintError::Config(_))
    ));

    std::fs::write(tmp.path().join(REPO_CONFIG_FILE), "unknown_key = 1\n").unwrap();
    assert!(matches!(
        Settings::load(tmp.path()),
        Err(MaintError::Config(_))
    ));
}

#[test]
fn test_cli_override_wins() {
    let root = resolve_root(Some(PathBuf::from("/somewhere")));
    assert_eq!(root, PathBuf::from("/somewhere"));
}

#[test]
fn test_remembered_root_roundtrip_keeps_other_keys() {
    let original = "[display]\ncolor = false\n";
    let text = with_remembered_root(original, Some(Path::new("/games/osgc"))).unwrap();
    assert_eq!(remembered_root(&text), Some(PathBuf::from("/games/osgc")));
    assert!(text.contains("color = false"));

    let cleared = with_remembered_root(&text, None).unwrap();
    assert_eq!(remembered_root(&cleared), None);
    assert!(cleared.contains("color = false"));
}

#[test]
fn test_empty_or_broken_settings_have_no_root() {
    assert_eq!(remembered_root(""), None);
    assert_eq!(remembered_root("[repository]\nroot = \"\"\n"), None);
    assert_eq!(remembered_root("not toml ["), None);
    // a broken file is replaced rather than rejected
    let text = with_remembered_root("not toml [", Some(Path::new("/r"))).unwrap();
    assert_eq!(remembered_root(&text), Some(PathBuf::from("/r")));
}

#[test]
fn test_repository_is_recognized_by_readme() {
    let tmp = TempDir::new().unwrap();
    assert!(!looks_like_repository(tmp.path()));
    std::fs::write(tmp.path().join("README.md"), "# Games\n").unwrap();
    assert!(looks_like_repository(tmp.path()));
}
