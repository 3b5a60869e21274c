use std::fs;
use std::path::Path;

use osgdb_lib::toc::{REGION_END, REGION_START};
use osgdb_lib::{Finding, MaintError, Maintainer, RegionError, Settings};
use tempfile::TempDir;

const ALPHA: &str = "# Alpha

- Home: https://alpha.org
- State: mature
- Play: https://alpha.org/play
- Download: @see-home
- Keywords: puzzle, multiplayer online
- Code repository: https://github.com/x/alpha
- Code language: C
- Code license: MIT
- Code dependencies: SDL2, Allegro

A puzzle game.
";

const BETA: &str = "# Beta Tool

- Home: https://beta.org
- State: beta, inactive since 2012
- Platform: Linux, Web
- Keywords: tool, puzzles
- Code repository: https://beta.org/beta.git
- Code language: Python
- Code license: GPL-3.0
";

const SDL: &str = "# Simple DirectMedia Layer

- Home: https://www.libsdl.org/
- State: mature
- Keywords: library
- Code repository: https://github.com/libsdl-org/SDL
- Code language: C
- Code license: zlib
";

fn setup() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("entries/tocs")).unwrap();
    fs::create_dir_all(root.join("code")).unwrap();
    fs::write(root.join("entries/alpha.md"), ALPHA).unwrap();
    fs::write(root.join("entries/beta_tool.md"), BETA).unwrap();
    fs::write(root.join("entries/sdl.md"), SDL).unwrap();
    fs::write(root.join("entries/tocs/_stale.md"), "stale").unwrap();
    fs::write(
        root.join("README.md"),
        format!("# Open Source Games\n\nintro\n\n{REGION_START}\nold\n{REGION_END}\n\n## Contributing\n"),
    )
    .unwrap();
    fs::write(
        root.join("code/backlog.txt"),
        "https://alpha.org/\nhttps://new.org\nhttp://www.rejected.org\nhttps://new.org\nhttps://archived.org\n",
    )
    .unwrap();
    fs::write(
        root.join("code/rejected.txt"),
        "Zed (http://rejected.org): closed source\nOld (https://web.archive.org/web/2015/https://archived.org/): gone\nZed (http://rejected.org): closed source\n",
    )
    .unwrap();
    fs::write(root.join("template.md"), "# {title}\n\n## Building\n\n_short description_\n").unwrap();
    tmp
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn operations_require_loaded_entries() {
    let tmp = setup();
    let settings = Settings::load(tmp.path()).unwrap();
    let maintainer = Maintainer::new(&settings);

    assert!(matches!(
        maintainer.update_readme_tocs(),
        Err(MaintError::EntriesNotLoaded)
    ));
    assert!(matches!(
        maintainer.clean_backlog(),
        Err(MaintError::EntriesNotLoaded)
    ));
    // nothing was touched
    assert!(tmp.path().join("entries/tocs/_stale.md").exists());
    assert!(read(tmp.path(), "README.md").contains("\nold\n"));
    assert!(!tmp.path().join("statistics.md").exists());
}

#[test]
fn inconsistencies_are_reported() {
    let tmp = setup();
    let settings = Settings::load(tmp.path()).unwrap();
    let mut maintainer = Maintainer::new(&settings);
    assert_eq!(maintainer.read_entries().unwrap(), 3);

    let findings = maintainer.check_inconsistencies().unwrap();
    assert!(findings.contains(&Finding::PlayWithoutPlatform {
        file: "alpha.md".to_string()
    }));
    assert!(findings.contains(&Finding::UnknownDependency {
        name: "Allegro".to_string(),
        count: 1
    }));
    assert!(findings.iter().any(|f| matches!(
        f,
        Finding::SimilarKeywords { first, second, .. } if first == "puzzle" && second == "puzzles"
    )));
    // SDL2 is covered by the alias of the library entry
    assert!(!findings.iter().any(|f| matches!(
        f,
        Finding::UnknownDependency { name, .. } if name == "SDL2"
    )));

    assert!(maintainer.check_template_leftovers().unwrap().is_empty());
}

#[test]
fn readme_and_tocs_are_regenerated_idempotently() {
    let tmp = setup();
    let root = tmp.path();
    let settings = Settings::load(root).unwrap();
    let mut maintainer = Maintainer::new(&settings);
    maintainer.read_entries().unwrap();

    let tocs = maintainer.update_readme_tocs().unwrap();
    assert_eq!(tocs.primary[0].count, 1);
    assert!(!root.join("entries/tocs/_stale.md").exists());

    let readme = read(root, "README.md");
    assert!(readme.starts_with("# Open Source Games\n\nintro\n\n"));
    assert!(readme.ends_with(&format!("{REGION_END}\n\n## Contributing\n")));
    assert!(readme.contains("**[Games](entries/tocs/_games.md#Games)** (1)"));
    let games = read(root, "entries/tocs/_games.md");

    maintainer.update_readme_tocs().unwrap();
    assert_eq!(read(root, "README.md"), readme);
    assert_eq!(read(root, "entries/tocs/_games.md"), games);
}

#[test]
fn broken_readme_aborts_without_side_effects() {
    let tmp = setup();
    let root = tmp.path();
    fs::write(root.join("README.md"), "# Open Source Games\n\nno region\n").unwrap();
    let settings = Settings::load(root).unwrap();
    let mut maintainer = Maintainer::new(&settings);
    maintainer.read_entries().unwrap();

    assert!(matches!(
        maintainer.update_readme_tocs(),
        Err(MaintError::Region(RegionError::Missing))
    ));
    assert!(root.join("entries/tocs/_stale.md").exists());
    assert_eq!(read(root, "README.md"), "# Open Source Games\n\nno region\n");
}

#[test]
fn backlog_and_rejected_are_cleaned() {
    let tmp = setup();
    let root = tmp.path();
    let settings = Settings::load(root).unwrap();
    let mut maintainer = Maintainer::new(&settings);
    maintainer.read_entries().unwrap();

    assert_eq!(maintainer.clean_backlog().unwrap(), 1);
    assert_eq!(read(root, "code/backlog.txt"), "https://new.org\n");

    assert_eq!(maintainer.clean_rejected().unwrap(), 2);
    assert!(read(root, "code/rejected.txt").starts_with("Old ("));
}

#[test]
fn complete_run_writes_every_document() {
    let tmp = setup();
    let root = tmp.path();
    let settings = Settings::load(root).unwrap();
    let mut maintainer = Maintainer::new(&settings);
    maintainer.complete_run().unwrap();

    assert!(read(root, "statistics.md").contains("analyzed 3 entries on "));
    let json: serde_json::Value = serde_json::from_str(&read(root, "docs/data.json")).unwrap();
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
    let repos: serde_json::Value = serde_json::from_str(&read(root, "code/archives.json")).unwrap();
    assert_eq!(
        repos["git"],
        serde_json::json!([
            "https://beta.org/beta.git",
            "https://github.com/libsdl-org/SDL.git",
            "https://github.com/x/alpha.git"
        ])
    );
}

#[test]
fn redundant_downloads_are_stripped_and_written() {
    let tmp = setup();
    let root = tmp.path();
    let settings = Settings::load(root).unwrap();
    let mut maintainer = Maintainer::new(&settings);
    maintainer.read_entries().unwrap();

    assert_eq!(maintainer.strip_redundant_downloads().unwrap(), 1);
    maintainer.write_entries().unwrap();
    assert!(!read(root, "entries/alpha.md").contains("- Download:"));
}
