use super::*;
use osgdb_core::{State, Status, Value};

#[test]
fn test_shorten() {
    assert_eq!(shorten("short  text\n", 60, ".."), "short text");
    let long = "An open source remake of a classic strategy game with many units and maps.";
    let short = shorten(long, 60, "..");
    assert!(short.chars().count() <= 60);
    assert_eq!(short, "An open source remake of a classic strategy game with many..");
    assert_eq!(shorten("", 60, ".."), "");
}

fn entry(file: &str, title: &str) -> Entry {
    let mut e = Entry::new(file, title);
    e.home = vec![Value::new(format!("https://{file}.org"))];
    e.state = Some(State::new(Status::Mature));
    e.keywords = vec![Value::new("puzzle"), Value::new("clone")];
    e.code_language = vec![Value::new("C")];
    e.code_license = vec![Value::new("GPL-3.0")];
    e
}

#[test]
fn test_snapshot_rows() {
    let mut b = entry("b", "beta game");
    b.state = Some(State::new(Status::Beta).inactive_since(2011));
    b.set(Field::Download, vec![Value::new("https://b.org/dl")]);
    b.code_repository = vec![Value::new("https://github.com/x/b")];
    let a = entry("a", "Alpha");

    let snapshot = build_snapshot(&[b, a], "https://example.org/entries/");
    assert_eq!(snapshot.headings.len(), 6);
    assert!(snapshot.data[0][0].starts_with("Alpha (<a href=\"https://a.org\">home</a>"));
    assert_eq!(
        snapshot.data[1],
        vec![
            "beta game (<a href=\"https://b.org\">home</a>, <a href=\"https://example.org/entries/b\">entry</a>)",
            "",
            "<a href=\"https://b.org/dl\">Link</a>",
            "beta / inactive since 2011",
            "puzzle, clone",
            "<a href=\"https://github.com/x/b\">Source</a> - C - GPL-3.0",
        ]
    );
    assert_eq!(snapshot.data[0][3], "mature / active");

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["headings"][0], "Game");
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[test]
fn test_repo_classification() {
    assert_eq!(
        RepoKind::classify("https://github.com/a/b"),
        Some((RepoKind::Git, "https://github.com/a/b.git".to_string()))
    );
    assert_eq!(
        RepoKind::classify("https://example.com/x.git").map(|r| r.0),
        Some(RepoKind::Git)
    );
    assert_eq!(
        RepoKind::classify("https://svn.code.sf.net/p/foo/code/").map(|r| r.0),
        Some(RepoKind::Svn)
    );
    assert_eq!(
        RepoKind::classify("http://hg.example.org/repo").map(|r| r.0),
        Some(RepoKind::Hg)
    );
    assert_eq!(RepoKind::classify("https://example.com/download"), None);
}

#[test]
fn test_manifest_takes_first_and_additional() {
    let mut a = entry("a", "A");
    a.code_repository = vec![
        Value::new("https://github.com/x/a"),
        Value::new("https://gitlab.com/x/a").with_comment("mirror"),
        Value::new("https://svn.code.sf.net/p/a/code/").with_comment("@add"),
    ];
    let mut b = entry("b", "B");
    b.code_repository = vec![Value::new("https://github.com/x/a")];
    let mut c = entry("c", "C");
    c.code_repository = vec![Value::new("https://c.org/src")];

    let (manifest, unclassified) = build_manifest(&[a, b, c]);
    assert_eq!(manifest.git, vec!["https://github.com/x/a.git"]);
    assert_eq!(manifest.svn, vec!["https://svn.code.sf.net/p/a/code/"]);
    assert!(manifest.hg.is_empty());
    assert_eq!(
        unclassified,
        vec![UnclassifiedRepo {
            file: "c".to_string(),
            url: "https://c.org/src".to_string()
        }]
    );

    let counts = git_host_counts(&manifest);
    assert!(counts.contains(&("github.com", 1)));
    assert!(counts.contains(&("gitlab.com", 0)));
}
