use osgdb_catalog::{parse_entry, write_entry};
use osgdb_core::{BuildingField, DiagnosticKind, Field, Schema, Status, Value};

const CANONICAL: &str = "# 0 A.D.

- Home: https://play0ad.com/, https://sourceforge.net/projects/zero-ad/
- Media: https://en.wikipedia.org/wiki/0_A.D._(video_game)
- State: beta
- Download: https://play0ad.com/download/
- Platform: Windows, Linux, macOS
- Keywords: strategy, clone, multiplayer online + LAN, open content (CC-BY-SA-3.0 media)
- Code repository: https://github.com/0ad/0ad (mirror), https://svn.wildfiregames.com/public/ps/trunk/ (@add)
- Code language: C++, JavaScript
- Code license: GPL-2.0
- Code dependencies: Boost, SDL2
- Assets license: CC-BY-SA-3.0
- Developer: Wildfire Games

Historic real-time strategy game.

## Building

- Build system: Premake
- Build instructions: https://trac.wildfiregames.com/wiki/BuildInstructions
";

fn parse(text: &str) -> osgdb_catalog::ParsedEntry {
    parse_entry("0_ad.md", text, &Schema::default())
}

fn kinds(text: &str) -> Vec<DiagnosticKind> {
    parse(text).diagnostics.into_iter().map(|d| d.kind).collect()
}

#[test]
fn parses_full_record() {
    let parsed = parse(CANONICAL);
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);

    let entry = parsed.entry;
    assert_eq!(entry.file, "0_ad.md");
    assert_eq!(entry.title, "0 A.D.");
    assert_eq!(entry.home.len(), 2);
    assert_eq!(entry.state.map(|s| s.status), Some(Status::Beta));
    assert!(!entry.is_inactive());
    assert_eq!(
        entry.texts(Field::Platform).collect::<Vec<_>>(),
        vec!["Windows", "Linux", "macOS"]
    );
    assert_eq!(
        entry.code_repository[1],
        Value::new("https://svn.wildfiregames.com/public/ps/trunk/").with_comment("@add")
    );
    assert_eq!(
        entry.values(Field::Media)[0].text,
        "https://en.wikipedia.org/wiki/0_A.D._(video_game)"
    );
    assert_eq!(entry.keywords[3].comment.as_deref(), Some("CC-BY-SA-3.0 media"));
    assert_eq!(entry.note, "Historic real-time strategy game.");
    assert_eq!(
        entry.building.values(BuildingField::BuildSystem)[0].text,
        "Premake"
    );
}

#[test]
fn canonical_text_round_trips() {
    let parsed = parse(CANONICAL);
    assert_eq!(write_entry(&parsed.entry), CANONICAL);

    let reparsed = parse(&write_entry(&parsed.entry));
    assert_eq!(reparsed.entry, parsed.entry);
}

#[test]
fn non_canonical_text_is_normalized() {
    let text = "\n# Foo\n- Code license: MIT\n- Home: https://foo.org\n- State: mature,\n  inactive since 2009\n- Keywords: puzzle\n- Code repository: https://github.com/foo/foo\n- Code language: C\n\n\nA note.\n\n";
    let parsed = parse(text);
    assert!(matches!(
        parsed.diagnostics[0].kind,
        DiagnosticKind::OutOfOrder { .. }
    ));
    assert_eq!(parsed.entry.inactive_since(), Some(2009));

    let canonical = write_entry(&parsed.entry);
    assert!(canonical.starts_with("# Foo\n\n- Home: https://foo.org\n- State: mature, inactive since 2009\n"));
    assert!(canonical.ends_with("- Code license: MIT\n\nA note.\n"));

    // serialize(parse(serialize(x))) is stable
    let again = parse(&canonical);
    assert!(again.diagnostics.is_empty(), "{:?}", again.diagnostics);
    assert_eq!(write_entry(&again.entry), canonical);
}

#[test]
fn reports_missing_required_fields() {
    let parsed = parse("# Foo\n\n- Home: https://foo.org\n");
    let missing: Vec<_> = parsed
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::MissingField)
        .filter_map(|d| d.field.clone())
        .collect();
    assert_eq!(
        missing,
        vec![
            "State",
            "Keywords",
            "Code repository",
            "Code language",
            "Code license"
        ]
    );
    // still loaded
    assert_eq!(parsed.entry.title, "Foo");
    assert_eq!(parsed.entry.home.len(), 1);
}

#[test]
fn reports_missing_title() {
    let parsed = parse("- Home: https://foo.org\n");
    assert_eq!(parsed.diagnostics[0].kind, DiagnosticKind::MissingTitle);
    assert_eq!(parsed.entry.home.len(), 1);
}

#[test]
fn reports_unknown_and_duplicate_fields() {
    let text = CANONICAL.replace(
        "- Developer: Wildfire Games",
        "- Developer: Wildfire Games\n- Inspiration: Age of Empires\n- Developer: Somebody",
    );
    let kinds = kinds(&text);
    assert!(kinds.contains(&DiagnosticKind::UnknownField));
    assert!(kinds.contains(&DiagnosticKind::DuplicateField));
    assert_eq!(kinds.len(), 2);
}

#[test]
fn reports_unknown_vocabulary_values() {
    let text = CANONICAL
        .replace("- Code language: C++, JavaScript", "- Code language: C++, Javascript")
        .replace("- Code license: GPL-2.0", "- Code license: GPL2");
    let parsed = parse(&text);
    let unknown: Vec<_> = parsed
        .diagnostics
        .iter()
        .filter_map(|d| match &d.kind {
            DiagnosticKind::UnknownValue { value, .. } => {
                Some((d.field.clone().unwrap_or_default(), value.clone()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        unknown,
        vec![
            ("Code language".to_string(), "Javascript".to_string()),
            ("Code license".to_string(), "GPL2".to_string())
        ]
    );
    // values are kept as written
    assert_eq!(parsed.entry.code_license[0].text, "GPL2");
}

#[test]
fn reports_invalid_urls_but_accepts_escape_markers() {
    let text = CANONICAL.replace(
        "- Download: https://play0ad.com/download/",
        "- Download: @see-home, www.play0ad.com",
    );
    let kinds = kinds(&text);
    assert_eq!(
        kinds,
        vec![DiagnosticKind::InvalidUrl {
            value: "www.play0ad.com".to_string()
        }]
    );
}

#[test]
fn reports_platform_order_and_state_problems() {
    let text = CANONICAL
        .replace("- Platform: Windows, Linux, macOS", "- Platform: Linux, Windows")
        .replace("- State: beta", "- State: beta, inactive");
    let kinds = kinds(&text);
    assert!(kinds.contains(&DiagnosticKind::PlatformOrder));
    assert!(
        kinds
            .iter()
            .any(|k| matches!(k, DiagnosticKind::InvalidState { .. }))
    );
    // the invalid state is not additionally reported as missing
    assert!(!kinds.contains(&DiagnosticKind::MissingField));
}

#[test]
fn reports_keyword_problems() {
    let text = CANONICAL.replace(
        "- Keywords: strategy, clone, multiplayer online + LAN, open content (CC-BY-SA-3.0 media)",
        "- Keywords: clone, multiplayer online + bots",
    );
    let kinds = kinds(&text);
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::UnknownMultiplayerMode {
                mode: "bots".to_string()
            },
            DiagnosticKind::NoRecommendedKeyword
        ]
    );
}

#[test]
fn building_section_without_fields() {
    let text = "# Foo\n\n- Home: https://foo.org\n\n## Building\n\nJust run make.\n";
    let parsed = parse(text);
    assert!(parsed.entry.building.fields.is_empty());
    assert_eq!(parsed.entry.building.note, "Just run make.");
    assert_eq!(write_entry(&parsed.entry), text);
}

#[test]
fn unknown_building_field() {
    let text = format!("{CANONICAL}- Build tool: make\n");
    let parsed = parse(&text);
    assert_eq!(parsed.diagnostics.len(), 1);
    assert_eq!(parsed.diagnostics[0].field.as_deref(), Some("Build tool"));
    assert_eq!(parsed.diagnostics[0].kind, DiagnosticKind::UnknownField);
}
