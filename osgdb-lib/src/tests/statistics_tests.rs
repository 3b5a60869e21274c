use super::*;
use osgdb_core::{State, Value};

fn entry(title: &str, status: Status, languages: &[&str], keywords: &[&str]) -> Entry {
    let mut e = Entry::new(format!("{}.md", title.to_lowercase()), title);
    e.state = Some(State::new(status));
    e.code_language = languages.iter().map(|v| Value::new(*v)).collect();
    e.code_license = vec![Value::new("MIT")];
    e.keywords = keywords.iter().map(|v| Value::new(*v)).collect();
    e.code_repository = vec![Value::new(format!("https://github.com/x/{title}"))];
    e
}

fn sample() -> Vec<Entry> {
    let mut a = entry("Alpha", Status::Mature, &["C++"], &["action", "multiplayer online"]);
    a.building
        .fields
        .insert(BuildingField::BuildSystem, vec![Value::new("CMake")]);
    a.set(Field::Download, vec![Value::new("https://a.org/dl")]);

    let mut b = entry("Bravo", Status::Beta, &["C"], &["puzzle", "multiplayer LAN"]);
    b.state = Some(State::new(Status::Beta).inactive_since(2010));
    b.building
        .fields
        .insert(BuildingField::BuildSystem, vec![Value::new("Make")]);
    b.code_repository = vec![Value::new("https://example.org/bravo.git")];

    let mut c = entry("charlie", Status::Mature, &["C", "Lua"], &["puzzle"]);
    c.state = Some(State::new(Status::Mature).inactive_since(2018));
    c.set(Field::Platform, vec![Value::new("Linux")]);

    let d = entry("Delta", Status::Beta, &["Python"], &["action"]);
    vec![a, b, c, d]
}

#[test]
fn test_frequency_table_order_and_sum() {
    let table = FrequencyTable::from_values(["b", "A", "a", "b", "c", "c"]);
    let names: Vec<_> = table.rows().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["b", "c", "A", "a"]);
    assert_eq!(table.total(), 6);

    let sum: f64 = table.rows().iter().map(|(n, _)| table.percent(n)).sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

#[test]
fn test_compute() {
    let stats = Statistics::compute(&sample());
    assert_eq!(stats.total, 4);
    assert_eq!(stats.mature, 2);
    assert_eq!(stats.beta, 2);
    assert_eq!(
        stats.inactive,
        vec![("charlie".to_string(), 2018), ("Bravo".to_string(), 2010)]
    );

    assert_eq!(stats.keywords.count("multiplayer"), 2);
    assert_eq!(stats.keywords.count("multiplayer LAN"), 0);
    assert_eq!(stats.languages.total(), 5);
    assert_eq!(stats.languages.rows()[0], ("C".to_string(), 2));

    assert_eq!(stats.without_download, vec!["Bravo", "charlie", "Delta"]);
    assert_eq!(stats.unpopular_repository, vec!["Bravo"]);
    assert_eq!(stats.with_build_system, 2);
    assert_eq!(stats.c_without_build_system, vec!["charlie"]);
    assert_eq!(stats.c_not_cmake, vec!["Bravo"]);
    assert_eq!(stats.with_platform, 1);
}

#[test]
fn test_render() {
    let report = Statistics::compute(&sample()).render("2024-01-02 03:04:05");
    assert!(report.starts_with(
        "[comment]: # (autogenerated content, do not edit)\n# Statistics\n\n\
         analyzed 4 entries on 2024-01-02 03:04:05\n\n## State\n\n\
         - mature: 2 (50.0%)\n- beta: 2 (50.0%)\n- inactive: 2 (50.0%)\n\n\
         ##### Inactive State\n\ncharlie (2018), Bravo (2010)\n\n"
    ));
    assert!(report.contains("##### Language frequency\n\n- C (40.0%)\n- C++ (20.0%)\n"));
    assert!(report.contains("Build systems information available for 50.0% of all projects."));
    assert!(report.contains("##### C and C++ projects with a build system different from CMake (1)\n\nBravo\n\n"));
    assert!(report.ends_with("##### Platforms frequency\n\n- Linux (100.0%)\n\n"));

    // same store, same timestamp, same bytes
    assert_eq!(report, Statistics::compute(&sample()).render("2024-01-02 03:04:05"));
}
