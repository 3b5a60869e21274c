use super::*;

#[test]
fn canonical_names_round_trip() {
    for &platform in Platform::all() {
        let parsed: Platform = platform.name().parse().unwrap();
        assert_eq!(parsed, platform, "round-trip failed for {:?}", platform);
    }
}

#[test]
fn parsing_is_case_sensitive() {
    assert!("linux".parse::<Platform>().is_err());
    assert!("MacOS".parse::<Platform>().is_err());
    assert_eq!("macOS".parse::<Platform>().unwrap(), Platform::MacOs);
}

#[test]
fn declaration_order_is_canonical_order() {
    let mut sorted = Platform::all().to_vec();
    sorted.sort();
    assert_eq!(sorted, Platform::all());
    assert_eq!(Platform::all().last(), Some(&Platform::Web));
}

#[test]
fn slugs_are_lowercase_names() {
    for platform in Platform::all() {
        assert_eq!(platform.slug(), platform.name().to_lowercase());
    }
}
