/// Case-insensitive sort key, ties broken by the original string so the
/// order is total and stable across runs.
pub fn casefold_key(s: &str) -> (String, String) {
    (s.to_lowercase(), s.to_string())
}

/// Sort strings case-insensitively.
pub fn sort_casefold(items: &mut [String]) {
    items.sort_by_cached_key(|s| casefold_key(s));
}

/// Uppercase the first character ("visual novel" -> "Visual novel").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => {
            let mut out = c.to_uppercase().to_string();
            out.extend(chars);
            out
        }
        None => String::new(),
    }
}

/// Percentage of `part` in `total`, 0 when `total` is 0.
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_casefold() {
        let mut items = vec![
            "beta".to_string(),
            "Alpha".to_string(),
            "alpha".to_string(),
            "Gamma".to_string(),
        ];
        sort_casefold(&mut items);
        assert_eq!(items, vec!["Alpha", "alpha", "beta", "Gamma"]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("visual novel"), "Visual novel");
        assert_eq!(capitalize("game engine"), "Game engine");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(3, 0), 0.0);
    }
}
