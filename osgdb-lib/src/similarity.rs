//! String similarity used to spot near-duplicate keywords.

/// Scores how alike two names are, from 0 (unrelated) to 1 (identical).
pub trait SimilarityScorer {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Normalized Levenshtein similarity over a case- and punctuation-folded
/// form of both names.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinScorer;

impl LevenshteinScorer {
    /// Lowercase, map `-` and `_` to a space and drop one plural `s`, so
    /// `role-playing` and `Role playing` compare equal, as do `tool` and
    /// `tools`.
    pub fn fold(name: &str) -> String {
        let mut folded = name
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect::<String>()
            .to_lowercase();
        if folded.len() > 3 && folded.ends_with('s') && !folded.ends_with("ss") {
            folded.pop();
        }
        folded
    }
}

impl SimilarityScorer for LevenshteinScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(&Self::fold(a), &Self::fold(b))
    }
}
