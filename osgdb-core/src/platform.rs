/// Platform identifiers allowed in the `Platform` field of an entry.
///
/// The declaration order is the canonical order: values in an entry must be
/// listed in this order, and platform TOCs are generated in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    Android,
    Ios,
    Web,
}

/// All platform variants in canonical order.
const ALL_PLATFORMS: &[Platform] = &[
    Platform::Windows,
    Platform::Linux,
    Platform::MacOs,
    Platform::Android,
    Platform::Ios,
    Platform::Web,
];

impl Platform {
    /// Name as written in entry files ("Windows", "macOS", ...).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Web => "Web",
        }
    }

    /// Lowercase slug used for TOC file names and anchors.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Web => "web",
        }
    }

    /// All six platform variants.
    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string cannot be parsed into a `Platform`.
#[derive(Debug, Clone)]
pub struct PlatformParseError(pub String);

impl std::fmt::Display for PlatformParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown platform: '{}'", self.0)
    }
}

impl std::error::Error for PlatformParseError {}

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    /// Exact match on the entry-file spelling. Entry files are case sensitive,
    /// so "linux" is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PLATFORMS
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| PlatformParseError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;
