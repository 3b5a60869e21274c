//! Schema and vocabulary registry.
//!
//! The default vocabularies are compiled in; [`Schema`] copies them into owned
//! sets so a repository configuration can extend them before the schema is
//! handed (immutably) to the parser and the checkers.

use std::collections::{BTreeMap, BTreeSet};

use crate::field::Vocabulary;
use crate::platform::Platform;

/// URL schemes accepted in URL fields.
pub const VALID_URL_PREFIXES: &[&str] = &[
    "http://", "https://", "git://", "svn://", "ftp://", "bzr://",
];

/// Escape markers accepted in URL fields instead of a URL.
pub const URL_ESCAPE_PREFIXES: &[&str] = &["@see-", "@not-", "?"];

/// Keywords defining the principal categories, in display order.
/// Every entry should carry at least one of them.
pub const RECOMMENDED_KEYWORDS: &[&str] = &[
    "action",
    "arcade",
    "adventure",
    "visual novel",
    "sports",
    "platform",
    "puzzle",
    "role playing",
    "simulation",
    "strategy",
    "cards",
    "board",
    "music",
    "educational",
    "tool",
    "game engine",
    "framework",
    "library",
    "remake",
];

/// Further keywords in common use besides the recommended ones.
pub const GENERAL_KEYWORDS: &[&str] = &[
    "2D",
    "3D",
    "clone",
    "commercial content",
    "first-person",
    "for kids",
    "free content",
    "open content",
    "multiplayer",
    "real time",
    "requires 3D",
    "requires libraries",
    "roguelike",
    "shooter",
    "single-player",
    "text-based",
    "third-person",
    "turn-based",
    "unfinished",
];

pub const KNOWN_LANGUAGES: &[&str] = &[
    "AGS Script",
    "ActionScript",
    "Ada",
    "AngelScript",
    "Assembly",
    "Basic",
    "Blender Script",
    "BlitzMax",
    "C",
    "C#",
    "C++",
    "Clojure",
    "CoffeeScript",
    "ColdFusion",
    "D",
    "DM",
    "Dart",
    "Dia",
    "Elm",
    "Emacs Lisp",
    "F#",
    "GDScript",
    "Game Maker Script",
    "Go",
    "Groovy",
    "Haskell",
    "Haxe",
    "Io",
    "Java",
    "JavaScript",
    "Kotlin",
    "Lisp",
    "Lua",
    "MegaGlest Script",
    "MoonScript",
    "None",
    "OCaml",
    "Objective-C",
    "PHP",
    "Pascal",
    "Perl",
    "Python",
    "QuakeC",
    "R",
    "Ren'Py",
    "Ruby",
    "Rust",
    "Scala",
    "Scheme",
    "Script",
    "Shell",
    "Swift",
    "TorqueScript",
    "TypeScript",
    "Vala",
    "Visual Basic",
    "XUL",
    "ZenScript",
    "ooc",
    "?",
];

pub const KNOWN_LICENSES: &[&str] = &[
    "2-clause BSD",
    "3-clause BSD",
    "AFL-3.0",
    "AGPL-3.0",
    "Apache-2.0",
    "Artistic License-1.0",
    "Artistic License-2.0",
    "Boost-1.0",
    "CC-BY-NC-3.0",
    "CC-BY-NC-SA-2.0",
    "CC-BY-NC-SA-3.0",
    "CC-BY-SA-3.0",
    "CC-BY-NC-SA-4.0",
    "CC-BY-SA-4.0",
    "CC0",
    "Custom",
    "EPL-2.0",
    "GPL-2.0",
    "GPL-3.0",
    "IJG",
    "ISC",
    "Java Research License",
    "LGPL-2.0",
    "LGPL-2.1",
    "LGPL-3.0",
    "MAME",
    "MIT",
    "MPL-1.1",
    "MPL-2.0",
    "MS-PL",
    "MS-RL",
    "NetHack General Public License",
    "None",
    "Proprietary",
    "Public domain",
    "SWIG license",
    "Unlicense",
    "WTFPL",
    "wxWindows license",
    "zlib",
    "?",
];

/// Modes allowed after `multiplayer`, combined with `+`.
pub const MULTIPLAYER_MODES: &[&str] = &[
    "competitive",
    "co-op",
    "hotseat",
    "LAN",
    "local",
    "massive",
    "matchmaking",
    "online",
    "split-screen",
];

/// Entry titles and the names other entries use for them in `Code dependencies`.
pub const DEPENDENCY_ALIASES: &[(&str, &[&str])] = &[
    ("Simple DirectMedia Layer", &["SDL", "SDL2"]),
    ("Simple and Fast Multimedia Library", &["SFML"]),
    ("Boost (C++ Libraries)", &["Boost"]),
    ("SGE Game Engine", &["SGE"]),
    ("MegaGlest", &["MegaGlest Engine"]),
];

/// Dependencies that intentionally have no entry of their own, with a home URL.
pub const DEPENDENCIES_WITHOUT_ENTRY: &[(&str, &str)] = &[
    ("OpenGL", "https://www.opengl.org/"),
    ("GLUT", "https://www.opengl.org/resources/libraries/"),
    ("WebGL", "https://www.khronos.org/webgl/"),
    ("Unity", "https://unity.com/solutions/game"),
    (".NET", "https://dotnet.microsoft.com/"),
    ("Vulkan", "https://www.khronos.org/vulkan/"),
    ("KDE Frameworks", "https://kde.org/products/frameworks/"),
    ("jQuery", "https://jquery.com/"),
    ("node.js", "https://nodejs.org/en/"),
    ("GNU Guile", "https://www.gnu.org/software/guile/"),
    ("tkinter", "https://docs.python.org/3/library/tk.html"),
];

/// Keyword prefix that is collapsed into a single bucket for analysis.
pub const MULTIPLAYER_PREFIX: &str = "multiplayer";

/// Collapse parameterised multiplayer keywords (`multiplayer online + LAN`)
/// into the plain `multiplayer` bucket.
pub fn collapse_keyword(keyword: &str) -> &str {
    if keyword.starts_with(MULTIPLAYER_PREFIX) {
        MULTIPLAYER_PREFIX
    } else {
        keyword
    }
}

/// Whether a value is acceptable in a URL field.
pub fn is_valid_url_value(text: &str) -> bool {
    VALID_URL_PREFIXES
        .iter()
        .chain(URL_ESCAPE_PREFIXES)
        .any(|p| text.starts_with(p))
}

/// Immutable vocabulary registry shared by every component.
#[derive(Debug, Clone)]
pub struct Schema {
    pub languages: BTreeSet<String>,
    pub licenses: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
    pub recommended_keywords: Vec<String>,
    pub multiplayer_modes: BTreeSet<String>,
    /// Entry title -> names used for it in `Code dependencies`.
    pub dependency_aliases: BTreeMap<String, Vec<String>>,
    /// Dependency name -> home URL.
    pub dependencies_without_entry: BTreeMap<String, String>,
}

impl Default for Schema {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>();
        let mut keywords = owned(RECOMMENDED_KEYWORDS);
        keywords.extend(owned(GENERAL_KEYWORDS));
        Self {
            languages: owned(KNOWN_LANGUAGES),
            licenses: owned(KNOWN_LICENSES),
            keywords,
            recommended_keywords: RECOMMENDED_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            multiplayer_modes: owned(MULTIPLAYER_MODES),
            dependency_aliases: DEPENDENCY_ALIASES
                .iter()
                .map(|(title, aliases)| {
                    (
                        title.to_string(),
                        aliases.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
            dependencies_without_entry: DEPENDENCIES_WITHOUT_ENTRY
                .iter()
                .map(|(name, url)| (name.to_string(), url.to_string()))
                .collect(),
        }
    }
}

impl Schema {
    /// Whether `value` belongs to the given vocabulary.
    pub fn is_known(&self, vocabulary: Vocabulary, value: &str) -> bool {
        match vocabulary {
            Vocabulary::Language => self.languages.contains(value),
            Vocabulary::License => self.licenses.contains(value),
            Vocabulary::Platform => value.parse::<Platform>().is_ok(),
            Vocabulary::Keyword => {
                self.keywords.contains(value) || self.invalid_multiplayer_modes(value) == Some(vec![])
            }
        }
    }

    /// For a `multiplayer ...` keyword, the modes that are not valid.
    /// Returns `None` when the keyword is not a multiplayer keyword.
    pub fn invalid_multiplayer_modes(&self, keyword: &str) -> Option<Vec<String>> {
        let rest = keyword.strip_prefix(MULTIPLAYER_PREFIX)?;
        let rest = rest.trim();
        if rest.is_empty() {
            return Some(Vec::new());
        }
        Some(
            rest.split('+')
                .map(str::trim)
                .filter(|mode| !self.multiplayer_modes.contains(*mode))
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_recommended_keyword(&self, keyword: &str) -> bool {
        self.recommended_keywords.iter().any(|k| k == keyword)
    }
}
