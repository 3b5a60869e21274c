//! Field names of an entry record.
//!
//! A record consists of the implicit `File`, the `Title` heading, a block of
//! property fields, a free `Note` and an optional `Building` section. Only the
//! property fields and the building fields are named in the record text; they
//! are modelled here as enums whose declaration order is the canonical order.

/// Closed vocabularies a field's values are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    Language,
    License,
    Platform,
    Keyword,
}

impl Vocabulary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Language => "code language",
            Self::License => "license",
            Self::Platform => "platform",
            Self::Keyword => "keyword",
        }
    }
}

/// A property field (the `- Name: values` lines of a record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Home,
    Media,
    Inspirations,
    State,
    Play,
    Download,
    Platform,
    Keywords,
    CodeRepository,
    CodeLanguage,
    CodeLicense,
    CodeDependencies,
    AssetsLicense,
    Developer,
}

const ALL_FIELDS: &[Field] = &[
    Field::Home,
    Field::Media,
    Field::Inspirations,
    Field::State,
    Field::Play,
    Field::Download,
    Field::Platform,
    Field::Keywords,
    Field::CodeRepository,
    Field::CodeLanguage,
    Field::CodeLicense,
    Field::CodeDependencies,
    Field::AssetsLicense,
    Field::Developer,
];

impl Field {
    /// Field name as written in a record.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Media => "Media",
            Self::Inspirations => "Inspirations",
            Self::State => "State",
            Self::Play => "Play",
            Self::Download => "Download",
            Self::Platform => "Platform",
            Self::Keywords => "Keywords",
            Self::CodeRepository => "Code repository",
            Self::CodeLanguage => "Code language",
            Self::CodeLicense => "Code license",
            Self::CodeDependencies => "Code dependencies",
            Self::AssetsLicense => "Assets license",
            Self::Developer => "Developer",
        }
    }

    /// Fields every record must carry.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Self::Home
                | Self::State
                | Self::Keywords
                | Self::CodeRepository
                | Self::CodeLanguage
                | Self::CodeLicense
        )
    }

    /// Fields whose values are URLs (or one of the escape markers).
    pub fn is_url_field(&self) -> bool {
        matches!(
            self,
            Self::Home | Self::Media | Self::Play | Self::Download | Self::CodeRepository
        )
    }

    /// The closed vocabulary this field's values must belong to, if any.
    pub fn vocabulary(&self) -> Option<Vocabulary> {
        match self {
            Self::CodeLanguage => Some(Vocabulary::Language),
            Self::CodeLicense | Self::AssetsLicense => Some(Vocabulary::License),
            Self::Platform => Some(Vocabulary::Platform),
            Self::Keywords => Some(Vocabulary::Keyword),
            _ => None,
        }
    }

    /// All property fields in canonical order.
    pub fn all() -> &'static [Field] {
        ALL_FIELDS
    }

    pub fn from_name(name: &str) -> Option<Field> {
        ALL_FIELDS.iter().copied().find(|f| f.name() == name)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A field of the `## Building` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildingField {
    BuildSystem,
    BuildInstructions,
}

impl BuildingField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BuildSystem => "Build system",
            Self::BuildInstructions => "Build instructions",
        }
    }

    pub fn all() -> &'static [BuildingField] {
        &[Self::BuildSystem, Self::BuildInstructions]
    }

    pub fn from_name(name: &str) -> Option<BuildingField> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }
}

impl std::fmt::Display for BuildingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for field in Field::all() {
            assert_eq!(Field::from_name(field.name()), Some(*field));
        }
        for field in BuildingField::all() {
            assert_eq!(BuildingField::from_name(field.name()), Some(*field));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(Field::from_name("Code Language"), None);
        assert_eq!(Field::from_name("Inspiration"), None);
        assert_eq!(BuildingField::from_name("Note"), None);
    }

    #[test]
    fn ord_follows_canonical_order() {
        assert!(Field::Home < Field::State);
        assert!(Field::State < Field::Keywords);
        assert!(Field::CodeLicense < Field::CodeDependencies);
        assert!(Field::AssetsLicense < Field::Developer);
    }

    #[test]
    fn required_fields() {
        let required: Vec<_> = Field::all().iter().filter(|f| f.is_required()).collect();
        assert_eq!(
            required,
            vec![
                &Field::Home,
                &Field::State,
                &Field::Keywords,
                &Field::CodeRepository,
                &Field::CodeLanguage,
                &Field::CodeLicense
            ]
        );
    }
}
