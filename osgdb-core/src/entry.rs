//! The typed in-memory model of one entry record.

use std::collections::BTreeMap;

use crate::field::{BuildingField, Field};

/// One value of a field, with its optional annotation.
///
/// In a record a comment is the trailing parenthesised group of a value,
/// e.g. `https://example.org/repo.git (@add)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Value {
    pub text: String,
    pub comment: Option<String>,
}

impl Value {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.comment {
            Some(comment) => write!(f, "{} ({})", self.text, comment),
            None => f.write_str(&self.text),
        }
    }
}

/// Development status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Beta,
    Mature,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beta => "beta",
            Self::Mature => "mature",
        }
    }
}

const INACTIVE_PREFIX: &str = "inactive since ";

/// The `State` field: a status plus the year development stopped, if it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    pub status: Status,
    pub inactive_since: Option<u32>,
}

impl State {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            inactive_since: None,
        }
    }

    pub fn inactive_since(mut self, year: u32) -> Self {
        self.inactive_since = Some(year);
        self
    }

    pub fn is_inactive(&self) -> bool {
        self.inactive_since.is_some()
    }

    /// Build a state from the raw values of a `State` field.
    ///
    /// Accepts exactly `beta` or `mature`, optionally followed by
    /// `inactive since <year>`.
    pub fn from_values(values: &[Value]) -> Result<State, String> {
        let mut texts = values.iter().map(|v| v.text.as_str());
        let status = match texts.next() {
            Some("beta") => Status::Beta,
            Some("mature") => Status::Mature,
            Some(other) => return Err(format!("unknown status '{other}'")),
            None => return Err("no status given".to_string()),
        };
        let mut state = State::new(status);
        if let Some(second) = texts.next() {
            let year = second
                .strip_prefix(INACTIVE_PREFIX)
                .and_then(|y| y.trim().parse::<u32>().ok())
                .ok_or_else(|| format!("expected 'inactive since <year>', found '{second}'"))?;
            state.inactive_since = Some(year);
        }
        if let Some(extra) = texts.next() {
            return Err(format!("unexpected state value '{extra}'"));
        }
        Ok(state)
    }

    /// The state rendered as field values, in record order.
    pub fn to_values(&self) -> Vec<Value> {
        let mut values = vec![Value::new(self.status.as_str())];
        if let Some(year) = self.inactive_since {
            values.push(Value::new(format!("{INACTIVE_PREFIX}{year}")));
        }
        values
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status.as_str())?;
        if let Some(year) = self.inactive_since {
            write!(f, ", {INACTIVE_PREFIX}{year}")?;
        }
        Ok(())
    }
}

/// The `## Building` section of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Building {
    pub fields: BTreeMap<BuildingField, Vec<Value>>,
    pub note: String,
}

impl Building {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.note.is_empty()
    }

    pub fn values(&self, field: BuildingField) -> &[Value] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One game, tool, framework or library record.
///
/// Required fields are stored typed; the optional property fields live in
/// `optional`, whose key order is the canonical field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Relative file name, the primary key of the store.
    pub file: String,
    pub title: String,
    pub state: Option<State>,
    pub home: Vec<Value>,
    pub keywords: Vec<Value>,
    pub code_repository: Vec<Value>,
    pub code_language: Vec<Value>,
    pub code_license: Vec<Value>,
    pub optional: BTreeMap<Field, Vec<Value>>,
    pub note: String,
    pub building: Building,
}

impl Entry {
    pub fn new(file: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Values of a property field. `State` is typed and always yields an
    /// empty slice here; use [`Entry::state`] instead.
    pub fn values(&self, field: Field) -> &[Value] {
        match field {
            Field::Home => &self.home,
            Field::Keywords => &self.keywords,
            Field::CodeRepository => &self.code_repository,
            Field::CodeLanguage => &self.code_language,
            Field::CodeLicense => &self.code_license,
            Field::State => &[],
            other => self.optional.get(&other).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Whether the field is present in the record.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::State => self.state.is_some(),
            f if f.is_required() => !self.values(f).is_empty(),
            f => self.optional.contains_key(&f),
        }
    }

    /// Replace the values of a field. Setting an optional field to an empty
    /// list removes it.
    pub fn set(&mut self, field: Field, values: Vec<Value>) {
        match field {
            Field::Home => self.home = values,
            Field::Keywords => self.keywords = values,
            Field::CodeRepository => self.code_repository = values,
            Field::CodeLanguage => self.code_language = values,
            Field::CodeLicense => self.code_license = values,
            Field::State => {
                self.state = State::from_values(&values).ok();
            }
            other => {
                if values.is_empty() {
                    self.optional.remove(&other);
                } else {
                    self.optional.insert(other, values);
                }
            }
        }
    }

    /// Remove an optional field, returning its values.
    pub fn remove(&mut self, field: Field) -> Option<Vec<Value>> {
        self.optional.remove(&field)
    }

    /// Present fields in canonical order, with `State` rendered as values.
    pub fn fields(&self) -> Vec<(Field, Vec<Value>)> {
        Field::all()
            .iter()
            .filter(|f| self.has(**f))
            .map(|&f| match f {
                Field::State => (f, self.state.map(|s| s.to_values()).unwrap_or_default()),
                _ => (f, self.values(f).to_vec()),
            })
            .collect()
    }

    pub fn texts(&self, field: Field) -> impl Iterator<Item = &str> {
        self.values(field).iter().map(|v| v.text.as_str())
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.text == keyword)
    }

    pub fn has_value(&self, field: Field, text: &str) -> bool {
        self.values(field).iter().any(|v| v.text == text)
    }

    pub fn is_inactive(&self) -> bool {
        self.state.is_some_and(|s| s.is_inactive())
    }

    pub fn inactive_since(&self) -> Option<u32> {
        self.state.and_then(|s| s.inactive_since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_values() {
        let state = State::from_values(&[Value::new("mature")]).unwrap();
        assert_eq!(state, State::new(Status::Mature));

        let state =
            State::from_values(&[Value::new("beta"), Value::new("inactive since 2011")]).unwrap();
        assert_eq!(state.inactive_since, Some(2011));
        assert_eq!(state.to_string(), "beta, inactive since 2011");
    }

    #[test]
    fn state_rejects_garbage() {
        assert!(State::from_values(&[]).is_err());
        assert!(State::from_values(&[Value::new("alpha")]).is_err());
        assert!(State::from_values(&[Value::new("beta"), Value::new("inactive")]).is_err());
        assert!(
            State::from_values(&[
                Value::new("beta"),
                Value::new("inactive since 2001"),
                Value::new("mature")
            ])
            .is_err()
        );
    }

    #[test]
    fn value_display_includes_comment() {
        assert_eq!(Value::new("SDL2").to_string(), "SDL2");
        assert_eq!(
            Value::new("https://a.org/x.git").with_comment("@add").to_string(),
            "https://a.org/x.git (@add)"
        );
    }

    #[test]
    fn set_and_remove_optional_fields() {
        let mut entry = Entry::new("a.md", "A");
        assert!(!entry.has(Field::Play));
        entry.set(Field::Play, vec![Value::new("https://a.org/play")]);
        assert!(entry.has(Field::Play));
        entry.set(Field::Play, Vec::new());
        assert!(!entry.has(Field::Play));

        entry.set(Field::Download, vec![Value::new("@see-home")]);
        assert_eq!(entry.remove(Field::Download).map(|v| v.len()), Some(1));
        assert!(!entry.has(Field::Download));
    }

    #[test]
    fn fields_follow_canonical_order() {
        let mut entry = Entry::new("a.md", "A");
        entry.code_license = vec![Value::new("MIT")];
        entry.set(Field::Platform, vec![Value::new("Linux")]);
        entry.home = vec![Value::new("https://a.org")];
        entry.state = Some(State::new(Status::Beta));
        let names: Vec<_> = entry.fields().iter().map(|(f, _)| f.name()).collect();
        assert_eq!(names, vec!["Home", "State", "Platform", "Code license"]);
    }
}
