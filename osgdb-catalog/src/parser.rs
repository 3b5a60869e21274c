//! Parser for entry record files.
//!
//! A record is a small Markdown document:
//! ```text
//! # Title
//!
//! - Home: https://example.org/, https://example.org/mirror (old)
//! - State: mature, inactive since 2012
//! - Keywords: puzzle, clone
//! ...
//!
//! Free note text.
//!
//! ## Building
//!
//! - Build system: CMake
//! ```
//!
//! Parsing is best-effort: every problem becomes a [`Diagnostic`] and the
//! entry is still returned with whatever could be read.

use osgdb_core::diagnostic::{Diagnostic, DiagnosticKind};
use osgdb_core::entry::{Entry, State, Value};
use osgdb_core::field::{BuildingField, Field, Vocabulary};
use osgdb_core::platform::Platform;
use osgdb_core::schema::{self, Schema};

/// Heading that starts the building section.
pub const BUILDING_HEADING: &str = "## Building";

/// Result of parsing one record.
#[derive(Debug, Clone)]
pub struct ParsedEntry {
    pub entry: Entry,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse the text of the record stored in `file`.
///
/// # Examples
///
/// ```
/// use osgdb_catalog::parser::parse_entry;
/// use osgdb_core::Schema;
///
/// let text = "# Foo\n\n- Home: https://foo.org\n- State: beta\n- Keywords: puzzle\n\
///             - Code repository: https://github.com/foo/foo\n- Code language: C\n\
///             - Code license: MIT\n";
/// let parsed = parse_entry("foo.md", text, &Schema::default());
/// assert!(parsed.diagnostics.is_empty());
/// assert_eq!(parsed.entry.title, "Foo");
/// ```
pub fn parse_entry(file: &str, text: &str, schema: &Schema) -> ParsedEntry {
    let mut parser = RecordParser {
        file,
        schema,
        entry: Entry::new(file, ""),
        diagnostics: Vec::new(),
    };

    let (main, building) = split_sections(text);
    let body = parser.take_title(&main);
    let block = split_block(&body);
    parser.report_stray(&block.stray);
    parser.apply_fields(&block.fields);
    parser.entry.note = block.note;

    if let Some(building) = building {
        let block = split_block(&building);
        parser.report_stray(&block.stray);
        parser.apply_building_fields(&block.fields);
        parser.entry.building.note = block.note;
    }

    parser.check_required();

    ParsedEntry {
        entry: parser.entry,
        diagnostics: parser.diagnostics,
    }
}

/// Split a field's raw text into values.
///
/// Values are separated by commas outside parentheses. A trailing
/// ` (...)` group is the value's comment.
///
/// ```
/// use osgdb_catalog::parser::split_values;
///
/// let values = split_values("SDL2, https://a.org/x.git (@add), Foo_(bar)");
/// assert_eq!(values.len(), 3);
/// assert_eq!(values[1].comment.as_deref(), Some("@add"));
/// assert_eq!(values[2].text, "Foo_(bar)");
/// ```
pub fn split_values(raw: &str) -> Vec<Value> {
    let mut items = Vec::new();
    let mut depth = 0u32;
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&raw[start..]);

    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(split_comment)
        .collect()
}

// ── Internal parsing ────────────────────────────────────────────────────────

/// Split off a trailing ` (comment)` from a single value.
fn split_comment(item: &str) -> Value {
    if !item.ends_with(')') {
        return Value::new(item);
    }
    let mut depth = 0u32;
    for (i, c) in item.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    // Only a group separated by a space is a comment; "Foo_(bar)" is a value.
                    if i > 0 && item[..i].ends_with(' ') {
                        let text = item[..i].trim_end();
                        let comment = item[i + 1..item.len() - 1].trim();
                        if !text.is_empty() {
                            return Value::new(text).with_comment(comment);
                        }
                    }
                    break;
                }
            }
            _ => {}
        }
    }
    Value::new(item)
}

/// Separate the main part of a record from its building section.
fn split_sections(text: &str) -> (Vec<&str>, Option<Vec<&str>>) {
    let lines: Vec<&str> = text.lines().collect();
    match lines.iter().position(|l| l.trim_end() == BUILDING_HEADING) {
        Some(pos) => (lines[..pos].to_vec(), Some(lines[pos + 1..].to_vec())),
        None => (lines, None),
    }
}

/// A block of a record: a contiguous list of field headings followed by note text.
struct Block {
    fields: Vec<(String, String)>,
    stray: Vec<String>,
    note: String,
}

/// Recognize `- Name: values` (or `- Name:` with the values on following lines).
fn field_heading(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("- ")?;
    let (name, values) = match rest.find(": ") {
        Some(pos) => (&rest[..pos], &rest[pos + 2..]),
        None => (rest.strip_suffix(':')?, ""),
    };
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return None;
    }
    Some((name, values))
}

fn split_block(lines: &[&str]) -> Block {
    let mut block = Block {
        fields: Vec::new(),
        stray: Vec::new(),
        note: String::new(),
    };

    let mut i = lines.iter().take_while(|l| l.trim().is_empty()).count();

    // Field section: contiguous non-blank lines starting with a heading.
    if i < lines.len() && field_heading(lines[i]).is_some() {
        while i < lines.len() && !lines[i].trim().is_empty() {
            let line = lines[i];
            if let Some((name, values)) = field_heading(line) {
                block.fields.push((name.to_string(), values.trim().to_string()));
            } else if line.starts_with("- ") {
                block.stray.push(line.trim().to_string());
            } else if let Some((_, values)) = block.fields.last_mut() {
                // continuation line
                if !values.is_empty() {
                    values.push(' ');
                }
                values.push_str(line.trim());
            }
            i += 1;
        }
    }

    block.note = lines[i.min(lines.len())..].join("\n").trim().to_string();
    block
}

struct RecordParser<'a> {
    file: &'a str,
    schema: &'a Schema,
    entry: Entry,
    diagnostics: Vec<Diagnostic>,
}

impl RecordParser<'_> {
    fn report(&mut self, field: Option<&str>, kind: DiagnosticKind) {
        let diagnostic = match field {
            Some(name) => Diagnostic::for_field(self.file, name, kind),
            None => Diagnostic::new(self.file, kind),
        };
        log::debug!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn report_stray(&mut self, stray: &[String]) {
        for line in stray {
            self.report(None, DiagnosticKind::StrayLine { line: line.clone() });
        }
    }

    /// Read the `# Title` heading and return the remaining lines.
    fn take_title<'t>(&mut self, lines: &[&'t str]) -> Vec<&'t str> {
        let first = lines.iter().position(|l| !l.trim().is_empty());
        match first {
            Some(pos) if lines[pos].starts_with("# ") => {
                self.entry.title = lines[pos][2..].trim().to_string();
                lines[pos + 1..].to_vec()
            }
            _ => {
                self.report(Some("Title"), DiagnosticKind::MissingTitle);
                lines.to_vec()
            }
        }
    }

    fn apply_fields(&mut self, fields: &[(String, String)]) {
        let mut last: Option<Field> = None;
        let mut seen: Vec<Field> = Vec::new();

        for (name, raw) in fields {
            let Some(field) = Field::from_name(name) else {
                self.report(Some(name), DiagnosticKind::UnknownField);
                continue;
            };
            if seen.contains(&field) {
                self.report(Some(name), DiagnosticKind::DuplicateField);
                continue;
            }
            if let Some(previous) = last {
                if field < previous {
                    self.report(
                        Some(name),
                        DiagnosticKind::OutOfOrder {
                            before: previous.name().to_string(),
                        },
                    );
                }
            }
            seen.push(field);
            last = Some(field);

            let values = split_values(raw);
            if values.is_empty() {
                self.report(Some(name), DiagnosticKind::EmptyField);
                continue;
            }
            self.check_values(field, &values);

            if field == Field::State {
                match State::from_values(&values) {
                    Ok(state) => self.entry.state = Some(state),
                    Err(reason) => {
                        self.report(Some(name), DiagnosticKind::InvalidState { reason });
                    }
                }
            } else {
                self.entry.set(field, values);
            }
        }
    }

    fn check_values(&mut self, field: Field, values: &[Value]) {
        let name = field.name();

        if field.is_url_field() {
            for value in values {
                if !schema::is_valid_url_value(&value.text) {
                    self.report(
                        Some(name),
                        DiagnosticKind::InvalidUrl {
                            value: value.text.clone(),
                        },
                    );
                }
            }
        }

        let Some(vocabulary) = field.vocabulary() else {
            return;
        };

        for value in values {
            if vocabulary == Vocabulary::Keyword {
                if let Some(invalid) = self.schema.invalid_multiplayer_modes(&value.text) {
                    for mode in invalid {
                        self.report(Some(name), DiagnosticKind::UnknownMultiplayerMode { mode });
                    }
                    continue;
                }
            }
            if !self.schema.is_known(vocabulary, &value.text) {
                self.report(
                    Some(name),
                    DiagnosticKind::UnknownValue {
                        vocabulary: vocabulary.as_str().to_string(),
                        value: value.text.clone(),
                    },
                );
            }
        }

        if vocabulary == Vocabulary::Platform {
            let platforms: Vec<Platform> =
                values.iter().filter_map(|v| v.text.parse().ok()).collect();
            if platforms.windows(2).any(|w| w[0] >= w[1]) {
                self.report(Some(name), DiagnosticKind::PlatformOrder);
            }
        }

        if vocabulary == Vocabulary::Keyword
            && !values
                .iter()
                .any(|v| self.schema.is_recommended_keyword(&v.text))
        {
            self.report(Some(name), DiagnosticKind::NoRecommendedKeyword);
        }
    }

    fn apply_building_fields(&mut self, fields: &[(String, String)]) {
        let mut last: Option<BuildingField> = None;

        for (name, raw) in fields {
            let Some(field) = BuildingField::from_name(name) else {
                self.report(Some(name), DiagnosticKind::UnknownField);
                continue;
            };
            if self.entry.building.fields.contains_key(&field) {
                self.report(Some(name), DiagnosticKind::DuplicateField);
                continue;
            }
            if let Some(previous) = last {
                if field < previous {
                    self.report(
                        Some(name),
                        DiagnosticKind::OutOfOrder {
                            before: previous.name().to_string(),
                        },
                    );
                }
            }
            last = Some(field);

            let values = split_values(raw);
            if values.is_empty() {
                self.report(Some(name), DiagnosticKind::EmptyField);
                continue;
            }
            self.entry.building.fields.insert(field, values);
        }
    }

    fn check_required(&mut self) {
        for field in Field::all().iter().filter(|f| f.is_required()) {
            // An invalid State was already reported as such.
            let reported = self
                .diagnostics
                .iter()
                .any(|d| d.field.as_deref() == Some(field.name()));
            if !self.entry.has(*field) && !reported {
                self.report(Some(field.name()), DiagnosticKind::MissingField);
            }
        }
    }
}
