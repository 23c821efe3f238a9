//! INI-style section parser
//!
//! Parsing is best-effort: malformed lines are dropped and never reported.
//! Missing structure shows up later as missing sections in the validator.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One `[name]` block and its key/value pairs, in insertion order.
///
/// Lookups scan the entries linearly. Profiles hold a few hundred keys at
/// most, so a plain `Vec` keeps order without an index map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    /// Create an empty section
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Section name as written between the brackets
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Raw value for a key, treating an empty value as absent
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Insert a key. A repeated key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate key/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Section name to key/value mapping produced by [`parse_sections`].
///
/// Sections keep the order in which their header first appeared. Lookup is
/// a linear scan over a handful of sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a section by its literal name
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Section names in order of first appearance
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Open a section for writing and return its index.
    ///
    /// Reopening an existing name discards whatever it held before.
    pub fn open_section(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => {
                self.sections[index].clear();
                index
            }
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }

    fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.name, section)?;
        }
        map.end()
    }
}

/// Returns the header name if the trimmed line is exactly `[name]`.
fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|name| !name.is_empty())
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(';')
}

/// Parse INI-style text into a [`SectionMap`].
///
/// Accepts `\n` and `\r\n` line endings. Blank lines, `#`/`;` comments,
/// lines before the first header and lines without `=` are skipped.
pub fn parse_sections(content: &str) -> SectionMap {
    let mut sections = SectionMap::new();
    let mut current: Option<usize> = None;
    let mut skipped = 0usize;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }

        if let Some(name) = section_header(line) {
            current = Some(sections.open_section(name));
            continue;
        }

        let pair = line.split_once('=');
        match (current.and_then(|i| sections.section_mut(i)), pair) {
            (Some(section), Some((key, value))) => section.insert(key.trim(), value.trim()),
            _ => skipped += 1,
        }
    }

    log::debug!(
        "Parsed {} section(s), skipped {} line(s)",
        sections.len(),
        skipped
    );

    sections
}
