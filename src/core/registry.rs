use std::io::Write;

use anyhow::{Context, Result};
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value};

/// Outcome of recording an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    Added,
    /// The `(namespace, code)` pair existed; its template was replaced in place.
    Updated,
}

/// One extracted error template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    pub namespace: String,
    pub code: String,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq)]
struct NamespaceTable {
    name: String,
    /// code → template, in first-seen order (serde_json `preserve_order`).
    codes: Map<String, Value>,
}

/// Ordered namespace → code → template table.
///
/// Namespaces and codes keep the position of their first occurrence;
/// re-recording an existing pair overwrites its template without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionTable {
    namespaces: Vec<NamespaceTable>,
}

impl ExtractionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ExtractedEntry) -> EntryAction {
        let ExtractedEntry {
            namespace,
            code,
            template,
        } = entry;

        let index = match self.position(&namespace) {
            Some(index) => index,
            None => {
                self.namespaces.push(NamespaceTable {
                    name: namespace,
                    codes: Map::new(),
                });
                self.namespaces.len() - 1
            }
        };

        match self.namespaces[index]
            .codes
            .insert(code, Value::String(template))
        {
            Some(_) => EntryAction::Updated,
            None => EntryAction::Added,
        }
    }

    fn position(&self, namespace: &str) -> Option<usize> {
        self.namespaces.iter().position(|ns| ns.name == namespace)
    }

    /// Look up the template recorded for `(namespace, code)`.
    pub fn get(&self, namespace: &str, code: &str) -> Option<&str> {
        self.position(namespace)
            .and_then(|index| self.namespaces[index].codes.get(code))
            .and_then(Value::as_str)
    }

    /// Namespaces in first-seen order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(|ns| ns.name.as_str())
    }

    /// Number of `(namespace, code)` pairs.
    pub fn len(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.codes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Compact JSON document: `{"ns":{"code":"template"}}`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize extraction table")
    }

    /// Write the document to `sink`.
    ///
    /// Takes `self` by value: a table is emitted once per run and then
    /// discarded.
    pub fn write_json<W: Write>(self, sink: &mut W) -> Result<()> {
        serde_json::to_writer(&mut *sink, &self).context("Failed to write extraction table")?;
        sink.flush().context("Failed to flush extraction table")?;
        Ok(())
    }
}

impl Serialize for ExtractionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.namespaces.len()))?;
        for ns in &self.namespaces {
            map.serialize_entry(&ns.name, &ns.codes)?;
        }
        map.end()
    }
}
