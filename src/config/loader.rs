use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde_yaml::Value;
use tracing::{debug, warn};

use crate::config::{is_valid_fqcn, ConfigurationError};

/// Default mapping table shipped with the tool, embedded at compile time.
const DEFAULT_MAPPINGS_YAML: &str = include_str!("default_mappings.yml");

/// Minimal fallback used if the embedded resource fails to parse.
const FALLBACK_MAPPINGS: &[(&str, &str)] = &[
    ("copy", "ansible.builtin.copy"),
    ("file", "ansible.builtin.file"),
    ("service", "ansible.builtin.service"),
    ("user", "ansible.builtin.user"),
    ("group", "ansible.builtin.group"),
    ("package", "ansible.builtin.package"),
];

static DEFAULT_MAPPINGS: Lazy<HashMap<String, String>> = Lazy::new(|| {
    match serde_yaml::from_str::<Value>(DEFAULT_MAPPINGS_YAML) {
        Ok(value) => {
            let mut entries = HashMap::new();
            let mut warnings = Vec::new();
            flatten_mapping_value(&value, &mut entries, &mut warnings);
            for warning in &warnings {
                warn!("default mapping table: {warning}");
            }
            if entries.is_empty() {
                warn!("embedded default mappings were empty, using fallback set");
                fallback_entries()
            } else {
                entries
            }
        }
        Err(e) => {
            warn!("failed to parse embedded default mappings ({e}), using fallback set");
            fallback_entries()
        }
    }
});

fn fallback_entries() -> HashMap<String, String> {
    FALLBACK_MAPPINGS
        .iter()
        .map(|(short, fqcn)| (short.to_string(), fqcn.to_string()))
        .collect()
}

/// Immutable short-name → FQCN lookup table.
///
/// Built once per conversion session and treated read-only afterwards, so it
/// can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<String, String>,
    warnings: Vec<String>,
}

impl MappingTable {
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        let mut warnings = Vec::new();
        for (short_name, fqcn) in &entries {
            if !is_valid_fqcn(fqcn) {
                warnings.push(format!(
                    "mapping '{short_name}' has a value that is not a valid FQCN: '{fqcn}'"
                ));
            }
        }
        warnings.sort();
        Self { entries, warnings }
    }

    pub fn get(&self, short_name: &str) -> Option<&str> {
        self.entries.get(short_name).map(String::as_str)
    }

    pub fn contains(&self, short_name: &str) -> bool {
        self.entries.contains_key(short_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Advisory warnings collected at construction (invalid FQCN values).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Left-to-right merge: later tables' entries replace earlier ones with
    /// the same key; nothing is ever deleted.
    pub fn merge<I>(tables: I) -> MappingTable
    where
        I: IntoIterator<Item = MappingTable>,
    {
        let mut merged = HashMap::new();
        for table in tables {
            merged.extend(table.entries);
        }
        MappingTable::from_entries(merged)
    }
}

/// Loads mapping tables from the embedded defaults and user override files.
pub struct MappingLoader;

impl MappingLoader {
    /// Built-in default table. Never fails: if the embedded resource cannot
    /// be parsed, a minimal hard-coded set is used instead.
    pub fn load_default() -> MappingTable {
        let table = MappingTable::from_entries(DEFAULT_MAPPINGS.clone());
        debug!("loaded {} default module mappings", table.len());
        table
    }

    /// Load a user override file.
    ///
    /// Three shapes are accepted and flattened to the same flat form: a flat
    /// `name: fqcn` map, a nested structure of categorized maps, or a
    /// `mappings:` wrapper around either. An empty file yields an empty
    /// table.
    pub fn load_custom(path: &Path) -> Result<MappingTable, ConfigurationError> {
        if !path.exists() {
            return Err(ConfigurationError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigurationError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if content.trim().is_empty() {
            return Ok(MappingTable::default());
        }

        let root: Value =
            serde_yaml::from_str(&content).map_err(|e| ConfigurationError::InvalidFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let root = match root {
            Value::Null => return Ok(MappingTable::default()),
            value @ Value::Mapping(_) => value,
            other => {
                return Err(ConfigurationError::InvalidStructure {
                    reason: format!(
                        "expected a mapping at the document root, found {}",
                        value_kind(&other)
                    ),
                })
            }
        };

        // Unwrap an optional `mappings:` key before flattening.
        let body = match root.get("mappings") {
            Some(inner @ Value::Mapping(_)) => inner,
            _ => &root,
        };

        let mut entries = HashMap::new();
        let mut warnings = Vec::new();
        flatten_mapping_value(body, &mut entries, &mut warnings);

        let mut table = MappingTable::from_entries(entries);
        table.warnings.extend(warnings);
        debug!(
            "loaded {} custom module mappings from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Convenience: defaults merged with an optional override file.
    pub fn load(custom_path: Option<&Path>) -> Result<MappingTable, ConfigurationError> {
        let default = Self::load_default();
        match custom_path {
            Some(path) => {
                let custom = Self::load_custom(path)?;
                Ok(MappingTable::merge([default, custom]))
            }
            None => Ok(default),
        }
    }
}

/// Recursively flatten a mapping of `name: fqcn` entries, descending into
/// category sub-mappings. Non-string leaves are skipped with a warning.
fn flatten_mapping_value(
    value: &Value,
    entries: &mut HashMap<String, String>,
    warnings: &mut Vec<String>,
) {
    let Value::Mapping(map) = value else {
        return;
    };

    for (key, val) in map {
        let Some(name) = key.as_str() else {
            warnings.push(format!("skipped non-string mapping key: {key:?}"));
            continue;
        };

        match val {
            Value::String(fqcn) => {
                entries.insert(name.to_string(), fqcn.clone());
            }
            Value::Mapping(_) => flatten_mapping_value(val, entries, warnings),
            other => {
                warnings.push(format!(
                    "skipped mapping entry '{name}' with non-string value ({})",
                    value_kind(other)
                ));
            }
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
