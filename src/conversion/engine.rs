use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::config::{MappingLoader, MappingTable};
use crate::conversion::classifier::{
    classify_task_keys, is_play, NESTED_TASK_SECTIONS, PLAY_TASK_SECTIONS,
};
use crate::conversion::{ConversionError, ConversionResult};

/// Kind of Ansible file being converted. Playbooks and task files share the
/// same task schema; the distinction exists for callers and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
    #[default]
    Playbook,
    TaskFile,
}

impl FromStr for FileType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playbook" => Ok(FileType::Playbook),
            "taskfile" | "tasks" => Ok(FileType::TaskFile),
            other => Err(ConversionError::UnsupportedFileType {
                file_type: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Playbook => write!(f, "playbook"),
            FileType::TaskFile => write!(f, "taskfile"),
        }
    }
}

/// The module-name rewrite engine.
///
/// Holds only a read-only mapping table; every convert call is an
/// independent pure transformation, so a single `Converter` is safe to share
/// across threads.
pub struct Converter {
    mappings: MappingTable,
}

impl Converter {
    pub fn new(mappings: MappingTable) -> Self {
        Self { mappings }
    }

    /// Converter backed by the built-in default mapping table.
    pub fn with_default_mappings() -> Self {
        Self::new(MappingLoader::load_default())
    }

    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    /// Convert raw YAML text, rewriting short module names to FQCN.
    ///
    /// Parse failures are returned as `Err(ConversionError::YamlParsing)` so
    /// the caller decides abort-vs-skip; any other internal failure is
    /// absorbed into a `success = false` result. Empty and non-Ansible
    /// documents are successful no-ops.
    pub fn convert_content(
        &self,
        content: &str,
        file_type: FileType,
    ) -> Result<ConversionResult, ConversionError> {
        debug!("converting {file_type} content ({} bytes)", content.len());

        if content.trim().is_empty() {
            return Ok(ConversionResult::unchanged(content));
        }

        let mut root: Value =
            serde_yaml::from_str(content).map_err(|e| ConversionError::YamlParsing {
                reason: e.to_string(),
            })?;

        // Scalar and null documents are valid non-Ansible YAML, not errors.
        if !matches!(root, Value::Mapping(_) | Value::Sequence(_)) {
            return Ok(ConversionResult::unchanged(content));
        }

        let mut walker = Walker {
            mappings: &self.mappings,
            changes: 0,
            warnings: Vec::new(),
        };
        walker.walk_root(&mut root);

        if walker.changes == 0 {
            return Ok(ConversionResult::unchanged(content).with_warnings(walker.warnings));
        }

        match serde_yaml::to_string(&root) {
            Ok(converted) => Ok(ConversionResult::converted(
                content,
                converted,
                walker.changes,
                walker.warnings,
            )),
            Err(e) => Ok(ConversionResult::failed(
                content,
                format!("Failed to serialize converted document: {e}"),
            )),
        }
    }

    /// Convert a file in place. Reads the whole file, converts, and writes
    /// the result back unless `dry_run` is set or nothing changed. The
    /// returned `converted_content` is identical on dry and real runs.
    pub fn convert_file(
        &self,
        path: &Path,
        dry_run: bool,
    ) -> Result<ConversionResult, ConversionError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConversionError::FileAccess {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let result = self
            .convert_content(&content, FileType::Playbook)?
            .with_file_path(path);

        if !dry_run && result.success && result.changes_made > 0 {
            std::fs::write(path, &result.converted_content).map_err(|e| {
                ConversionError::FileAccess {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?;
            debug!(
                "rewrote {} module keys in {}",
                result.changes_made,
                path.display()
            );
        }

        Ok(result)
    }
}

struct Walker<'a> {
    mappings: &'a MappingTable,
    changes: usize,
    warnings: Vec<String>,
}

impl Walker<'_> {
    fn walk_root(&mut self, root: &mut Value) {
        match root {
            // A mapping root carries task lists only under recognized keys
            // (`tasks:`, `handlers:`, ...).
            Value::Mapping(map) => self.walk_sections(map),
            // A sequence root is either a playbook (list of plays) or a
            // legacy bare task list.
            Value::Sequence(items) => {
                for item in items.iter_mut() {
                    if let Value::Mapping(map) = item {
                        if is_play(map) {
                            self.walk_sections(map);
                        } else {
                            self.process_task(map);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn walk_sections(&mut self, map: &mut Mapping) {
        for (key, value) in map.iter_mut() {
            let Some(name) = key.as_str() else { continue };
            if PLAY_TASK_SECTIONS.contains(&name) || NESTED_TASK_SECTIONS.contains(&name) {
                if let Value::Sequence(tasks) = value {
                    self.walk_task_list(tasks);
                }
            }
        }
    }

    fn walk_task_list(&mut self, tasks: &mut Vec<Value>) {
        for task in tasks.iter_mut() {
            if let Value::Mapping(task_map) = task {
                self.process_task(task_map);
            }
        }
    }

    fn process_task(&mut self, task: &mut Mapping) {
        // Nested error-handling structures first.
        for (key, value) in task.iter_mut() {
            if let Some(name) = key.as_str() {
                if NESTED_TASK_SECTIONS.contains(&name) {
                    if let Value::Sequence(nested) = value {
                        self.walk_task_list(nested);
                    }
                }
            }
        }

        // Only the task mapping's own top-level keys are inspected; module
        // parameter sub-mappings are never descended into, so a parameter
        // named like a module can never be rewritten.
        let classification =
            classify_task_keys(task.keys().filter_map(Value::as_str), self.mappings);

        if classification.is_ambiguous() {
            let message = format!(
                "{}: multiple module candidates ({}), task left unchanged",
                task_label(task),
                classification.ambiguous.join(", ")
            );
            warn!("{message}");
            self.warnings.push(message);
            return;
        }

        let Some(module_key) = classification.module_key else {
            return;
        };
        let Some(fqcn) = self.mappings.get(&module_key).map(str::to_string) else {
            return;
        };

        rename_key(task, &module_key, &fqcn);
        self.changes += 1;
        debug!("rewrote '{module_key}' -> '{fqcn}'");
    }
}

/// Replace a key in place, keeping its value and the relative order of all
/// sibling keys.
fn rename_key(map: &mut Mapping, from: &str, to: &str) {
    let entries: Vec<(Value, Value)> = std::mem::take(map)
        .into_iter()
        .map(|(key, value)| {
            if key.as_str() == Some(from) {
                (Value::String(to.to_string()), value)
            } else {
                (key, value)
            }
        })
        .collect();
    *map = entries.into_iter().collect();
}

fn task_label(task: &Mapping) -> String {
    match task.get("name").and_then(Value::as_str) {
        Some(name) => format!("task '{name}'"),
        None => "unnamed task".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn converter(entries: &[(&str, &str)]) -> Converter {
        Converter::new(MappingTable::from_entries(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        ))
    }

    #[test]
    fn rename_key_preserves_sibling_order() {
        let mut map: Mapping = serde_yaml::from_str("name: t\ncopy:\n  src: a\nwhen: cond\n")
            .expect("valid fixture");
        rename_key(&mut map, "copy", "ansible.builtin.copy");

        let keys: Vec<&str> = map.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["name", "ansible.builtin.copy", "when"]);
    }

    #[test]
    fn file_type_parses_known_names() {
        assert_eq!("playbook".parse::<FileType>().unwrap(), FileType::Playbook);
        assert_eq!("taskfile".parse::<FileType>().unwrap(), FileType::TaskFile);
    }

    #[test]
    fn file_type_rejects_unknown_names() {
        let err = "role".parse::<FileType>().unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnsupportedFileType { ref file_type } if file_type == "role"
        ));
        assert_eq!(err.to_string(), "Unsupported file type: role");
    }

    #[test]
    fn scalar_document_is_a_no_op() {
        let converter = converter(&[("copy", "ansible.builtin.copy")]);
        let result = converter
            .convert_content("just a string\n", FileType::Playbook)
            .unwrap();
        assert!(result.success);
        assert_eq!(result.changes_made, 0);
        assert_eq!(result.converted_content, "just a string\n");
    }
}
