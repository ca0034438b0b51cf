use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde_yaml::{Mapping, Value};

use crate::config::MappingTable;

/// Task- and play-level directive keys that are never module invocations.
pub static RESERVED_TASK_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "name",
        "hosts",
        "become",
        "become_user",
        "become_method",
        "vars",
        "vars_files",
        "when",
        "loop",
        "loop_control",
        "with_items",
        "with_dict",
        "with_fileglob",
        "with_first_found",
        "register",
        "notify",
        "listen",
        "tags",
        "ignore_errors",
        "changed_when",
        "failed_when",
        "delegate_to",
        "block",
        "rescue",
        "always",
        "environment",
        "args",
        "run_once",
        "any_errors_fatal",
        "check_mode",
        "no_log",
        "local_action",
        "async",
        "poll",
        "until",
        "retries",
        "delay",
        "roles",
        "gather_facts",
        "serial",
        "throttle",
        "connection",
        "timeout",
    ]
    .into_iter()
    .collect()
});

/// Keys on a play mapping whose values are task lists.
pub const PLAY_TASK_SECTIONS: &[&str] = &["tasks", "handlers", "pre_tasks", "post_tasks"];

/// Keys on a task mapping whose values are nested task lists.
pub const NESTED_TASK_SECTIONS: &[&str] = &["block", "rescue", "always"];

/// A key with two or more dots is already fully qualified and is left alone.
pub fn is_already_fqcn(key: &str) -> bool {
    key.matches('.').count() >= 2
}

/// Classification of one task mapping's top-level keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyClassification {
    /// The single rewritable module key, if exactly one was found.
    pub module_key: Option<String>,
    /// All candidates when more than one key matched; the task is skipped.
    pub ambiguous: Vec<String>,
}

impl KeyClassification {
    pub fn is_ambiguous(&self) -> bool {
        !self.ambiguous.is_empty()
    }
}

/// Determine which key of a task mapping, if any, denotes the module being
/// invoked.
///
/// A candidate key is not a reserved directive, not already dotted as an
/// FQCN, and present in the mapping table. Exactly one candidate yields a
/// rewrite; more than one is ambiguous and never guessed at; zero is a
/// silent skip (the task may already be fully qualified or use an unknown
/// module).
pub fn classify_task_keys<'a, I>(keys: I, table: &MappingTable) -> KeyClassification
where
    I: IntoIterator<Item = &'a str>,
{
    let candidates: Vec<String> = keys
        .into_iter()
        .filter(|key| !RESERVED_TASK_KEYS.contains(key))
        .filter(|key| !is_already_fqcn(key))
        .filter(|key| table.contains(key))
        .map(str::to_string)
        .collect();

    match candidates.len() {
        1 => KeyClassification {
            module_key: candidates.into_iter().next(),
            ambiguous: Vec::new(),
        },
        0 => KeyClassification::default(),
        _ => KeyClassification {
            module_key: None,
            ambiguous: candidates,
        },
    }
}

/// Read-only traversal over every task mapping in a parsed document, in
/// document order. Descends into plays, bare top-level task lists, and
/// nested `block`/`rescue`/`always` lists.
pub(crate) fn visit_tasks<F>(root: &Value, f: &mut F)
where
    F: FnMut(&Mapping),
{
    match root {
        Value::Mapping(map) => visit_sections(map, f),
        Value::Sequence(items) => {
            for item in items {
                if let Value::Mapping(map) = item {
                    if is_play(map) {
                        visit_sections(map, f);
                    } else {
                        visit_task(map, f);
                    }
                }
            }
        }
        _ => {}
    }
}

/// A mapping with any play-level task section is a play, not a task.
pub(crate) fn is_play(map: &Mapping) -> bool {
    map.iter().any(|(key, value)| {
        matches!(key.as_str(), Some(name) if PLAY_TASK_SECTIONS.contains(&name))
            && matches!(value, Value::Sequence(_))
    })
}

fn visit_sections<F>(map: &Mapping, f: &mut F)
where
    F: FnMut(&Mapping),
{
    for (key, value) in map {
        let Some(name) = key.as_str() else { continue };
        if PLAY_TASK_SECTIONS.contains(&name) || NESTED_TASK_SECTIONS.contains(&name) {
            if let Value::Sequence(tasks) = value {
                for task in tasks {
                    if let Value::Mapping(task_map) = task {
                        visit_task(task_map, f);
                    }
                }
            }
        }
    }
}

fn visit_task<F>(map: &Mapping, f: &mut F)
where
    F: FnMut(&Mapping),
{
    for (key, value) in map {
        if let Some(name) = key.as_str() {
            if NESTED_TASK_SECTIONS.contains(&name) {
                if let Value::Sequence(tasks) = value {
                    for task in tasks {
                        if let Value::Mapping(task_map) = task {
                            visit_task(task_map, f);
                        }
                    }
                }
            }
        }
    }
    f(map);
}
