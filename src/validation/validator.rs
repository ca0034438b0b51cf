use std::path::Path;

use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

use crate::config::MappingTable;
use crate::conversion::classifier::{is_already_fqcn, visit_tasks, RESERVED_TASK_KEYS};
use crate::validation::ValidationError;

/// How FQCN-compliant a document already is.
///
/// Counts module keys that are fully qualified against short names the
/// mapping table knows about; unknown keys are ignored so custom modules do
/// not drag the score down.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// 1.0 when every recognized module key is already fully qualified.
    pub score: f64,
    pub total_modules: usize,
    pub fqcn_modules: usize,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    /// The short module name found in the document.
    pub module: String,
    /// The FQCN the mapping table would rewrite it to.
    pub suggested_fqcn: String,
    pub task: String,
}

/// Scores documents for FQCN compliance using the same task traversal as the
/// rewrite engine.
pub struct ValidationEngine {
    mappings: MappingTable,
}

impl ValidationEngine {
    pub fn new(mappings: MappingTable) -> Self {
        Self { mappings }
    }

    pub fn validate_content(&self, content: &str) -> Result<ValidationResult, ValidationError> {
        if content.trim().is_empty() {
            return Ok(ValidationResult {
                valid: true,
                score: 1.0,
                total_modules: 0,
                fqcn_modules: 0,
                issues: Vec::new(),
            });
        }

        let root: Value =
            serde_yaml::from_str(content).map_err(|e| ValidationError::YamlParsing {
                reason: e.to_string(),
            })?;

        let mut total = 0usize;
        let mut fqcn = 0usize;
        let mut issues = Vec::new();

        visit_tasks(&root, &mut |task| {
            let label = task
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("unnamed task")
                .to_string();

            for key in task.keys().filter_map(Value::as_str) {
                if RESERVED_TASK_KEYS.contains(key) {
                    continue;
                }
                if is_already_fqcn(key) {
                    total += 1;
                    fqcn += 1;
                } else if let Some(suggested) = self.mappings.get(key) {
                    total += 1;
                    issues.push(ValidationIssue {
                        module: key.to_string(),
                        suggested_fqcn: suggested.to_string(),
                        task: label.clone(),
                    });
                }
                // Unknown short keys are not counted either way.
            }
        });

        let score = if total == 0 {
            1.0
        } else {
            fqcn as f64 / total as f64
        };
        debug!("validated content: {fqcn}/{total} module keys fully qualified");

        Ok(ValidationResult {
            valid: issues.is_empty(),
            score,
            total_modules: total,
            fqcn_modules: fqcn,
            issues,
        })
    }

    pub fn validate_file(&self, path: &Path) -> Result<ValidationResult, ValidationError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ValidationError::FileAccess {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        self.validate_content(&content)
    }
}
