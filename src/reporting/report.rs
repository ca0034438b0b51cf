use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::batch::BatchResult;

/// Machine-readable summary of a batch conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub dry_run: bool,
    pub total_files: usize,
    pub files_changed: usize,
    pub files_failed: usize,
    pub total_changes: usize,
    pub files: Vec<FileReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub success: bool,
    pub changes_made: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConversionReport {
    pub fn from_batch(batch: &BatchResult, dry_run: bool) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            dry_run,
            total_files: batch.total_files(),
            files_changed: batch.files_changed,
            files_failed: batch.files_failed,
            total_changes: batch.total_changes,
            files: batch
                .outcomes
                .iter()
                .map(|outcome| FileReport {
                    path: outcome.path.clone(),
                    success: outcome.success,
                    changes_made: outcome.changes_made,
                    errors: outcome.errors.clone(),
                    warnings: outcome.warnings.clone(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FileOutcome;

    #[test]
    fn report_serializes_to_json() {
        let mut batch = BatchResult::default();
        batch.outcomes.push(FileOutcome {
            path: PathBuf::from("site.yml"),
            success: true,
            changes_made: 3,
            errors: Vec::new(),
            warnings: Vec::new(),
        });
        batch.total_changes = 3;
        batch.files_changed = 1;

        let report = ConversionReport::from_batch(&batch, true);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"dry_run\": true"));
        assert!(json.contains("site.yml"));
        assert!(json.contains("\"total_changes\": 3"));
    }
}
