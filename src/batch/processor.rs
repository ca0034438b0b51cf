use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::batch::{discover_yaml_files, BatchError};
use crate::conversion::Converter;

/// Outcome for one file in a batch run.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub success: bool,
    pub changes_made: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub outcomes: Vec<FileOutcome>,
    pub total_changes: usize,
    pub files_changed: usize,
    pub files_failed: usize,
}

impl BatchResult {
    pub fn success(&self) -> bool {
        self.files_failed == 0
    }

    pub fn total_files(&self) -> usize {
        self.outcomes.len()
    }

    fn record(&mut self, outcome: FileOutcome) {
        if !outcome.success {
            self.files_failed += 1;
        } else if outcome.changes_made > 0 {
            self.files_changed += 1;
        }
        self.total_changes += outcome.changes_made;
        self.outcomes.push(outcome);
    }
}

/// Runs the converter over many files, treating each file as an independent
/// unit of work. A failed file never blocks the rest unless `stop_on_error`
/// is set.
pub struct BatchProcessor {
    converter: Converter,
    dry_run: bool,
    stop_on_error: bool,
}

impl BatchProcessor {
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            dry_run: false,
            stop_on_error: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn stop_on_error(mut self, stop_on_error: bool) -> Self {
        self.stop_on_error = stop_on_error;
        self
    }

    pub fn process_directory(&self, root: &Path) -> Result<BatchResult, BatchError> {
        let files = discover_yaml_files(root)?;
        Ok(self.process_files(&files))
    }

    pub fn process_files(&self, paths: &[PathBuf]) -> BatchResult {
        let mut result = BatchResult::default();

        for path in paths {
            let outcome = match self.converter.convert_file(path, self.dry_run) {
                Ok(conversion) => FileOutcome {
                    path: path.clone(),
                    success: conversion.success,
                    changes_made: conversion.changes_made,
                    errors: conversion.errors,
                    warnings: conversion.warnings,
                },
                Err(e) => FileOutcome {
                    path: path.clone(),
                    success: false,
                    changes_made: 0,
                    errors: vec![e.to_string()],
                    warnings: Vec::new(),
                },
            };

            let failed = !outcome.success;
            if failed {
                warn!("conversion failed for {}: {:?}", path.display(), outcome.errors);
            }
            result.record(outcome);

            if failed && self.stop_on_error {
                warn!("stopping batch run after first error");
                break;
            }
        }

        info!(
            "batch complete: {} files, {} changed, {} failed, {} total rewrites",
            result.total_files(),
            result.files_changed,
            result.files_failed,
            result.total_changes
        );
        result
    }
}
