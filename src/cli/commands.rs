use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::batch::{discover_yaml_files, BatchProcessor};
use crate::cli::output::{print_conversion_summary, print_validation_file};
use crate::config::MappingLoader;
use crate::conversion::Converter;
use crate::reporting::ConversionReport;
use crate::validation::ValidationEngine;

pub struct ConvertOptions {
    pub paths: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub stop_on_error: bool,
    pub report: Option<PathBuf>,
}

pub struct ValidateOptions {
    pub paths: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub strict: bool,
}

/// Run the convert subcommand. Returns false when any file failed.
pub fn run_convert(options: ConvertOptions) -> Result<bool> {
    let mappings = MappingLoader::load(options.config.as_deref())
        .context("failed to load mapping configuration")?;
    for warning in mappings.warnings() {
        tracing::warn!("{warning}");
    }
    info!("using {} module mappings", mappings.len());

    let files = expand_paths(&options.paths)?;
    if files.is_empty() {
        println!("No YAML files found to convert.");
        return Ok(true);
    }

    let processor = BatchProcessor::new(Converter::new(mappings))
        .dry_run(options.dry_run)
        .stop_on_error(options.stop_on_error);
    let batch = processor.process_files(&files);

    let report = ConversionReport::from_batch(&batch, options.dry_run);
    print_conversion_summary(&report);

    if let Some(report_path) = &options.report {
        let json = report.to_json().context("failed to serialize report")?;
        std::fs::write(report_path, json)
            .with_context(|| format!("failed to write report to {}", report_path.display()))?;
        println!("Report written to {}", report_path.display());
    }

    Ok(batch.success())
}

/// Run the validate subcommand. Returns false in strict mode when any file
/// is not fully compliant.
pub fn run_validate(options: ValidateOptions) -> Result<bool> {
    let mappings = MappingLoader::load(options.config.as_deref())
        .context("failed to load mapping configuration")?;
    let engine = ValidationEngine::new(mappings);

    let files = expand_paths(&options.paths)?;
    if files.is_empty() {
        println!("No YAML files found to validate.");
        return Ok(true);
    }

    let mut all_valid = true;
    for file in &files {
        match engine.validate_file(file) {
            Ok(result) => {
                print_validation_file(file, &result);
                all_valid &= result.valid;
            }
            Err(e) => {
                println!("❌ {}: {e}", file.display());
                all_valid = false;
            }
        }
    }

    Ok(all_valid || !options.strict)
}

/// Expand a mix of files and directories into a flat, ordered file list.
fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let inputs: Vec<PathBuf> = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths.to_vec()
    };

    let mut files = Vec::new();
    for path in inputs {
        if path.is_dir() {
            let discovered = discover_yaml_files(&path)
                .with_context(|| format!("discovery failed under {}", path.display()))?;
            files.extend(discovered);
        } else {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn expand_paths_mixes_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.yml"), "---\n").unwrap();
        let standalone = dir.path().join("standalone.yaml");
        fs::write(&standalone, "---\n").unwrap();

        let files =
            expand_paths(&[dir.path().to_path_buf(), standalone.clone()]).unwrap();
        assert_eq!(files.len(), 3); // both discovered plus the explicit file
        assert_eq!(files.last(), Some(&standalone));
    }
}
