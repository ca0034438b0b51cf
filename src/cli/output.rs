use std::path::Path;

use crate::reporting::ConversionReport;
use crate::validation::ValidationResult;

/// Print a human-readable batch conversion summary.
pub fn print_conversion_summary(report: &ConversionReport) {
    println!();
    if report.dry_run {
        println!("🔍 Dry run — no files were modified");
    }
    println!("📋 Conversion Summary");
    println!("================================");
    println!("  Files processed: {}", report.total_files);
    println!("  Files changed:   {}", report.files_changed);
    println!("  Module rewrites: {}", report.total_changes);
    if report.files_failed > 0 {
        println!("  Files failed:    {}", report.files_failed);
    }
    println!();

    for file in &report.files {
        if !file.success {
            println!("❌ {}", file.path.display());
            for error in &file.errors {
                println!("     {error}");
            }
        } else if file.changes_made > 0 {
            println!(
                "✅ {} ({} rewrite{})",
                file.path.display(),
                file.changes_made,
                if file.changes_made == 1 { "" } else { "s" }
            );
        }
        for warning in &file.warnings {
            println!("⚠️  {}: {warning}", file.path.display());
        }
    }
}

/// Print one file's validation outcome.
pub fn print_validation_file(path: &Path, result: &ValidationResult) {
    if result.valid {
        println!(
            "✅ {} (score {:.2}, {} module keys)",
            path.display(),
            result.score,
            result.total_modules
        );
    } else {
        println!(
            "⚠️  {} (score {:.2}, {}/{} fully qualified)",
            path.display(),
            result.score,
            result.fqcn_modules,
            result.total_modules
        );
        for issue in &result.issues {
            println!(
                "     {}: '{}' should be '{}'",
                issue.task, issue.module, issue.suggested_fqcn
            );
        }
    }
}
