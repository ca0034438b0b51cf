use std::path::PathBuf;

/// Outcome of one conversion call. Constructed fresh per call and immutable
/// afterwards; callers decide what to do with it (write to file, fold into a
/// batch report).
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Whether the conversion completed without internal errors.
    pub success: bool,
    /// Number of module keys rewritten.
    pub changes_made: usize,
    /// Error messages; non-empty only when `success` is false.
    pub errors: Vec<String>,
    /// Advisory messages (ambiguous tasks, skipped entries).
    pub warnings: Vec<String>,
    /// The input text, retained for diffing and reporting.
    pub original_content: String,
    /// The output text; equal to the input when `changes_made` is 0.
    pub converted_content: String,
    /// Set by the file wrapper, absent for content-level conversions.
    pub file_path: Option<PathBuf>,
}

impl ConversionResult {
    /// Successful no-op: nothing to rewrite, output equals input.
    pub fn unchanged(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            success: true,
            changes_made: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            original_content: content.clone(),
            converted_content: content,
            file_path: None,
        }
    }

    /// Successful conversion with rewritten output.
    pub fn converted(
        original: impl Into<String>,
        converted: impl Into<String>,
        changes_made: usize,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            changes_made,
            errors: Vec::new(),
            warnings,
            original_content: original.into(),
            converted_content: converted.into(),
            file_path: None,
        }
    }

    /// Failed conversion; the output falls back to the input so callers never
    /// see partial rewrites.
    pub fn failed(original: impl Into<String>, error: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            success: false,
            changes_made: 0,
            errors: vec![error.into()],
            warnings: Vec::new(),
            original_content: original.clone(),
            converted_content: original,
            file_path: None,
        }
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}
