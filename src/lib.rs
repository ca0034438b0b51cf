//! FQCN Converter - Ansible module name migration tool
//!
//! This crate converts Ansible automation content (playbooks, task files)
//! from short legacy module names to Fully Qualified Collection Names,
//! rewriting exactly the module-invocation keys and leaving directives and
//! module parameters untouched.

pub mod batch;
pub mod cli;
pub mod config;
pub mod conversion;
pub mod reporting;
pub mod validation;

pub use config::{MappingLoader, MappingTable};
pub use conversion::{ConversionResult, Converter, FileType};
