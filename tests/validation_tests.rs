use std::fs;
use std::path::Path;

use fqcn_converter::validation::{ValidationEngine, ValidationError};
use fqcn_converter::{Converter, FileType, MappingLoader};

fn engine() -> ValidationEngine {
    ValidationEngine::new(MappingLoader::load_default())
}

#[test]
fn test_unconverted_fixture_scores_below_one() {
    let content = fs::read_to_string("tests/fixtures/playbooks/simple_playbook.yml")
        .expect("Failed to read test fixture");
    let result = engine().validate_content(&content).unwrap();

    assert!(!result.valid);
    assert_eq!(result.fqcn_modules, 0);
    assert_eq!(result.total_modules, 4);
    assert_eq!(result.score, 0.0);
    assert!(result
        .issues
        .iter()
        .any(|issue| issue.module == "copy"
            && issue.suggested_fqcn == "ansible.builtin.copy"));
}

#[test]
fn test_converted_fixture_scores_one() {
    let content = fs::read_to_string("tests/fixtures/playbooks/already_fqcn.yml")
        .expect("Failed to read test fixture");
    let result = engine().validate_content(&content).unwrap();

    assert!(result.valid);
    assert_eq!(result.score, 1.0);
    assert_eq!(result.total_modules, 2);
}

#[test]
fn test_conversion_output_validates_clean() {
    let content = fs::read_to_string("tests/fixtures/playbooks/blocks.yml")
        .expect("Failed to read test fixture");
    let converter = Converter::with_default_mappings();
    let converted = converter
        .convert_content(&content, FileType::Playbook)
        .unwrap();
    assert!(converted.changes_made > 0);

    let result = engine()
        .validate_content(&converted.converted_content)
        .unwrap();
    assert!(result.valid, "issues: {:?}", result.issues);
    assert_eq!(result.score, 1.0);
}

#[test]
fn test_validate_file_reads_from_disk() {
    let result = engine()
        .validate_file(Path::new("tests/fixtures/playbooks/non_ansible.yml"))
        .unwrap();
    assert!(result.valid);
    assert_eq!(result.total_modules, 0);
}

#[test]
fn test_validate_malformed_yaml_is_an_error() {
    let err = engine().validate_content("- name: x\n  copy: [\n").unwrap_err();
    assert!(matches!(err, ValidationError::YamlParsing { .. }));
}

#[test]
fn test_validate_missing_file_is_an_error() {
    let err = engine()
        .validate_file(Path::new("/nonexistent/playbook.yml"))
        .unwrap_err();
    assert!(matches!(err, ValidationError::FileAccess { .. }));
}
