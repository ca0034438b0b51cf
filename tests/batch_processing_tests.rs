use std::fs;
use std::path::PathBuf;

use fqcn_converter::batch::BatchProcessor;
use fqcn_converter::reporting::ConversionReport;
use fqcn_converter::Converter;

fn write_tree(dir: &std::path::Path) -> (PathBuf, PathBuf, PathBuf) {
    let playbook = dir.join("site.yml");
    fs::write(
        &playbook,
        "- name: play\n  hosts: all\n  tasks:\n    - name: t\n      copy:\n        src: a\n        dest: b\n",
    )
    .unwrap();

    let tasks_dir = dir.join("roles/app/tasks");
    fs::create_dir_all(&tasks_dir).unwrap();
    let tasks = tasks_dir.join("main.yml");
    fs::write(&tasks, "- name: svc\n  service:\n    name: app\n").unwrap();

    let broken = dir.join("broken.yml");
    fs::write(&broken, "- name: x\n  copy: [\n").unwrap();

    (playbook, tasks, broken)
}

#[test]
fn test_batch_converts_directory_and_continues_past_failures() {
    let dir = tempfile::tempdir().unwrap();
    let (playbook, tasks, broken) = write_tree(dir.path());

    let processor = BatchProcessor::new(Converter::with_default_mappings());
    let result = processor.process_directory(dir.path()).unwrap();

    assert_eq!(result.total_files(), 3);
    assert_eq!(result.files_changed, 2);
    assert_eq!(result.files_failed, 1);
    assert_eq!(result.total_changes, 2);
    assert!(!result.success());

    // Good files were rewritten on disk, the broken one left untouched.
    assert!(fs::read_to_string(&playbook)
        .unwrap()
        .contains("ansible.builtin.copy:"));
    assert!(fs::read_to_string(&tasks)
        .unwrap()
        .contains("ansible.builtin.service:"));
    assert_eq!(fs::read_to_string(&broken).unwrap(), "- name: x\n  copy: [\n");
}

#[test]
fn test_batch_stop_on_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a_broken.yml"), "- name: x\n  copy: [\n").unwrap();
    fs::write(
        dir.path().join("b_good.yml"),
        "- name: t\n  copy:\n    src: a\n    dest: b\n",
    )
    .unwrap();

    let processor =
        BatchProcessor::new(Converter::with_default_mappings()).stop_on_error(true);
    let result = processor.process_directory(dir.path()).unwrap();

    // Discovery sorts, so the broken file comes first and stops the run.
    assert_eq!(result.total_files(), 1);
    assert_eq!(result.files_failed, 1);
    assert!(!fs::read_to_string(dir.path().join("b_good.yml"))
        .unwrap()
        .contains("ansible.builtin"));
}

#[test]
fn test_batch_dry_run_leaves_files_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let content = "- name: t\n  copy:\n    src: a\n    dest: b\n";
    let file = dir.path().join("tasks.yml");
    fs::write(&file, content).unwrap();

    let processor = BatchProcessor::new(Converter::with_default_mappings()).dry_run(true);
    let result = processor.process_directory(dir.path()).unwrap();

    assert_eq!(result.total_changes, 1);
    assert_eq!(fs::read_to_string(&file).unwrap(), content);
}

#[test]
fn test_report_from_batch() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path());

    let processor = BatchProcessor::new(Converter::with_default_mappings()).dry_run(true);
    let batch = processor.process_directory(dir.path()).unwrap();
    let report = ConversionReport::from_batch(&batch, true);

    assert!(report.dry_run);
    assert_eq!(report.total_files, 3);
    assert_eq!(report.files_failed, 1);
    assert_eq!(report.total_changes, 2);

    let json = report.to_json().unwrap();
    assert!(json.contains("site.yml"));
    assert!(json.contains("broken.yml"));
}
