//! CLI integration tests
//!
//! These drive the built `morte` binary against temporary run and reference
//! directories and check exit codes and printed output.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const PBS_LOG: &str = "\
   Service Units:      123.45\n\
   NCPUs Requested:    234                    NCPUs Used: 123\n\
                                           CPU Time Used: 20:30:00\n\
   Memory Requested:   1.5TB                 Memory Used: 200GB\n\
   Walltime requested: 01:00:00            Walltime Used: 00:30:36\n\
   JobFS requested:    1.00KB                 JobFS used: 0.00MB\n";

fn write_file(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

fn morte(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_morte"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// `base/` with both test-model outputs and an empty `reference/`
fn test_model_run(dir: &TempDir) -> (String, String) {
    let base = dir.path().join("base");
    write_file(&base, "foo/file1", b"first output");
    write_file(&base, "bar/file2", b"second output");
    let reference = dir.path().join("reference");
    (
        base.to_str().unwrap().to_string(),
        reference.to_str().unwrap().to_string(),
    )
}

#[test]
fn test_check_bootstraps_then_passes() {
    // Given: a run with no reference baseline yet
    let dir = TempDir::new().unwrap();
    let (base, reference) = test_model_run(&dir);

    // When
    let output = morte(&[
        "check", "--model", "test", "--output", base.as_str(), "--reference", reference.as_str(),
    ]);

    // Then: the baseline is created from this run, which reproduces it
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout(&output).starts_with("Reproducible"));
    assert!(dir.path().join("reference/manifest.yaml").is_file());
    assert!(dir.path().join("reference/bar/file2").is_file());
}

#[test]
fn test_check_reports_changed_output_with_exit_code_2() {
    // Given: a baseline, then foo/file1 changes
    let dir = TempDir::new().unwrap();
    let (base, reference) = test_model_run(&dir);
    let args = [
        "check", "--model", "test", "--output", base.as_str(), "--reference", reference.as_str(),
    ];
    assert!(morte(&args).status.success());
    write_file(Path::new(base.as_str()), "foo/file1", b"changed output");

    // When
    let mut json_args = args.to_vec();
    json_args.push("--json");
    let output = morte(&json_args);

    // Then
    assert_eq!(output.status.code(), Some(2));
    let diff: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(diff["entries"].as_array().unwrap().len(), 1);
    assert_eq!(diff["entries"][0]["path"], "foo/file1");
    assert_eq!(diff["entries"][0]["reasons"][0]["reason"], "digest_mismatch");
}

#[test]
fn test_update_accepts_named_file() {
    // Given: both outputs changed after the baseline was recorded
    let dir = TempDir::new().unwrap();
    let (base, reference) = test_model_run(&dir);
    let check = [
        "check", "--model", "test", "--output", base.as_str(), "--reference", reference.as_str(),
    ];
    assert!(morte(&check).status.success());
    write_file(Path::new(base.as_str()), "foo/file1", b"new 1");
    write_file(Path::new(base.as_str()), "bar/file2", b"new 2");

    // When: only foo/file1 is accepted
    let output = morte(&[
        "update", "--model", "test", "--output", base.as_str(), "--reference", reference.as_str(), "--file",
        "foo/file1",
    ]);

    // Then: bar/file2 still differs
    assert!(output.status.success());
    assert!(stdout(&output).contains("Updated reference for 1 file(s)"));
    let after = morte(&check);
    assert_eq!(after.status.code(), Some(2));
    let text = stdout(&after);
    assert!(text.contains("bar/file2"));
    assert!(!text.contains("foo/file1"));
}

#[test]
fn test_update_without_files_accepts_everything() {
    let dir = TempDir::new().unwrap();
    let (base, reference) = test_model_run(&dir);
    let check = [
        "check", "--model", "test", "--output", base.as_str(), "--reference", reference.as_str(),
    ];
    assert!(morte(&check).status.success());
    write_file(Path::new(base.as_str()), "foo/file1", b"new 1");
    write_file(Path::new(base.as_str()), "bar/file2", b"new 2");

    let output = morte(&[
        "update", "--model", "test", "--output", base.as_str(), "--reference", reference.as_str(),
    ]);

    assert!(output.status.success());
    assert!(morte(&check).status.success());
}

#[test]
fn test_unknown_model_exits_1() {
    let dir = TempDir::new().unwrap();
    let (base, reference) = test_model_run(&dir);

    let output = morte(&[
        "check", "--model", "cm9", "--output", base.as_str(), "--reference", reference.as_str(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_UNKNOWN_MODEL"));
}

#[test]
fn test_corrupt_manifest_exits_1() {
    let dir = TempDir::new().unwrap();
    let (base, reference) = test_model_run(&dir);
    write_file(Path::new(reference.as_str()), "manifest.yaml", b"[unclosed\n");

    let output = morte(&[
        "check", "--model", "test", "--output", base.as_str(), "--reference", reference.as_str(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_MANIFEST_CORRUPT"));
}

#[test]
fn test_models_lists_builtin_and_configured() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("models.toml");
    fs::write(
        &config,
        "[[model]]\nname = \"cm2\"\noutput_files = [\"ocean/ocean.nc\"]\nhash_kinds = [\"blake3\"]\n",
    )
    .unwrap();

    let output = morte(&["models", "--config", config.to_str().unwrap()]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("test: 2 output file(s) [sha256]"));
    assert!(text.contains("cm2: 1 output file(s) [blake3]"));
    assert!(text.contains("  ocean/ocean.nc"));
}

#[test]
fn test_perf_bootstraps_then_flags_slow_run() {
    // Given: a run with a scheduler log
    let dir = TempDir::new().unwrap();
    let (base, _) = test_model_run(&dir);
    write_file(Path::new(base.as_str()), "test.o1234", PBS_LOG.as_bytes());
    let reference_file = dir.path().join("perf.yaml");
    let args = [
        "perf",
        "--model",
        "test",
        "--output",
        base.as_str(),
        "--reference-file",
        reference_file.to_str().unwrap(),
    ];

    // When: the first run creates the reference
    let first = morte(&args);

    // Then
    assert!(first.status.success());
    assert!(reference_file.is_file());
    assert!(stdout(&first).contains("within tolerance"));

    // When: a later run takes twice the walltime
    let slow = PBS_LOG.replace("Walltime Used: 00:30:36", "Walltime Used: 01:01:12");
    write_file(Path::new(base.as_str()), "test.o1234", slow.as_bytes());
    let second = morte(&args);

    // Then
    assert_eq!(second.status.code(), Some(2));
    assert!(stdout(&second).contains("Walltime Used"));
}
