// Integration tests for PBS resource-usage parsing

mod common;

use common::{write_file, PBS_EXAMPLE};
use morte_core::errors::ExErrorKind;
use morte_core::parse::parse_pbs_summary;
use morte_core::{DiagnosticLevel, MemorySink, MetricValue, SummaryParser};
use regex::Regex;
use tempfile::TempDir;

#[test]
fn test_example_summary_parses_every_label() {
    // Given: a scheduler log with a full resource-usage footer
    let sink = MemorySink::new();

    // When
    let metrics = parse_pbs_summary(PBS_EXAMPLE, &sink).unwrap();

    // Then: each label is converted to its unit
    assert_eq!(metrics.len(), 10);
    assert_eq!(metrics.get("Service Units"), Some(MetricValue::Float(123.45)));
    assert_eq!(metrics.get("NCPUs Requested"), Some(MetricValue::Int(234)));
    assert_eq!(metrics.get("NCPUs Used"), Some(MetricValue::Int(123)));
    assert_eq!(metrics.get("CPU Time Used"), Some(MetricValue::Float(20.5)));
    assert_eq!(
        metrics.get("Memory Requested"),
        Some(MetricValue::Int(1_649_267_441_664))
    );
    assert_eq!(metrics.get("Memory Used"), Some(MetricValue::Int(214_748_364_800)));
    assert_eq!(metrics.get("Walltime requested"), Some(MetricValue::Float(1.0)));
    let walltime = metrics.get("Walltime Used").unwrap().as_f64();
    assert!((walltime - 0.51).abs() < 1e-9);
    assert_eq!(metrics.get("JobFS requested"), Some(MetricValue::Int(1024)));
    assert_eq!(metrics.get("JobFS used"), Some(MetricValue::Int(0)));
    assert!(sink.records().is_empty());
}

#[test]
fn test_missing_label_is_warned_and_omitted() {
    // Given: a footer without the Service Units line
    let text: String = PBS_EXAMPLE
        .lines()
        .filter(|l| !l.contains("Service Units"))
        .map(|l| format!("{}\n", l))
        .collect();
    let sink = MemorySink::new();

    // When
    let metrics = parse_pbs_summary(&text, &sink).unwrap();

    // Then
    assert_eq!(metrics.get("Service Units"), None);
    assert_eq!(metrics.len(), 9);
    assert!(sink.contains(
        DiagnosticLevel::Warn,
        "'Service Units' not found in PBS output"
    ));
}

#[test]
fn test_repeated_label_is_ambiguous() {
    let text = format!("{}{}", PBS_EXAMPLE, "   Service Units:      99.0\n");
    let sink = MemorySink::new();

    let err = parse_pbs_summary(&text, &sink).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MetricAmbiguous);
    assert!(sink.contains(DiagnosticLevel::Error, "Service Units"));
}

#[test]
fn test_unparseable_value_is_invalid_metric() {
    let text = PBS_EXAMPLE.replace("1.5TB", "lots");
    let sink = MemorySink::new();

    let err = parse_pbs_summary(&text, &sink).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidMetric);
    assert!(err.message().contains("Memory Requested"));
}

#[test]
fn test_summary_parser_locates_log_and_searches() {
    // Given: a run directory with one scheduler log
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "test.o63911854", PBS_EXAMPLE.as_bytes());

    // When
    let parser = SummaryParser::locate(dir.path(), "test.o*").unwrap();
    let groups = parser
        .search(&Regex::new(r"Exit Status:\s*(\d+)").unwrap())
        .unwrap();
    let metrics = parser.parse_pbs_summary(&MemorySink::new()).unwrap();

    // Then
    assert_eq!(groups, vec![vec!["0".to_string()]]);
    assert_eq!(metrics.get("NCPUs Used"), Some(MetricValue::Int(123)));
}

#[test]
fn test_summary_parser_missing_file_is_unavailable() {
    let dir = TempDir::new().unwrap();

    let err = SummaryParser::new(dir.path().join("absent"))
        .read_lines()
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::FileUnavailable);
}
