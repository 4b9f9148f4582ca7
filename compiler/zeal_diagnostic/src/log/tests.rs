use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn error(message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001).with_message(message)
}

#[test]
fn test_log_preserves_insertion_order() {
    let mut log = DiagnosticLog::new();
    log.push(error("first"));
    log.push(Diagnostic::warning(ErrorCode::E3004).with_message("second"));
    log.push(Diagnostic::info(ErrorCode::E3001).with_message("third"));

    let messages: Vec<&str> = log.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
}

#[test]
fn test_log_counts_errors_only() {
    let mut log = DiagnosticLog::new();
    assert!(!log.has_errors());

    log.push(Diagnostic::warning(ErrorCode::E3004).with_message("warn"));
    assert!(!log.has_errors());

    let _ = log.emit_error(error("boom"));
    assert!(log.has_errors());
    assert_eq!(log.error_count(), 1);
    assert_eq!(log.warnings().count(), 1);
    assert_eq!(log.errors().count(), 1);
}

#[test]
fn test_error_limit_drops_but_counts() {
    let mut log = DiagnosticLog::with_config(DiagnosticConfig::with_error_limit(2));
    for i in 0..5 {
        log.push(error(&format!("error {i}")));
    }
    log.push(Diagnostic::warning(ErrorCode::E3004).with_message("kept"));

    assert_eq!(log.error_count(), 5);
    assert_eq!(log.suppressed_count(), 3);
    assert_eq!(log.len(), 3);
}

#[test]
fn test_take_empties_log() {
    let mut log = DiagnosticLog::new();
    log.push(error("gone"));
    let taken = log.take();

    assert_eq!(taken.len(), 1);
    assert!(log.is_empty());
    assert!(!log.has_errors());
}
