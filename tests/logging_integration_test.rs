// Integration tests for logging functionality
// Note: installing a global subscriber is process-wide, so everything that
// touches it lives in a single test.

mod common;

use common::LogBuffer;
use yani::infrastructure::logging::{debug, info, instrument};
use yani::{Environment, LogFormat, Logger, LoggerError, LoggerProfile};

#[test]
fn test_global_install_happens_once() {
    let buffer = LogBuffer::default();
    let logger = Logger::with_writer(
        LoggerProfile::for_environment(Environment::Dev),
        buffer.clone(),
    );

    logger.init().expect("first install succeeds");
    info!(env = "dev", "starting app");
    assert_eq!(instrumented_add(5, 7), 12);

    let events = buffer.json_lines();
    assert_eq!(events.len(), 2, "installing emits nothing of its own: {events:?}");
    assert_eq!(events[0]["fields"]["message"], "starting app");
    let start = events
        .iter()
        .find(|e| e["fields"]["message"] == "starting app")
        .expect("startup line logged");
    assert_eq!(start["level"], "INFO");
    assert_eq!(start["fields"]["env"], "dev");
    assert!(events
        .iter()
        .any(|e| e["fields"]["message"] == "adding" && e["span"]["name"] == "instrumented_add"));

    let second = Logger::new(Environment::Prod);
    assert!(matches!(
        second.init(),
        Err(LoggerError::AlreadyInitialized)
    ));
}

#[test]
fn test_scoped_loggers_do_not_conflict() {
    for tag in ["local", "dev", "prod", "garbage"] {
        let buffer = LogBuffer::default();
        let logger = Logger::with_writer(LoggerProfile::for_tag(tag), buffer.clone());

        logger.in_scope(|| info!(tag, "hello"));

        let output = buffer.contents();
        assert!(output.contains("hello"), "{tag}: {output}");
        match logger.profile().format {
            LogFormat::Json => assert_eq!(buffer.json_lines().len(), 1),
            LogFormat::Pretty => assert!(!output.trim_start().starts_with('{')),
        }
    }
}

#[instrument]
fn instrumented_add(a: i32, b: i32) -> i32 {
    debug!("adding");
    a + b
}
