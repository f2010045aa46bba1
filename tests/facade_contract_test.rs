//! Integration tests for the logging facade contract.

use chrono::{TimeZone, Utc};
use privlog::{
    private, public, redact, sensitive, ConsoleDestination, Destination, DestinationConfig,
    FixedClock, LogEntry, LogLevel, Logger, LoggerConfig, MemoryDestination, Metadata,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;

/// A destination that records every call it receives.
#[derive(Default)]
struct RecordingDestination {
    min_level: LogLevel,
    calls: Mutex<Vec<(LogEntry, bool)>>,
}

impl RecordingDestination {
    fn with_level(min_level: LogLevel) -> Self {
        Self {
            min_level,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(LogEntry, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Destination for RecordingDestination {
    fn write(&self, entry: &LogEntry, is_production: bool) {
        if !self.should_log(entry.level()) {
            return;
        }

        self.calls
            .lock()
            .unwrap()
            .push((entry.clone(), is_production));
    }

    fn minimum_level(&self) -> LogLevel {
        self.min_level
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Exploding;

impl Destination for Exploding {
    fn write(&self, _entry: &LogEntry, _is_production: bool) {
        panic!("boom");
    }
}

#[test]
fn test_warning_threshold_scenario() {
    let mock = Arc::new(MemoryDestination::new(LogLevel::Warning));
    let logger = Logger::new(vec![mock.clone()], false, "Default", "tests");

    logger.debug("debug", Metadata::new());
    logger.info("info", Metadata::new());
    logger.warning("warning", Metadata::new());
    logger.error("error", Metadata::new());

    assert_eq!(mock.count(), 2);
    assert_eq!(mock.levels(), vec![LogLevel::Warning, LogLevel::Error]);
}

#[test]
fn test_redaction_scenario_through_console() {
    let buf = SharedBuf::default();
    let console = ConsoleDestination::builder()
        .use_timestamp(false)
        .use_glyph(false)
        .writer(buf.clone())
        .build();
    let logger = Logger::new(vec![Arc::new(console)], true, "Auth", "tests");

    logger.info(
        "User authenticated",
        [
            ("userId", public("U1")),
            ("email", private("a@b.com")),
            ("token", sensitive("T1")),
        ],
    );

    assert_eq!(
        buf.lines(),
        vec!["[INFO] User authenticated {userId=U1, email=<private>, token=<sensitive>}"]
    );
}

#[test]
fn test_development_shows_private_values() {
    let mock = Arc::new(MemoryDestination::default());
    let logger = Logger::new(vec![mock.clone()], false, "Auth", "tests");

    logger.info("signup", [("email", private("a@b.com")), ("pw", sensitive("x"))]);

    assert_eq!(mock.lines(), vec!["[INFO] signup {email=a@b.com, pw=<sensitive>}"]);
}

#[test]
fn test_fan_out_delivers_one_identical_entry_to_each() {
    let destinations: Vec<Arc<RecordingDestination>> = (0..3)
        .map(|_| Arc::new(RecordingDestination::default()))
        .collect();
    let logger = Logger::builder()
        .shared_destination(destinations[0].clone())
        .shared_destination(destinations[1].clone())
        .shared_destination(destinations[2].clone())
        .production(true)
        .clock(FixedClock(Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap()))
        .build();

    logger.log(
        LogLevel::Error,
        "replica lagging",
        Metadata::from([("replica", public("db-2"))]),
        privlog::location!(),
    );

    let first = destinations[0].calls();
    assert_eq!(first.len(), 1);
    assert!(first[0].1);
    for destination in &destinations[1..] {
        assert_eq!(destination.calls(), first);
    }
}

#[test]
fn test_destination_filters_itself() {
    let recording = Arc::new(RecordingDestination::with_level(LogLevel::Error));
    assert!(!recording.should_log(LogLevel::Warning));
    assert!(recording.should_log(LogLevel::Error));
    assert!(recording.should_log(LogLevel::Critical));

    let logger = Logger::builder().shared_destination(recording.clone()).build();
    logger.warning("ignored", Metadata::new());
    logger.critical("kept", Metadata::new());

    let calls = recording.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.level(), LogLevel::Critical);
}

#[test]
fn test_empty_destination_list() {
    let logger = Logger::new(Vec::new(), false, "Default", "tests");
    logger.debug("", Metadata::new());
    logger.critical("nothing happens", Metadata::new());
}

#[test]
fn test_failing_destinations_do_not_reach_caller() {
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let closed = Arc::new(ConsoleDestination::builder().writer(Closed).build());
    let mock = Arc::new(MemoryDestination::default());
    let logger = Logger::builder()
        .shared_destination(closed.clone())
        .destination(Exploding)
        .shared_destination(mock.clone())
        .build();

    logger.error("disk full", Metadata::new());

    assert_eq!(closed.failed_writes(), 1);
    assert_eq!(mock.count(), 1);
}

#[test]
fn test_concurrent_callers() {
    let mock = Arc::new(MemoryDestination::default());
    let logger = Logger::builder().shared_destination(mock.clone()).build();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    logger.info(
                        format!("worker {} message {}", worker, i),
                        [("worker", public(worker.to_string()))],
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(mock.count(), 400);
    assert_eq!(mock.write_calls(), 400);
}

#[test]
fn test_logger_from_config() {
    let config = LoggerConfig::from_toml_str(
        r#"
        production = true
        subsystem = "com.example.app"
        category = "Network"

        [[destinations]]
        type = "console"
        level = "error"
        stream = "stderr"

        [[destinations]]
        type = "platform"
        "#,
    )
    .unwrap();

    let logger = Logger::from_config(&config).unwrap();

    assert!(logger.is_production());
    assert_eq!(logger.category(), "Network");
    assert_eq!(logger.subsystem(), "com.example.app");

    let names: Vec<&str> = logger.destinations().iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["console:stderr", "platform"]);
    assert_eq!(logger.destinations()[0].minimum_level(), LogLevel::Error);
    assert_eq!(logger.destinations()[1].minimum_level(), LogLevel::Info);
}

#[test]
fn test_logger_from_config_logs_through_platform() {
    let config = LoggerConfig::from_toml_str(
        r#"
        production = true
        subsystem = "com.example.billing"
        category = "Payments"

        [[destinations]]
        type = "platform"
        level = "warning"
        "#,
    )
    .unwrap();
    let logger = Logger::from_config(&config).unwrap();

    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        logger.info("below threshold", Metadata::new());
        logger.error(
            "charge declined",
            [("orderId", public("O-9")), ("email", private("a@b.com"))],
        );
    });

    let lines = buf.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("ERROR"));
    assert!(lines[0].contains("charge declined"));
    assert!(lines[0].contains("subsystem=\"com.example.billing\""));
    assert!(lines[0].contains("category=\"Payments\""));
    assert!(lines[0].contains("orderId=O-9, email=<private>"));
    assert!(!lines[0].contains("a@b.com"));
}

#[test]
fn test_logger_from_invalid_config() {
    let config = LoggerConfig::new()
        .with_subsystem("")
        .with_destination(DestinationConfig::platform());
    assert!(Logger::from_config(&config).is_err());
}

#[test]
fn test_redact_free_function() {
    assert_eq!(redact(&public("U1"), true), "U1");
    assert_eq!(redact(&private("a@b.com"), false), "a@b.com");
    assert_eq!(redact(&private("a@b.com"), true), "<private>");
    assert_eq!(redact(&sensitive("T1"), false), "<sensitive>");
}
