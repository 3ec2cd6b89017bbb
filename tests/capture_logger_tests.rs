use std::sync::Arc;

use chrono::{TimeZone, Utc};
use thiserror::Error;

use test_log_capture::clock::FixedClock;
use test_log_capture::formatter::{FormatterOptions, SimpleFormatter};
use test_log_capture::logger::{CaptureLogger, LogError};
use test_log_capture::memory_sink::MemorySink;
use test_log_capture::provider::CaptureLoggerProvider;
use test_log_capture::record::Level;

#[derive(Debug, Error)]
#[error("bang")]
struct Bang;

#[derive(Debug, Error)]
#[error("query failed")]
struct QueryError {
    #[source]
    source: std::io::Error,
}

fn provider_with(options: FormatterOptions) -> (CaptureLoggerProvider, MemorySink) {
    let sink = MemorySink::new();
    let provider = CaptureLoggerProvider::with_options(Arc::new(sink.clone()), options);
    (provider, sink)
}

fn logger_with(options: FormatterOptions) -> (CaptureLogger, MemorySink) {
    let (provider, sink) = provider_with(options);
    (provider.create_logger("X"), sink)
}

#[test]
fn default_options_pad_the_message_under_the_header() {
    let (logger, sink) = logger_with(FormatterOptions::default());
    logger.log(Level::Information, 0, &"Hello World!", None).expect("log failed");
    assert_eq!(sink.entries(), vec!["info: X[0]\n      Hello World!\n"]);
}

#[test]
fn default_options_ignore_active_scopes() {
    let (logger, sink) = logger_with(FormatterOptions::default());
    let _scope = logger.begin_scope("[scope is enabled]");
    logger.log(Level::Information, 0, &"Hello World!", None).expect("log failed");
    assert_eq!(sink.entries(), vec!["info: X[0]\n      Hello World!\n"]);
}

#[test]
fn single_line_appends_message_and_exception_on_one_line() {
    let (logger, sink) = logger_with(FormatterOptions {
        single_line: true,
        ..FormatterOptions::default()
    });
    logger
        .log(Level::Information, 0, &"Hello World!", Some(&Bang))
        .expect("log failed");
    assert_eq!(sink.entries(), vec!["info: X[0] Hello World! bang\n"]);
}

#[test]
fn multi_line_renders_nested_scopes_then_releases_innermost() {
    let (logger, sink) = logger_with(FormatterOptions {
        include_scopes: true,
        ..FormatterOptions::default()
    });

    let _scope1 = logger.begin_scope("scope1");
    {
        let _scope2 = logger.begin_scope("scope2");
        logger.log(Level::Information, 0, &"line1", None).expect("log failed");
    }
    logger.log(Level::Information, 0, &"line2", None).expect("log failed");

    assert_eq!(
        sink.entries(),
        vec![
            "info: X[0]\n      => scope1 => scope2\n      line1\n",
            "info: X[0]\n      => scope1\n      line2\n",
        ]
    );
}

#[test]
fn single_line_renders_nested_scopes_then_releases_innermost() {
    let (logger, sink) = logger_with(FormatterOptions {
        include_scopes: true,
        single_line: true,
        ..FormatterOptions::default()
    });

    let _scope1 = logger.begin_scope("scope1");
    {
        let _scope2 = logger.begin_scope("scope2");
        logger.log(Level::Information, 0, &"line1", None).expect("log failed");
    }
    logger.log(Level::Information, 0, &"line2", None).expect("log failed");

    assert_eq!(
        sink.entries(),
        vec![
            "info: X[0] => scope1 => scope2 line1\n",
            "info: X[0] => scope1 line2\n",
        ]
    );
}

#[test]
fn exception_with_empty_message_still_renders_at_the_padded_position() {
    let (logger, sink) = logger_with(FormatterOptions::default());
    logger.log(Level::Information, 0, &"", Some(&Bang)).expect("log failed");
    // No blank message line before the exception block.
    assert_eq!(sink.entries(), vec!["info: X[0]\n      bang\n"]);
}

#[test]
fn exception_source_chain_becomes_padded_cause_lines() {
    let (logger, sink) = logger_with(FormatterOptions::default());
    let error = QueryError {
        source: std::io::Error::new(std::io::ErrorKind::Other, "disk offline"),
    };
    logger
        .log(Level::Error, 7, &"request aborted", Some(&error))
        .expect("log failed");
    assert_eq!(
        sink.entries(),
        vec!["fail: X[7]\n      request aborted\n      query failed\n      Caused by: disk offline\n"]
    );
}

#[test]
fn single_line_flattens_exception_cause_chain() {
    let (logger, sink) = logger_with(FormatterOptions {
        single_line: true,
        ..FormatterOptions::default()
    });
    let error = QueryError {
        source: std::io::Error::new(std::io::ErrorKind::Other, "disk offline"),
    };
    logger
        .log(Level::Error, 7, &"request aborted", Some(&error))
        .expect("log failed");
    assert_eq!(
        sink.entries(),
        vec!["fail: X[7] request aborted query failed Caused by: disk offline\n"]
    );
}

#[test]
fn disabled_scopes_leave_output_independent_of_chain_depth() {
    let (without_scopes, baseline_sink) = logger_with(FormatterOptions::default());
    without_scopes.log(Level::Information, 0, &"steady", None).expect("log failed");

    let (with_stack, stacked_sink) = logger_with(FormatterOptions::default());
    let _a = with_stack.begin_scope("a");
    let _b = with_stack.begin_scope("b");
    let _c = with_stack.begin_scope("c");
    with_stack.log(Level::Information, 0, &"steady", None).expect("log failed");

    assert_eq!(baseline_sink.entries(), stacked_sink.entries());
}

#[test]
fn embedded_line_breaks_produce_padded_continuation_lines() {
    let (logger, sink) = logger_with(FormatterOptions::default());
    logger
        .log(Level::Information, 0, &"first\nsecond\nthird", None)
        .expect("log failed");

    let entries = sink.entries();
    let entry = &entries[0];
    // Header line plus one content line per message line.
    let lines: Vec<&str> = entry.trim_end_matches('\n').split('\n').collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "info: X[0]");
    for line in &lines[1..] {
        assert!(line.starts_with("      "), "continuation line not padded: {:?}", line);
    }
}

#[test]
fn utc_timestamp_prefixes_the_header() {
    let instant = Utc.with_ymd_and_hms(2024, 5, 17, 12, 34, 56).unwrap();
    let formatter = SimpleFormatter::new(FormatterOptions {
        timestamp_format: Some("%H:%M:%S ".to_string()),
        use_utc_timestamp: true,
        ..FormatterOptions::default()
    })
    .with_clock(Arc::new(FixedClock(instant)));

    let sink = MemorySink::new();
    let provider = CaptureLoggerProvider::with_formatter(Arc::new(sink.clone()), Arc::new(formatter));
    let logger = provider.create_logger("X");

    logger.log(Level::Information, 0, &"Hello World!", None).expect("log failed");
    assert_eq!(sink.entries(), vec!["12:34:56 info: X[0]\n      Hello World!\n"]);
}

#[test]
fn local_timestamp_keeps_the_layout_intact() {
    let formatter = SimpleFormatter::new(FormatterOptions {
        timestamp_format: Some("%H:%M:%S ".to_string()),
        ..FormatterOptions::default()
    });

    let sink = MemorySink::new();
    let provider = CaptureLoggerProvider::with_formatter(Arc::new(sink.clone()), Arc::new(formatter));
    let logger = provider.create_logger("X");

    logger.log(Level::Information, 0, &"Hello World!", None).expect("log failed");

    let entries = sink.entries();
    // The local wall-clock value is machine-dependent; the shape is not.
    assert!(entries[0].ends_with("info: X[0]\n      Hello World!\n"));
    assert_eq!(entries[0].len(), "HH:MM:SS ".len() + "info: X[0]\n      Hello World!\n".len());
}

#[test]
fn malformed_timestamp_format_surfaces_as_a_format_error() {
    let (logger, sink) = logger_with(FormatterOptions {
        timestamp_format: Some("%!".to_string()),
        ..FormatterOptions::default()
    });
    let result = logger.log(Level::Information, 0, &"Hello World!", None);
    assert!(matches!(result, Err(LogError::Format(_))));
    assert!(sink.entries().is_empty());
}

#[test]
fn all_level_tags_appear_in_the_header() {
    let cases = [
        (Level::Trace, "trce"),
        (Level::Debug, "dbug"),
        (Level::Information, "info"),
        (Level::Warning, "warn"),
        (Level::Error, "fail"),
        (Level::Critical, "crit"),
    ];
    for (level, tag) in cases {
        let (logger, sink) = logger_with(FormatterOptions::default());
        logger.log(level, 0, &"m", None).expect("log failed");
        assert_eq!(sink.entries(), vec![format!("{}: X[0]\n      m\n", tag)]);
    }
}

#[test]
fn negative_event_id_renders_with_its_sign() {
    let (logger, sink) = logger_with(FormatterOptions {
        single_line: true,
        ..FormatterOptions::default()
    });
    logger.log(Level::Debug, -3, &"m", None).expect("log failed");
    assert_eq!(sink.entries(), vec!["dbug: X[-3] m\n"]);
}

#[test]
fn options_deserialize_with_defaults_for_missing_fields() {
    let options: FormatterOptions =
        serde_json::from_str(r#"{"single_line": true}"#).expect("deserialize failed");
    assert!(options.single_line);
    assert!(!options.include_scopes);
    assert!(!options.use_utc_timestamp);
    assert!(options.timestamp_format.is_none());
}
