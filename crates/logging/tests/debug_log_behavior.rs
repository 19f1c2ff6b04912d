//! Integration tests for the level-gated logging macros.
//!
//! These tests verify that `debug_log!` and `info_log!` emit or suppress
//! diagnostics according to the configured verbosity, mirroring the
//! `--debug=FLAG[N]` handling of the command-line front end.

use logging::{
    DebugFlag, DiagnosticEvent, InfoFlag, VerbosityConfig, apply_debug_flag, debug_log,
    drain_events, info_log, init,
};

fn reset(config: VerbosityConfig) {
    init(config);
    drain_events();
}

// ============================================================================
// Emission Thresholds
// ============================================================================

/// Verifies debug_log emits when the flag level is sufficient.
#[test]
fn debug_log_emits_when_level_sufficient() {
    let mut config = VerbosityConfig::default();
    config.debug.scan = 2;
    reset(config);

    debug_log!(Scan, 1, "cursor reset");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        DiagnosticEvent::Debug {
            flag,
            level,
            message,
        } => {
            assert_eq!(*flag, DebugFlag::Scan);
            assert_eq!(*level, 1);
            assert_eq!(message, "cursor reset");
        }
        DiagnosticEvent::Info { .. } => panic!("expected debug event"),
    }
}

/// Verifies debug_log suppresses messages above the configured level.
#[test]
fn debug_log_suppresses_when_level_insufficient() {
    let mut config = VerbosityConfig::default();
    config.debug.source = 1;
    reset(config);

    debug_log!(Source, 2, "should not appear");

    assert!(drain_events().is_empty());
}

/// Verifies each debug flag is gated independently.
#[test]
fn debug_log_flags_are_independent() {
    let mut config = VerbosityConfig::default();
    config.debug.filter = 2;
    reset(config);

    debug_log!(Filter, 1, "filter on");
    debug_log!(Paging, 1, "paging off");
    debug_log!(Scan, 1, "scan off");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message(), "filter on");
    assert_eq!(events[0].flag_name(), "filter");
}

/// Verifies info and debug events interleave in emission order.
#[test]
fn info_and_debug_events_keep_emission_order() {
    reset(VerbosityConfig::from_verbose_level(3));

    info_log!(Handle, 1, "open");
    debug_log!(Paging, 2, "page");
    info_log!(Query, 2, "summary");

    let names: Vec<_> = drain_events()
        .iter()
        .map(|event| event.message().to_owned())
        .collect();
    assert_eq!(names, ["open", "page", "summary"]);
}

// ============================================================================
// Runtime Flag Tokens
// ============================================================================

/// Verifies tokens applied at runtime take effect immediately.
#[test]
fn runtime_debug_token_enables_category() {
    reset(VerbosityConfig::default());

    debug_log!(Paging, 1, "before");
    apply_debug_flag("paging").expect("known flag");
    debug_log!(Paging, 1, "after");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message(), "after");
}

/// Verifies info flags are untouched by debug tokens.
#[test]
fn debug_tokens_do_not_enable_info_flags() {
    reset(VerbosityConfig::default());
    apply_debug_flag("all2").expect("all is accepted");

    info_log!(Handle, 1, "hidden");

    assert!(drain_events().is_empty());
    assert!(logging::debug_gte(DebugFlag::Source, 2));
    assert!(!logging::info_gte(InfoFlag::Handle, 1));
}
