//! crates/logging/src/macros.rs
//! Level-gated logging macros backed by the thread-local event buffer.

/// Records a debug diagnostic when the flag's configured level is high enough.
///
/// The message is only formatted when the event will actually be recorded.
///
/// ```
/// use logging::{debug_log, drain_events, init, VerbosityConfig};
///
/// let mut config = VerbosityConfig::default();
/// config.debug.paging = 1;
/// init(config);
///
/// debug_log!(Paging, 1, "packed {} bytes", 96);
/// debug_log!(Paging, 2, "suppressed");
/// assert_eq!(drain_events().len(), 1);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {{
        let level: u8 = $level;
        if $crate::debug_gte($crate::DebugFlag::$flag, level) {
            $crate::emit_debug($crate::DebugFlag::$flag, level, ::std::format!($($arg)+));
        }
    }};
}

/// Records an info diagnostic when the flag's configured level is high enough.
#[macro_export]
macro_rules! info_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {{
        let level: u8 = $level;
        if $crate::info_gte($crate::InfoFlag::$flag, level) {
            $crate::emit_info($crate::InfoFlag::$flag, level, ::std::format!($($arg)+));
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::{DiagnosticEvent, InfoFlag, VerbosityConfig, drain_events, init};

    #[test]
    fn info_log_records_at_configured_level() {
        let mut config = VerbosityConfig::default();
        config.info.handle = 1;
        init(config);
        drain_events();

        info_log!(Handle, 1, "opened {}", "/tmp/x");
        info_log!(Handle, 2, "not recorded");

        assert_eq!(
            drain_events(),
            vec![DiagnosticEvent::Info {
                flag: InfoFlag::Handle,
                level: 1,
                message: "opened /tmp/x".to_string(),
            }]
        );
    }

    #[test]
    fn debug_log_does_not_evaluate_format_when_disabled() {
        init(VerbosityConfig::default());
        drain_events();

        let mut evaluated = false;
        debug_log!(Scan, 1, "{}", {
            evaluated = true;
            "value"
        });

        assert!(!evaluated);
        assert!(drain_events().is_empty());
    }
}
