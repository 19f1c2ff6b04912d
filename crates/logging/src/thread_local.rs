//! crates/logging/src/thread_local.rs
//! Thread-local storage for verbosity configuration and event collection.

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use std::cell::RefCell;

thread_local! {
    static VERBOSITY: RefCell<VerbosityConfig> = RefCell::new(VerbosityConfig::default());
    #[allow(clippy::missing_const_for_thread_local)]
    static EVENTS: RefCell<Vec<DiagnosticEvent>> = RefCell::new(Vec::new());
}

/// Diagnostic event collected during execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// Info-level diagnostic event.
    Info {
        /// The info flag category.
        flag: InfoFlag,
        /// The verbosity level.
        level: u8,
        /// The diagnostic message.
        message: String,
    },
    /// Debug-level diagnostic event.
    Debug {
        /// The debug flag category.
        flag: DebugFlag,
        /// The verbosity level.
        level: u8,
        /// The diagnostic message.
        message: String,
    },
}

impl DiagnosticEvent {
    /// Returns the rendered message carried by the event.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Info { message, .. } | Self::Debug { message, .. } => message,
        }
    }

    /// Returns the `NAME` part of the flag that produced the event.
    #[must_use]
    pub const fn flag_name(&self) -> &'static str {
        match self {
            Self::Info { flag, .. } => flag.name(),
            Self::Debug { flag, .. } => flag.name(),
        }
    }
}

/// Initialize verbosity configuration for the current thread.
pub fn init(config: VerbosityConfig) {
    VERBOSITY.with(|v| {
        *v.borrow_mut() = config;
    });
}

/// Check if the info flag is at or above the specified level.
pub fn info_gte(flag: InfoFlag, level: u8) -> bool {
    VERBOSITY.with(|v| v.borrow().info.get(flag) >= level)
}

/// Check if the debug flag is at or above the specified level.
pub fn debug_gte(flag: DebugFlag, level: u8) -> bool {
    VERBOSITY.with(|v| v.borrow().debug.get(flag) >= level)
}

/// Emit an info diagnostic event.
pub fn emit_info(flag: InfoFlag, level: u8, message: String) {
    EVENTS.with(|e| {
        e.borrow_mut().push(DiagnosticEvent::Info {
            flag,
            level,
            message,
        });
    });
}

/// Emit a debug diagnostic event.
pub fn emit_debug(flag: DebugFlag, level: u8, message: String) {
    EVENTS.with(|e| {
        e.borrow_mut().push(DiagnosticEvent::Debug {
            flag,
            level,
            message,
        });
    });
}

/// Drain all collected events, clearing the internal buffer.
pub fn drain_events() -> Vec<DiagnosticEvent> {
    EVENTS.with(|e| e.borrow_mut().drain(..).collect())
}

/// Apply an info flag token to the current configuration.
pub fn apply_info_flag(token: &str) -> Result<(), String> {
    VERBOSITY.with(|v| v.borrow_mut().apply_info_flag(token))
}

/// Apply a debug flag token to the current configuration.
pub fn apply_debug_flag(token: &str) -> Result<(), String> {
    VERBOSITY.with(|v| v.borrow_mut().apply_debug_flag(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_and_check() {
        let mut config = VerbosityConfig::default();
        config.info.query = 2;
        config.debug.scan = 3;

        init(config);

        assert!(info_gte(InfoFlag::Query, 1));
        assert!(info_gte(InfoFlag::Query, 2));
        assert!(!info_gte(InfoFlag::Query, 3));
        assert!(!info_gte(InfoFlag::Handle, 1));

        assert!(debug_gte(DebugFlag::Scan, 3));
        assert!(!debug_gte(DebugFlag::Scan, 4));
        assert!(!debug_gte(DebugFlag::Source, 1));
    }

    #[test]
    fn emit_and_drain_preserves_order() {
        init(VerbosityConfig::default());
        drain_events();

        emit_info(InfoFlag::Handle, 1, "opened".to_string());
        emit_debug(DebugFlag::Paging, 2, "buffer full".to_string());

        let events = drain_events();
        assert_eq!(
            events,
            vec![
                DiagnosticEvent::Info {
                    flag: InfoFlag::Handle,
                    level: 1,
                    message: "opened".to_string(),
                },
                DiagnosticEvent::Debug {
                    flag: DebugFlag::Paging,
                    level: 2,
                    message: "buffer full".to_string(),
                },
            ]
        );
        assert!(drain_events().is_empty());
    }

    #[test]
    fn event_accessors_expose_message_and_flag() {
        let event = DiagnosticEvent::Debug {
            flag: DebugFlag::Filter,
            level: 1,
            message: "compiled".to_string(),
        };
        assert_eq!(event.message(), "compiled");
        assert_eq!(event.flag_name(), "filter");
    }

    #[test]
    fn apply_flag_tokens_update_thread_config() {
        init(VerbosityConfig::default());
        apply_debug_flag("source2").unwrap();
        apply_info_flag("handle").unwrap();

        assert!(debug_gte(DebugFlag::Source, 2));
        assert!(info_gte(InfoFlag::Handle, 1));
        assert!(apply_debug_flag("bogus").is_err());
    }
}
