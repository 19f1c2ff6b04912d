//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the verbosity flag system.
//!
//! [`ScanLayer`] is a `tracing-subscriber` layer that maps events whose target
//! lives under `dirquery::` onto [`InfoFlag`]/[`DebugFlag`] categories and
//! records them in the thread-local event buffer when the configured level
//! allows it. Events with foreign targets are ignored.
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, diagnostics_subscriber};
//!
//! let subscriber = diagnostics_subscriber(VerbosityConfig::from_verbose_level(2));
//! tracing::subscriber::with_default(subscriber, || {
//!     tracing::debug!(target: "dirquery::scan", "restarting pass");
//! });
//! ```

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{debug_gte, emit_debug, emit_info, info_gte};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

const TARGET_PREFIX: &str = "dirquery::";

/// A tracing layer that records `dirquery::*` events as diagnostic events.
#[derive(Debug)]
pub struct ScanLayer {
    _config: VerbosityConfig,
}

/// Category resolved from a tracing target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TargetFlag {
    Info(InfoFlag),
    Debug(DebugFlag),
}

impl ScanLayer {
    /// Create a new layer for the given verbosity configuration.
    #[must_use]
    pub const fn new(config: VerbosityConfig) -> Self {
        Self { _config: config }
    }

    /// Map a tracing target such as `dirquery::scan::engine` to a flag.
    fn target_flag(target: &str) -> Option<TargetFlag> {
        let rest = target.strip_prefix(TARGET_PREFIX)?;
        let category = rest.split("::").next().unwrap_or(rest);

        if let Some(flag) = DebugFlag::ALL.into_iter().find(|f| f.name() == category) {
            return Some(TargetFlag::Debug(flag));
        }
        InfoFlag::ALL
            .into_iter()
            .find(|f| f.name() == category)
            .map(TargetFlag::Info)
    }

    /// Map a tracing level to a verbosity level.
    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::TRACE => 2,
            _ => 1,
        }
    }
}

impl<S> Layer<S> for ScanLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let Some(flag) = Self::target_flag(metadata.target()) else {
            return;
        };
        let level = Self::level_to_verbosity_level(metadata.level());

        let enabled = match flag {
            TargetFlag::Info(flag) => info_gte(flag, level),
            TargetFlag::Debug(flag) => debug_gte(flag, level),
        };
        if !enabled {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let Some(message) = visitor.finish() else {
            return;
        };

        match flag {
            TargetFlag::Info(flag) => emit_info(flag, level, message),
            TargetFlag::Debug(flag) => emit_debug(flag, level, message),
        }
    }
}

/// Visitor that renders the `message` field followed by any extra fields.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> Option<String> {
        let mut message = self.message?;
        for field in self.fields {
            message.push(' ');
            message.push_str(&field);
        }
        Some(message)
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }
}

/// Builds a subscriber that routes `dirquery::*` events into the event
/// buffer.
///
/// Also installs `config` as the current thread's verbosity so the
/// level-gated macros and the layer agree. The subscriber is meant to be
/// scoped with [`tracing::subscriber::with_default`] rather than installed
/// globally, so repeated runs in one process each get their own settings.
pub fn diagnostics_subscriber(config: VerbosityConfig) -> impl Subscriber + Send + Sync {
    use tracing_subscriber::layer::SubscriberExt;

    super::thread_local::init(config.clone());

    tracing_subscriber::registry().with(ScanLayer::new(config))
}
