//! crates/scan/src/state.rs
//! Per-handle enumeration state.

use filters::NameMask;

use crate::SourcePosition;

/// Cursor, filter and pass bookkeeping owned by one open handle.
///
/// Only [`ScanEngine::query`](crate::ScanEngine::query) mutates a handle's
/// state. Snapshots returned by
/// [`ScanEngine::snapshot`](crate::ScanEngine::snapshot) are copies.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanState {
    pub(crate) cursor: SourcePosition,
    pub(crate) active_filter: Option<NameMask>,
    pub(crate) exhausted: bool,
    pub(crate) fresh_pass: bool,
}

impl ScanState {
    pub(crate) fn new() -> Self {
        Self {
            fresh_pass: true,
            ..Self::default()
        }
    }

    /// Position of the next entry to examine.
    #[must_use]
    pub const fn cursor(&self) -> SourcePosition {
        self.cursor
    }

    /// Filter applied to the current pass, if one was ever supplied.
    #[must_use]
    pub const fn active_filter(&self) -> Option<&NameMask> {
        self.active_filter.as_ref()
    }

    /// `true` once the source has been confirmed exhausted for this pass.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// `true` until the first fetch of the pass completes.
    #[must_use]
    pub const fn is_fresh_pass(&self) -> bool {
        self.fresh_pass
    }

    /// A filter counts as active unless it is absent or the empty mask.
    #[must_use]
    pub fn filter_is_active(&self) -> bool {
        self.active_filter
            .as_ref()
            .is_some_and(|mask| !mask.matches_everything())
    }

    pub(crate) fn restart(&mut self) {
        self.cursor = SourcePosition::START;
        self.exhausted = false;
        self.fresh_pass = true;
    }

    pub(crate) fn admits(&self, name: &str) -> bool {
        self.active_filter
            .as_ref()
            .is_none_or(|mask| mask.is_match(name))
    }
}
