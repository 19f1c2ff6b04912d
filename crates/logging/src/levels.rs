//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for user-facing diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Directory handles being opened and closed.
    Handle,
    /// One summary line per query.
    Query,
}

impl InfoFlag {
    /// Every info flag, in declaration order.
    pub const ALL: [Self; 2] = [Self::Handle, Self::Query];

    /// Returns the token used on the command line for this flag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Handle => "handle",
            Self::Query => "query",
        }
    }
}

/// Debug flags for engine-internal diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Scan state transitions (restart, filter replacement, exhaustion).
    Scan,
    /// Mask compilation and per-entry match decisions.
    Filter,
    /// Entry source I/O.
    Source,
    /// Buffer accounting and page limits.
    Paging,
}

impl DebugFlag {
    /// Every debug flag, in declaration order.
    pub const ALL: [Self; 4] = [Self::Scan, Self::Filter, Self::Source, Self::Paging];

    /// Returns the token used on the command line for this flag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Filter => "filter",
            Self::Source => "source",
            Self::Paging => "paging",
        }
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Handle lifetime level.
    pub handle: u8,
    /// Query summary level.
    pub query: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Handle => self.handle,
            InfoFlag::Query => self.query,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Handle => self.handle = level,
            InfoFlag::Query => self.query = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.handle = level;
        self.query = level;
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Scan state transition level.
    pub scan: u8,
    /// Mask handling level.
    pub filter: u8,
    /// Entry source I/O level.
    pub source: u8,
    /// Buffer accounting level.
    pub paging: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Scan => self.scan,
            DebugFlag::Filter => self.filter,
            DebugFlag::Source => self.source,
            DebugFlag::Paging => self.paging,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Scan => self.scan = level,
            DebugFlag::Filter => self.filter = level,
            DebugFlag::Source => self.source = level,
            DebugFlag::Paging => self.paging = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.scan = level;
        self.filter = level;
        self.source = level;
        self.paging = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_levels_round_trip_every_flag() {
        let mut levels = InfoLevels::default();
        for (index, flag) in InfoFlag::ALL.into_iter().enumerate() {
            levels.set(flag, index as u8 + 1);
        }
        assert_eq!(levels.get(InfoFlag::Handle), 1);
        assert_eq!(levels.get(InfoFlag::Query), 2);
    }

    #[test]
    fn debug_levels_set_all_touches_every_flag() {
        let mut levels = DebugLevels::default();
        levels.set_all(3);
        for flag in DebugFlag::ALL {
            assert_eq!(levels.get(flag), 3, "{flag:?}");
        }
    }

    #[test]
    fn debug_levels_are_independent() {
        let mut levels = DebugLevels::default();
        levels.set(DebugFlag::Paging, 2);
        assert_eq!(levels.get(DebugFlag::Paging), 2);
        assert_eq!(levels.get(DebugFlag::Scan), 0);
        assert_eq!(levels.get(DebugFlag::Filter), 0);
        assert_eq!(levels.get(DebugFlag::Source), 0);
    }

    #[test]
    fn flag_names_are_unique() {
        let mut names: Vec<_> = DebugFlag::ALL.iter().map(|flag| flag.name()).collect();
        names.extend(InfoFlag::ALL.iter().map(|flag| flag.name()));
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
