//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a `-v` count.
    ///
    /// Level 0 is silent, level 1 reports handle lifetime and one line per
    /// query, level 2 adds scan state transitions and mask handling, level 3
    /// and above turn every debug category up, including per-entry source
    /// and paging traces.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.info.set_all(1);
            }
            2 => {
                config.info.set_all(1);
                config.info.query = 2;
                config.debug.scan = 1;
                config.debug.filter = 1;
            }
            _ => {
                config.info.set_all(2);
                config.debug.scan = 2;
                config.debug.filter = 2;
                config.debug.source = 2;
                config.debug.paging = 2;
            }
        }

        config
    }

    /// Apply a single info flag token (e.g., "query2", "handle").
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        let flag = InfoFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown info flag: {name}"))?;

        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a single debug flag token (e.g., "scan2", "source").
    ///
    /// The token `all` sets every debug flag at once.
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name == "all" {
            self.debug.set_all(level);
            return Ok(());
        }

        let flag = DebugFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown debug flag: {name}"))?;

        self.debug.set(flag, level);
        Ok(())
    }
}

/// Parse a flag token like "scan2" into ("scan", 2) or "filter" into ("filter", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let name = &token[..pos];
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((name, level))
        }
        None => Ok((token, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_level_zero_is_silent() {
        assert_eq!(VerbosityConfig::from_verbose_level(0), VerbosityConfig::default());
    }

    #[test]
    fn verbose_level_one_enables_info_only() {
        let config = VerbosityConfig::from_verbose_level(1);
        assert_eq!(config.info.handle, 1);
        assert_eq!(config.info.query, 1);
        assert_eq!(config.debug, DebugLevels::default());
    }

    #[test]
    fn verbose_level_two_adds_scan_and_filter_debug() {
        let config = VerbosityConfig::from_verbose_level(2);
        assert_eq!(config.info.query, 2);
        assert_eq!(config.debug.scan, 1);
        assert_eq!(config.debug.filter, 1);
        assert_eq!(config.debug.source, 0);
        assert_eq!(config.debug.paging, 0);
    }

    #[test]
    fn verbose_levels_above_three_saturate() {
        assert_eq!(
            VerbosityConfig::from_verbose_level(3),
            VerbosityConfig::from_verbose_level(9)
        );
    }

    #[test]
    fn parse_flag_token_defaults_to_level_one() {
        assert_eq!(parse_flag_token("scan").unwrap(), ("scan", 1));
        assert_eq!(parse_flag_token("scan3").unwrap(), ("scan", 3));
        assert!(parse_flag_token("").is_err());
        assert!(parse_flag_token("2").is_err());
        assert!(parse_flag_token("scan999").is_err());
    }

    #[test]
    fn apply_debug_flag_sets_single_category() {
        let mut config = VerbosityConfig::default();
        config.apply_debug_flag("paging2").unwrap();
        assert_eq!(config.debug.paging, 2);
        assert_eq!(config.debug.scan, 0);
    }

    #[test]
    fn apply_debug_flag_all_sets_every_category() {
        let mut config = VerbosityConfig::default();
        config.apply_debug_flag("all3").unwrap();
        for flag in DebugFlag::ALL {
            assert_eq!(config.debug.get(flag), 3);
        }
    }

    #[test]
    fn apply_unknown_flags_fails() {
        let mut config = VerbosityConfig::default();
        assert_eq!(
            config.apply_info_flag("copy").unwrap_err(),
            "unknown info flag: copy"
        );
        assert!(config.apply_debug_flag("recv2").is_err());
        assert_eq!(config, VerbosityConfig::default());
    }
}
