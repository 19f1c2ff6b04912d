use std::fmt;

use logging::debug_log;
use regex::{Regex, RegexBuilder};

use crate::FilterError;

/// Compiled, case-insensitive mask over directory-entry names.
///
/// See the [crate documentation](crate) for the accepted syntax.
#[derive(Clone, Debug)]
pub struct NameMask {
    pattern: String,
    matcher: Matcher,
}

#[derive(Clone, Debug)]
enum Matcher {
    Everything,
    Wildcard(Regex),
}

impl NameMask {
    /// Compiles `pattern` into a mask.
    ///
    /// The empty pattern yields a mask that matches every name.
    pub fn new(pattern: impl Into<String>) -> Result<Self, FilterError> {
        let pattern = pattern.into();

        if pattern.is_empty() {
            debug_log!(Filter, 1, "empty mask matches every entry");
            return Ok(Self {
                pattern,
                matcher: Matcher::Everything,
            });
        }

        let regex = RegexBuilder::new(&wildcard_regex(&pattern))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|error| FilterError::new(pattern.clone(), error))?;

        debug_log!(Filter, 1, "compiled mask {:?}", pattern);
        Ok(Self {
            pattern,
            matcher: Matcher::Wildcard(regex),
        })
    }

    /// Returns the pattern text exactly as the caller supplied it.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns `true` for the degenerate empty mask, which is equivalent to
    /// supplying no mask at all.
    #[must_use]
    pub const fn matches_everything(&self) -> bool {
        matches!(self.matcher, Matcher::Everything)
    }

    /// Returns `true` when the pattern contains `*` or `?`.
    #[must_use]
    pub fn has_wildcards(&self) -> bool {
        self.pattern.contains(['*', '?'])
    }

    /// Tests a single entry name against the mask.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        let matched = match &self.matcher {
            Matcher::Everything => true,
            Matcher::Wildcard(regex) => regex.is_match(name),
        };
        debug_log!(Filter, 2, "mask {:?} vs {:?}: {}", self.pattern, name, matched);
        matched
    }
}

impl PartialEq for NameMask {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for NameMask {}

impl fmt::Display for NameMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Translates a mask into an anchored regular expression.
///
/// `*` becomes `.*` and `?` becomes `.`, both over Unicode scalar values so
/// `?` consumes exactly one character. Every other character is escaped.
/// Runs of `*` collapse to one.
fn wildcard_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 4);
    out.push_str(r"\A");
    let mut previous_star = false;
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' if previous_star => {}
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
        previous_star = c == '*';
    }
    out.push_str(r"\z");
    out
}
