//! Integration tests for name-mask syntax.
//!
//! Masks match a single directory-entry name, ignore case, and treat only `*`
//! and `?` as wildcards.

use filters::NameMask;
use proptest::prelude::*;

fn mask(pattern: &str) -> NameMask {
    NameMask::new(pattern).expect("mask compiles")
}

// ============================================================================
// Star Wildcard (*)
// ============================================================================

/// Verifies `*` matches any run of characters, including none.
#[test]
fn star_matches_any_run() {
    let headers = mask("*.h");

    assert!(headers.is_match("a-file.h"));
    assert!(headers.is_match("another-file.h"));
    assert!(headers.is_match(".h"));
    assert!(!headers.is_match("a-file.hpp"));
    assert!(!headers.is_match("a-file.c"));
}

/// Verifies multiple stars in one mask.
#[test]
fn multiple_stars() {
    let m = mask("a*-*.h");

    assert!(m.is_match("a-file.h"));
    assert!(m.is_match("another-file.h"));
    assert!(!m.is_match("afile.h"));
}

/// Verifies `*` matches the `.` and `..` pseudo-entries.
#[test]
fn star_matches_dot_entries() {
    let all = mask("*");

    assert!(all.is_match("."));
    assert!(all.is_match(".."));
    assert!(all.is_match(".hidden"));
}

// ============================================================================
// Question Mark Wildcard (?)
// ============================================================================

/// Verifies `?` matches exactly one character.
#[test]
fn question_mark_matches_one_character() {
    let m = mask("?-file.h");

    assert!(m.is_match("a-file.h"));
    assert!(m.is_match("b-file.h"));
    assert!(!m.is_match("-file.h"));
    assert!(!m.is_match("ab-file.h"));
}

/// Verifies `?` consumes one character even when it is encoded as several
/// bytes or has a multi-character lowercase form.
#[test]
fn question_mark_matches_one_non_ascii_character() {
    let m = mask("?.h");

    assert!(m.is_match("é.h"));
    assert!(m.is_match("İ.h"));
    assert!(m.is_match("日.h"));
    assert!(!m.is_match("日本.h"));
}

// ============================================================================
// Case Insensitivity
// ============================================================================

/// Verifies masks ignore ASCII case in both directions.
#[test]
fn ascii_case_is_ignored() {
    assert!(mask("*.H").is_match("a-file.h"));
    assert!(mask("A-FILE.h").is_match("a-file.H"));
}

/// Verifies masks ignore case beyond ASCII.
#[test]
fn unicode_case_is_ignored() {
    assert!(mask("ÉTÉ.txt").is_match("été.TXT"));
    assert!(mask("İ.h").is_match("İ.h"));
}

// ============================================================================
// Literal Characters
// ============================================================================

/// Verifies bracket and brace characters are literal.
#[test]
fn brackets_and_braces_are_literal() {
    let bracketed = mask("report[1].txt");
    assert!(bracketed.is_match("report[1].txt"));
    assert!(!bracketed.is_match("report1.txt"));

    let braced = mask("{a,b}.h");
    assert!(braced.is_match("{a,b}.h"));
    assert!(!braced.is_match("a.h"));
}

/// Verifies a lone closing bracket compiles and matches literally.
#[test]
fn unbalanced_brackets_compile() {
    assert!(mask("]").is_match("]"));
    assert!(mask("[").is_match("["));
    assert!(mask("a[b").is_match("A[B"));
}

/// Verifies a mask that matches nothing in a typical directory.
#[test]
fn non_matching_literal() {
    let m = mask("not-a-file.h");

    for name in [".", "..", "a-file.h", "another-file.h"] {
        assert!(!m.is_match(name), "{name}");
    }
}

proptest! {
    /// Any name made of ordinary characters matches itself as a mask, in any case.
    #[test]
    fn literal_names_match_themselves(name in "[a-zA-Z0-9 ._\\-\\[\\]{}]{1,40}") {
        let m = mask(&name);
        prop_assert!(m.is_match(&name));
        prop_assert!(m.is_match(&name.to_uppercase()));
        prop_assert!(m.is_match(&name.to_lowercase()));
    }

    /// One `?` per character matches a name; one fewer does not.
    #[test]
    fn question_marks_count_characters(name in "\\PC{2,12}") {
        let count = name.chars().count();
        prop_assert!(mask(&"?".repeat(count)).is_match(&name));
        prop_assert!(!mask(&"?".repeat(count - 1)).is_match(&name));
    }

    /// A trailing star accepts any suffix.
    #[test]
    fn prefix_star_accepts_any_suffix(prefix in "[a-z]{1,10}", suffix in "[a-z.]{0,10}") {
        let m = mask(&format!("{prefix}*"));
        let candidate = format!("{prefix}{suffix}");
        prop_assert!(m.is_match(&candidate));
    }
}
