#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` compiles the name masks callers attach to directory queries. A
//! mask is matched against a single entry name (never a path), ignoring case,
//! with two wildcards: `*` matches any run of characters (including none) and
//! `?` matches exactly one character. Every other character is literal,
//! including `[`, `]`, `{`, `}` and `\`, so a mask such as `report[1].txt`
//! selects exactly that file.
//!
//! # Design
//!
//! - [`NameMask`] owns the caller's original pattern text together with the
//!   compiled matcher. Masks are immutable and cheap to clone, so the scan
//!   engine can keep one per open handle without recompiling.
//! - Each mask is translated into an anchored [`regex`] with every character
//!   other than `*` and `?` escaped. Matching runs in Unicode mode with simple
//!   case folding, so `?` always consumes one character and `ÉTÉ.txt` selects
//!   `été.TXT`.
//!
//! # Invariants
//!
//! - The empty pattern is the degenerate "match everything" mask;
//!   [`NameMask::matches_everything`] reports it and it is equivalent to
//!   querying without a mask.
//! - A whitespace-only pattern is an ordinary literal: `" "` matches only an
//!   entry literally named `" "`.
//!
//! # Errors
//!
//! [`NameMask::new`] reports [`FilterError`] if the translated pattern cannot
//! be compiled, which only happens when it exceeds the regex size limit. The
//! error keeps the original pattern and the underlying [`regex::Error`].
//!
//! # Examples
//!
//! ```
//! use filters::NameMask;
//!
//! let headers = NameMask::new("*.H").expect("mask compiles");
//! assert!(headers.is_match("a-file.h"));
//! assert!(headers.is_match("ANOTHER-FILE.h"));
//! assert!(!headers.is_match("a-file.hpp"));
//!
//! let everything = NameMask::new("").expect("empty mask compiles");
//! assert!(everything.matches_everything());
//! assert!(everything.is_match("anything at all"));
//! ```

mod error;
mod mask;

pub use error::FilterError;
pub use mask::NameMask;
