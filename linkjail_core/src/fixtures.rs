//! # Reference Escape Table
//!
//! A fixed boundary layout with nested mounts, plus the expected decision for 35
//! `(from, to)` pairs over it. The table is written anchor-free; [`Anchor`] renders it
//! in `./` or `/` form so callers can confirm the two spellings behave identically.
//!
//! The `escape-suite` benchmark workload replays the whole table each iteration and
//! fails on the first decision that disagrees with it.

use crate::error::{JailError, Result};
use crate::escape::EscapeChecker;
use crate::path::JailPath;

/// Boundary layout the table is written against.
pub const BOUNDARIES: [&str; 4] = ["a/b", "a/b/g/1", "a/b/g/a/2", "a/b/g/a/3"];

/// One expected decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeCase {
    pub from: &'static str,
    pub to: &'static str,
    pub escape: bool,
}

const fn case(from: &'static str, to: &'static str, escape: bool) -> EscapeCase {
    EscapeCase { from, to, escape }
}

pub const ESCAPE_CASES: &[EscapeCase] = &[
    case("a/b/l", "a/c/boop", true),
    case("a/b", "a/c/boop", true),
    case("a/b", "a", true),
    case("a/c", "a/c/boop", false),
    case("a/b/l", "a/b/f", false),
    // Everything is outside `some/path`.
    case("a/b/g/1", "some/path", true),
    case("a/b/g/1/foo", "some/path", true),
    case("a/b/g/h", "some/path", true),
    case("a/b/g/h/i", "some/path", true),
    case("a/b/g/a/2", "some/path", true),
    case("a/b/g/a/2/foo", "some/path", true),
    case("a/b/g/a/3", "some/path", true),
    case("a/b/g/a/3/foo", "some/path", true),
    case("a/b/g/a/h", "some/path", true),
    case("a/b/g/a/h/i", "some/path", true),
    // Back up to the outer mount.
    case("a/b/g/1", "a/b", true),
    case("a/b/g/1/foo", "a/b", true),
    case("a/b/g/h", "a/b", false),
    case("a/b/g/h/i", "a/b", false),
    case("a/b/g/a/2", "a/b", true),
    case("a/b/g/a/2/foo", "a/b", true),
    case("a/b/g/a/3", "a/b", true),
    case("a/b/g/a/3/foo", "a/b", true),
    case("a/b/g/a/h", "a/b", false),
    case("a/b/g/a/h/i", "a/b", false),
    // Sideways within the outer mount.
    case("a/b/g/1", "a/b/c", true),
    case("a/b/g/1/foo", "a/b/c", true),
    case("a/b/g/h", "a/b/c", false),
    case("a/b/g/h/i", "a/b/c", false),
    case("a/b/g/a/2", "a/b/c", true),
    case("a/b/g/a/2/foo", "a/b/c", true),
    case("a/b/g/a/3", "a/b/c", true),
    case("a/b/g/a/3/foo", "a/b/c", true),
    case("a/b/g/a/h", "a/b/c", false),
    case("a/b/g/a/h/i", "a/b/c", false),
];

/// Textual anchor used when rendering table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `./a/b`
    Relative,
    /// `/a/b`
    Absolute,
}

impl Anchor {
    pub const ALL: [Anchor; 2] = [Anchor::Relative, Anchor::Absolute];

    pub fn apply(self, path: &str) -> String {
        match self {
            Anchor::Relative => format!("./{path}"),
            Anchor::Absolute => format!("/{path}"),
        }
    }
}

/// [`BOUNDARIES`] rendered with `anchor`.
pub fn anchored_boundaries(anchor: Anchor) -> Vec<String> {
    BOUNDARIES.iter().map(|b| anchor.apply(b)).collect()
}

/// Checker over the reference layout.
pub fn reference_checker(anchor: Anchor) -> Result<EscapeChecker> {
    EscapeChecker::from_strs(anchored_boundaries(anchor))
}

/// Replay every case in both anchor forms against `checker`.
///
/// Returns the number of decisions made.
pub fn replay(checker: &EscapeChecker) -> Result<usize> {
    let mut decisions = 0;
    for anchor in Anchor::ALL {
        for case in ESCAPE_CASES {
            let from = JailPath::parse(&anchor.apply(case.from))?;
            let to = JailPath::parse(&anchor.apply(case.to))?;
            let actual = checker.is_escape(&from, &to);
            if actual != case.escape {
                return Err(JailError::UnexpectedDecision {
                    from: from.to_string(),
                    to: to.to_string(),
                    expected: case.escape,
                });
            }
            decisions += 1;
        }
    }
    Ok(decisions)
}
