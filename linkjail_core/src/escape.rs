//! # Escape Checking
//!
//! [`EscapeChecker`] is the gate a filesystem-interception layer consults before it
//! hands a resolved link target back to its caller. Resolving `from` to `to` is an
//! *escape* when `to` is not equal to, or below, the boundary governing `from`:
//!
//! ```text
//! is_escape(from, to) = !to.is_descendant_or_equal(boundaries.boundary_of(from))
//! ```
//!
//! Paths outside every registered boundary govern themselves, so for them only the
//! path itself and its descendants count as contained.
//!
//! ## Example
//!
//! ```rust
//! use linkjail_core::escape::EscapeChecker;
//!
//! let checker = EscapeChecker::from_strs(["./a/b", "./a/b/g/1"]).unwrap();
//! assert!(checker.is_escape_str("./a/b/l", "./a/c/boop").unwrap());
//! assert!(!checker.is_escape_str("/a/b/g/h", "/a/b").unwrap());
//! ```

use crate::boundary::BoundarySet;
use crate::error::{JailError, Result};
use crate::path::JailPath;
use std::sync::Arc;
use tracing::{trace, warn};

/// Containment predicate over a shared, immutable [`BoundarySet`].
#[derive(Debug, Clone)]
pub struct EscapeChecker {
    boundaries: Arc<BoundarySet>,
}

impl EscapeChecker {
    pub fn new(boundaries: BoundarySet) -> Self {
        Self::from_shared(Arc::new(boundaries))
    }

    /// Wrap a set that is already shared with other components.
    pub fn from_shared(boundaries: Arc<BoundarySet>) -> Self {
        EscapeChecker { boundaries }
    }

    /// Parse boundary text and build a checker in one step.
    pub fn from_strs<I, S>(boundaries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        BoundarySet::from_strs(boundaries).map(Self::new)
    }

    pub fn boundaries(&self) -> &Arc<BoundarySet> {
        &self.boundaries
    }

    /// True when resolving `from` to `to` leaves the boundary governing `from`.
    pub fn is_escape(&self, from: &JailPath, to: &JailPath) -> bool {
        let boundary = self.boundaries.boundary_of(from);
        let escape = !to.is_descendant_or_equal(boundary);
        trace!(%from, %to, %boundary, escape, "Escape decision");
        escape
    }

    /// Typed variant of [`is_escape`](Self::is_escape) for callers that want to refuse
    /// with an error.
    pub fn check(&self, from: &JailPath, to: &JailPath) -> Result<()> {
        let boundary = self.boundaries.boundary_of(from);
        if to.is_descendant_or_equal(boundary) {
            Ok(())
        } else {
            Err(JailError::PathEscapesBoundary {
                from: from.to_string(),
                to: to.to_string(),
                boundary: boundary.to_string(),
            })
        }
    }

    /// Normalize both paths with [`JailPath::parse`] and decide.
    ///
    /// Unparsable input is an error, never a "contained" answer.
    pub fn is_escape_str(&self, from: &str, to: &str) -> Result<bool> {
        let from = JailPath::parse(from)?;
        let to = JailPath::parse(to)?;
        Ok(self.is_escape(&from, &to))
    }
}

/// Build a plain `Fn(from, to) -> bool` predicate from boundary text.
///
/// Hosts that only deal in strings can keep this closure around for the whole session.
/// Any `from` or `to` that fails to parse is reported as an escape, so a malformed
/// path is refused rather than exposed.
pub fn escape_function<I, S>(boundaries: I) -> Result<impl Fn(&str, &str) -> bool + Send + Sync>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let checker = EscapeChecker::from_strs(boundaries)?;
    Ok(move |from: &str, to: &str| match checker.is_escape_str(from, to) {
        Ok(escape) => escape,
        Err(e) => {
            warn!("Treating unparsable path as escape: {}", e);
            true
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> JailPath {
        JailPath::parse(text).unwrap()
    }

    fn checker() -> EscapeChecker {
        EscapeChecker::from_strs(["./a/b", "./a/b/g/1", "./a/b/g/a/2", "./a/b/g/a/3"]).unwrap()
    }

    #[test]
    fn test_concrete_scenarios() {
        let c = checker();
        assert!(c.is_escape(&p("a/b/l"), &p("a/c/boop")));
        assert!(!c.is_escape(&p("a/c"), &p("a/c/boop")));
        assert!(c.is_escape(&p("a/b/g/a/2"), &p("a/b")));
        assert!(!c.is_escape(&p("a/b/g/h"), &p("a/b")));
        assert!(!c.is_escape(&p("a/b/g/a/h"), &p("a/b/c")));
    }

    #[test]
    fn test_check_reports_governing_boundary() {
        let c = checker();
        assert!(c.check(&p("a/b/l"), &p("a/b/f")).is_ok());
        match c.check(&p("a/b/g/1/foo"), &p("a/b")) {
            Err(JailError::PathEscapesBoundary { from, to, boundary }) => {
                assert_eq!(from, "a/b/g/1/foo");
                assert_eq!(to, "a/b");
                assert_eq!(boundary, "a/b/g/1");
            }
            other => panic!("expected escape error, got {other:?}"),
        }
    }

    #[test]
    fn test_is_escape_str_rejects_invalid_text() {
        let c = checker();
        assert!(matches!(
            c.is_escape_str("a/b/../c", "a/b"),
            Err(JailError::InvalidPath { .. })
        ));
        assert!(c.is_escape_str("", "a/b").is_err());
        assert!(c.is_escape_str("a/b", "/").is_err());
    }

    #[test]
    fn test_escape_function_fails_closed() {
        let is_escape = escape_function(["./a/b"]).unwrap();
        assert!(!is_escape("./a/b/l", "./a/b/f"));
        assert!(is_escape("./a/b", "./a"));
        assert!(is_escape("./a/b", "./a/b/.."));
        assert!(is_escape("", "./a/b"));
    }

    #[test]
    fn test_escape_function_propagates_construction_errors() {
        assert!(escape_function(["a", "/a"]).is_err());
    }

    #[test]
    fn test_checker_clones_share_boundaries() {
        let c = checker();
        let clone = c.clone();
        assert!(Arc::ptr_eq(c.boundaries(), clone.boundaries()));
    }
}
