//! # Path Segments
//!
//! All containment decisions operate on [`JailPath`], an ordered sequence of
//! [`Segment`]s, never on raw text. Comparing segment slices rules out the classic
//! string-prefix bug where `a/c` would appear to contain `a/cx`.
//!
//! ## Normalization
//!
//! [`JailPath::parse`] turns host-supplied text into a `JailPath`:
//!
//! - One leading anchor is stripped: the root marker `/` or the relative marker `./`.
//!   `/a/b`, `./a/b` and `a/b` are therefore the same path.
//! - The remainder is split on `/`. Empty pieces from repeated or trailing separators
//!   are skipped, so `a//b/` is `a/b`.
//! - `.` and `..` pieces are rejected. Callers must resolve them before asking for a
//!   containment decision; silently dropping them could turn an escape into a match.
//! - A path with no segments left (``, `/`, `.`, `./`) is rejected.

use crate::error::{JailError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

/// Separator between segments in textual paths.
pub const SEPARATOR: char = '/';

/// A single non-empty path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(Box<str>);

impl Segment {
    /// Validate and wrap one component.
    pub fn new(text: &str) -> Result<Self> {
        if let Some(reason) = segment_defect(text) {
            return Err(JailError::invalid_path(text, reason));
        }
        Ok(Segment(text.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn segment_defect(text: &str) -> Option<&'static str> {
    if text.is_empty() {
        Some("segment is empty")
    } else if text == "." || text == ".." {
        Some("'.' and '..' segments must be resolved before containment checks")
    } else if text.contains(SEPARATOR) {
        Some("segment contains a path separator")
    } else if text.contains('\0') {
        Some("segment contains a NUL byte")
    } else {
        None
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A normalized, anchor-free path: one or more [`Segment`]s in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JailPath {
    segments: Vec<Segment>,
}

impl JailPath {
    /// Parse host-supplied text. See the module docs for the accepted forms.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(JailError::invalid_path(text, "path is empty"));
        }
        let body = strip_anchor(text);
        let mut segments = Vec::new();
        for piece in body.split(SEPARATOR).filter(|piece| !piece.is_empty()) {
            if let Some(reason) = segment_defect(piece) {
                return Err(JailError::invalid_path(text, reason));
            }
            segments.push(Segment(piece.into()));
        }
        Self::non_empty(text, segments)
    }

    /// Build from an already-normalized filesystem path.
    ///
    /// Applies exactly the rules of [`parse`](Self::parse) to the path's text.
    /// `Path::components` would silently drop interior `.` pieces, so it is only
    /// consulted to reject Windows prefixes. Non-UTF-8 paths are rejected.
    pub fn from_std_path(path: &Path) -> Result<Self> {
        let display = path.to_string_lossy();
        if path
            .components()
            .any(|component| matches!(component, Component::Prefix(_)))
        {
            return Err(JailError::invalid_path(
                &*display,
                "drive and UNC prefixes are not supported",
            ));
        }
        let text = path
            .to_str()
            .ok_or_else(|| JailError::invalid_path(&*display, "path is not valid UTF-8"))?;
        Self::parse(text)
    }

    /// Build from individual components, each validated as a [`Segment`].
    pub fn from_segments<I, S>(pieces: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = pieces
            .into_iter()
            .map(|piece| Segment::new(piece.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::non_empty("", segments)
    }

    fn non_empty(input: &str, segments: Vec<Segment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(JailError::invalid_path(
                input,
                "path has no segments after stripping its anchor",
            ));
        }
        Ok(JailPath { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments (always at least one).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; provided alongside `len` for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when `self` equals `ancestor` or extends its segments.
    pub fn is_descendant_or_equal(&self, ancestor: &JailPath) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }

    /// Returns a new path with `segment` appended.
    pub fn join(&self, segment: &str) -> Result<Self> {
        let mut segments = self.segments.clone();
        segments.push(Segment::new(segment)?);
        Ok(JailPath { segments })
    }
}

fn strip_anchor(text: &str) -> &str {
    if text == "." {
        ""
    } else if let Some(rest) = text.strip_prefix("./") {
        rest
    } else {
        text.trim_start_matches(SEPARATOR)
    }
}

impl fmt::Display for JailPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for JailPath {
    type Err = JailError;

    fn from_str(s: &str) -> Result<Self> {
        JailPath::parse(s)
    }
}

impl TryFrom<String> for JailPath {
    type Error = JailError;

    fn try_from(value: String) -> Result<Self> {
        JailPath::parse(&value)
    }
}

impl TryFrom<&str> for JailPath {
    type Error = JailError;

    fn try_from(value: &str) -> Result<Self> {
        JailPath::parse(value)
    }
}

impl From<JailPath> for String {
    fn from(path: JailPath) -> Self {
        path.to_string()
    }
}

impl AsRef<[Segment]> for JailPath {
    fn as_ref(&self) -> &[Segment] {
        &self.segments
    }
}
