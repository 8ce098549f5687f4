//! # linkjail core
//!
//! A containment predicate for filesystem sandboxes that redirect parts of the tree
//! through symlinks or virtual mount points.
//!
//! An interception layer (the code overriding `lstat`, `readlink`, `realpath` and
//! friends) resolves a link and then needs to know whether the target it is about to
//! expose still lies inside the sandboxed view. This crate answers that question and
//! nothing else: it performs no I/O, resolves no symlinks and expects `.`/`..` to be
//! gone before a path arrives.
//!
//! ## Model
//!
//! - A **boundary** is a registered directory whose subtree is its own containment
//!   domain, typically the target of a redirecting symlink.
//! - The boundary governing a path is the *longest* registered boundary that equals it
//!   or is a segment-wise ancestor of it. A path under no boundary governs itself.
//! - Resolving `from` to `to` **escapes** when `to` is neither the governing boundary of
//!   `from` nor below it.
//!
//! All comparisons are on [`path::Segment`] sequences, so `a/c` never matches `a/cx`,
//! and `/a/b`, `./a/b` and `a/b` are the same path.
//!
//! ## Example
//!
//! ```rust
//! use linkjail_core::{BoundarySet, EscapeChecker, JailPath};
//!
//! let set = BoundarySet::from_strs(["/a/b", "/a/b/g/a/2"])?;
//! let checker = EscapeChecker::new(set);
//!
//! let from = JailPath::parse("/a/b/g/a/2")?;
//! let to = JailPath::parse("/a/b")?;
//! assert!(checker.is_escape(&from, &to));
//! # Ok::<(), linkjail_core::JailError>(())
//! ```
//!
//! ## Modules
//!
//! - **`path`**: `Segment` and `JailPath`, plus normalization of host text.
//! - **`boundary`**: `BoundarySet`, the immutable trie of registered boundaries.
//! - **`escape`**: `EscapeChecker` and the string-level `escape_function`.
//! - **`config`**: TOML/JSON boundary declarations.
//! - **`bench`**: explicit, sequential benchmark runner.
//! - **`fixtures`**: reference boundary layout and expected decisions.
//! - **`utils::logging`**: `tracing` subscriber setup.

pub mod bench;
pub mod boundary;
pub mod config;
pub mod error;
pub mod escape;
pub mod fixtures;
pub mod path;
pub mod utils;

pub use boundary::BoundarySet;
pub use config::JailConfig;
pub use error::{JailError, Result};
pub use escape::{EscapeChecker, escape_function};
pub use path::{JailPath, Segment};
