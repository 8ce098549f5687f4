//! # Utility Modules
//!
//! - **`logging`**: one-time initialization of the `tracing` subscriber used by the
//!   `linkjail` binary and the test suites.

pub mod logging;
