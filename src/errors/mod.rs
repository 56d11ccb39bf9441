//! Diagnostics produced while scanning and parsing.
//!
//! This module defines:
//!
//! - The `Error` structure pairing a diagnostic with its source position
//! - `ErrorImpl`, one variant per diagnostic class
//! - Error names and tips used when rendering diagnostics

pub mod errors;
