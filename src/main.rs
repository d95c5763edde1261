//! # sigmatch CLI
//!
//! Command-line interface for signature comparison.
//!
//! ## Usage
//! ```bash
//! sigmatch compare reference.png candidate.jpg
//! sigmatch compare reference.png candidate.jpg --threshold 90 --output json
//! sigmatch devices
//! ```
//!
//! Exits 0 on a match, 1 when the signatures do not match and 2 on errors.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
