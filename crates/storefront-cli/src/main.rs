//! # Storefront CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - context wiring + dispatch (commands.rs)                  │
//! │  - terminal rendering (print.rs)                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  storefront::api::StorefrontApi                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything user-facing happens here: argument parsing, tracing setup,
//! rendering, and turning errors into exit codes.

mod cli;

use colored::Colorize;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}
