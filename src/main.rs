//! ocd entry point
//!
//! Parses arguments and dispatches through `cli::run`. Any error is logged
//! at FATAL and the process exits non-zero. All logic lives in the CLI
//! module.

use ocd::cli;
use ocd::observability::Logger;

fn main() {
    if let Err(e) = cli::run() {
        Logger::fatal("BOOT_FAILED", &[("code", e.code_str()), ("error", e.message())]);
        std::process::exit(1);
    }
}
