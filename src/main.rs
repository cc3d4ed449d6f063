//! Isosprite - command-line tool for generating isometric sprite sheets

use std::process::ExitCode;

use isosprite::cli;

fn main() -> ExitCode {
    cli::run()
}
