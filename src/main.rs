//! emojirain - command-line front end for the token codec and headless rain

use std::process::ExitCode;

use emojirain::cli;

fn main() -> ExitCode {
    cli::run()
}
