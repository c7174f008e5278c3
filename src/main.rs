#![forbid(unsafe_code)]

//! edx52d: EDx52 display CLI entry point.

use clap::Parser;

mod cli_app;

fn main() {
    let args = cli_app::Cli::parse();
    if let Err(e) = cli_app::run(&args) {
        eprintln!("edx52d: {e}");
        std::process::exit(1);
    }
}
