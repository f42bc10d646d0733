use clap::Parser;
use stratgen::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
