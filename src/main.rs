use clap::Parser;
use pickwise::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
