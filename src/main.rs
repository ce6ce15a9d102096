use clap::Parser;
use stockviz::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
