//! commflag-wrapper CLI entry point

use std::process::ExitCode;

use clap::Parser;

use commflag_wrapper::cli::{run_flag, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    run_flag(Cli::parse()).await
}
