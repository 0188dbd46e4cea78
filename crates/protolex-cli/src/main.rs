use clap::Parser;
use protolex_cli::{CliArgs, ProtolexCli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let result = ProtolexCli::from_args("protolex", &args).and_then(|cli| cli.run(args));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
