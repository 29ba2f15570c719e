use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use build_table::{ConsoleLogger, Level, Logger, CLI};

fn main() -> ExitCode {
    let args = match CLI::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            eprintln!("\n{}", CLI::command().render_help());
            return ExitCode::FAILURE;
        }
    };

    let level = if args.verbose { Level::Debug } else { Level::Info };
    let logger = ConsoleLogger::new(level, !args.no_color);

    match build_table::run(&args, &logger) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            logger.error(&err.chain().join(": "));
            ExitCode::FAILURE
        }
    }
}
