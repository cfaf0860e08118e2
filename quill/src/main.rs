use clap::Parser;
use console::style;
use quill_parser::parser::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Parses a Quill source file and prints its syntax tree.
#[derive(Debug, Parser)]
#[command(name = "quill", version)]
struct Args {
    /// Path to the Quill source file
    path: PathBuf,

    /// Maximum nesting depth of expressions and blocks
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DEPTH as u64,
        value_parser = clap::value_parser!(u64).range(1..=MAX_DEPTH_LIMIT as u64)
    )]
    max_depth: u64,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version also end up here, on stdout
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    match quill::parse_file(&args.path, args.max_depth as usize) {
        Ok(program) => {
            print!("{}", program);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", style("Error:").red().bold().for_stderr(), err);
            ExitCode::FAILURE
        }
    }
}
