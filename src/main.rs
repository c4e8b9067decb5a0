use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use deskcalc::cli::Args;
use deskcalc::config::Config;
use deskcalc::console::{Console, eval_once};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    init_tracing();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    if let Some(expression) = args.eval {
        return match eval_once(&expression, &config.evaluator) {
            Ok(text) => {
                println!("{text}");
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{err:#}");
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let mut console = Console::new(&config);
    console.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DESKCALC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
