//! `forager` command line.
//!
//! ```text
//! forager <config.ron|config.toml>
//! forager <blueprint-file> [version] [horizon] [target]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::Path;
use std::process::ExitCode;

use forager_batch::config::{BatchConfig, is_config_path, load_config};
use forager_batch::{BatchError, run_all, run_one};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), BatchError> {
    let config = match args {
        [path] if is_config_path(path) => load_config(Path::new(path))?,
        _ => BatchConfig::from_args(args)?,
    };

    let report = run_all(&config)?;
    print!("{report}");
    if let Some(path) = &config.output {
        println!("Report written to {}", path.display());
    }

    if let Some(id) = config.trace_blueprint {
        let traced = run_one(&config, id)?;
        println!();
        println!("Winning path for blueprint {} ({} {}):", traced.id, traced.target_stock, config.target);
        println!();
        print!("{}", traced.narration);
    }
    Ok(())
}
