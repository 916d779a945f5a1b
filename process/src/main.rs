use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Catalog data directory holding films.json, festivals/, streaming.json
    #[arg(default_value = "data")]
    data_dir: PathBuf,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    match process::generate(&args.data_dir) {
        Ok(count) => {
            println!("Generated cache for {count} films");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Cache generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
