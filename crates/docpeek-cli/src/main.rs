//! CLI application that prints the start of a DOCX document's text.

mod peek;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use docpeek_core::render_error;

/// Print the first 6000 characters of a Word document's text
#[derive(Parser)]
#[command(name = "docpeek")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document to read (overrides the config file)
    document: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {}", e);
    }

    match peek::run(cli.config.as_deref(), cli.document) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut stdout = std::io::stdout().lock();
            let _ = stdout.write_all(render_error(&e).as_bytes());
            let _ = stdout.flush();
            ExitCode::from(1)
        }
    }
}
