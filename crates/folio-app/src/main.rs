#![forbid(unsafe_code)]

//! Folio desktop entry point.

use folio_app::cli::{self, CliAction, Opts};
use folio_app::{PortfolioApp, PortfolioContent};
use folio_core::logging::{self, LogConfig};
use folio_layout::DisplayMetrics;
use folio_runtime::{Program, ProgramConfig, SystemUriOpener};
use std::sync::Arc;
use std::time::Duration;

fn main() {
    let opts = match Opts::parse() {
        Ok(CliAction::Run(opts)) => opts,
        Ok(CliAction::Help) => {
            println!("{}", cli::HELP_TEXT);
            return;
        }
        Ok(CliAction::Version) => {
            println!("folio {}", cli::VERSION);
            return;
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    };

    if let Some(path) = &opts.log_file
        && let Err(e) = logging::init(&LogConfig::new(path).json(opts.log_json))
    {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }
    tracing::info!(version = cli::VERSION, title = %opts.title, "folio starting");

    let content = Arc::new(PortfolioContent::builtin());
    let app = PortfolioApp::new(content, DisplayMetrics::new(opts.cell_width_dp));
    let config = ProgramConfig::default()
        .title(opts.title.as_str())
        .mouse(opts.mouse)
        .exit_after((opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms)));

    match Program::new(app, config, Box::new(SystemUriOpener::new())) {
        Ok(mut program) => {
            if let Err(e) = program.run() {
                drop(program);
                eprintln!("Runtime error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    }
}
