//! CLI entry point for wave function collapse map generation

use clap::Parser;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use wavetile::io::cli::{Cli, FileProcessor};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    // A logger can only fail to install if one is already set
    let _ = TermLogger::init(
        cli.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
