use blogview::cli::commands::Cli;
use blogview::cli::{handlers, logging};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // The TUI owns the terminal and sets up file logging itself
    if cli.command.is_some() {
        logging::init_stderr();
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
