use clap::Parser;
use tick::cli::commands::Cli;
use tick::cli::handlers;
use tick::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(cli.config.as_deref())?;
    let data_file = config_io::resolve_data_file(&config, cli.data_file.as_deref());

    match cli.command {
        None => {
            // No subcommand → launch TUI; the terminal is ours, so log to a file
            let log_file = config_io::resolve_log_file(&config);
            logging::init_file_logging(&log_file, &config.log.level)?;
            tick::tui::run(&config, &data_file)
        }
        Some(command) => {
            logging::init_stderr_logging("warn");
            handlers::dispatch(command, &data_file, config.max_length)
        }
    }
}
