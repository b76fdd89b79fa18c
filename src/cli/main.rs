//! Command-line interface entry point for `mindmap`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::generate::GenerateOptions;
use logger::{enable_debug, enable_verbose, info, init_file_logging, set_level, Level};
use mindmap_export::config::Config;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = Some(&config.logging.file)
        .filter(|f| !f.is_empty())
        .map(std::path::PathBuf::from);

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Generate {
            input,
            format,
            title,
            theme,
            output,
        } => {
            let options = GenerateOptions {
                format: format.as_deref(),
                title: title.as_deref(),
                theme: theme.as_deref(),
                output: output.as_deref(),
            };
            commands::generate::run(&input, &options, &config);
        }
        Command::Themes => commands::themes::run(),
    }
}
