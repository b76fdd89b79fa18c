//! Config command handler

use crate::args::ConfigSubcommand;
use mindmap_export::config::{Config, CONFIG_KEYS};
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => show_all(config),
        Some(ConfigSubcommand::Get { key: None }) => show_all(config),
        Some(ConfigSubcommand::Get { key: Some(key) }) => show_key(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => set_key(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset_key(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ===");
    println!("({})\n", Config::get_config_file_path().display());
    print!("{config}");
}

fn show_key(config: &Config, key: &str) {
    match config.get(key) {
        Some(value) => println!("{value}"),
        None => {
            unknown_key(key);
            std::process::exit(1);
        }
    }
}

fn set_key(config: &mut Config, key: &str, value: &str) {
    if let Err(e) = config.set(key, value) {
        eprintln!("{e}");
        if config.get(key).is_none() {
            list_keys();
        }
        std::process::exit(1);
    }
    persist(config);
    // Show the stored value, paths may have had $MINDMAP expanded
    let stored = config.get(key).unwrap_or_default();
    println!("✓ Set {key} = {stored}");
}

fn unset_key(config: &mut Config, defaults: &Config, key: &str) {
    if config.unset(key, defaults).is_err() {
        unknown_key(key);
        std::process::exit(1);
    }
    persist(config);
    println!("✓ Reset {key} to default");
}

fn reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    if !confirm("Are you sure you want to reset config to defaults? (y/n): ") {
        println!("✗ Reset cancelled");
        return;
    }

    if let Err(e) = Config::reset() {
        eprintln!("Failed to remove config file: {e}");
        std::process::exit(1);
    }
    println!("✓ Config reset to defaults");
}

fn persist(config: &Config) {
    if let Err(e) = config.save() {
        eprintln!("Failed to save config: {e}");
        std::process::exit(1);
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt}");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn unknown_key(key: &str) {
    eprintln!("Unknown config key: '{key}'");
    list_keys();
}

fn list_keys() {
    eprintln!("Valid keys: {}", CONFIG_KEYS.join(", "));
}
