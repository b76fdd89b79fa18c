//! Generate command handler
//!
//! Reads a JSON outline, runs it through the generation service and writes
//! the resulting document to disk.

use logger::{error, info, verbose};
use mindmap_export::config::Config;
use mindmap_export::core::builder::NodeRecord;
use mindmap_export::core::export::OutputFormat;
use mindmap_export::core::service::{GeneratedDocument, MindMapService};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Title used when neither `--title` nor the root name gives one
const UNTITLED: &str = "Mind Map";

/// Options for one `generate` invocation
#[derive(Debug, Default)]
pub struct GenerateOptions<'a> {
    /// Format name as typed on the command line
    pub format: Option<&'a str>,
    /// Explicit title
    pub title: Option<&'a str>,
    /// Theme name
    pub theme: Option<&'a str>,
    /// Explicit output path
    pub output: Option<&'a Path>,
}

/// Run the generate command.
///
/// Exits the process with status 1 if generation fails.
pub fn run(input: &Path, options: &GenerateOptions<'_>, config: &Config) {
    match generate(input, options, config) {
        Ok(path) => println!("✓ Mind map written to: {}", path.display()),
        Err(err) => {
            error!("Generation failed for {}: {err}", input.display());
            eprintln!("✗ {err}");
            std::process::exit(1);
        }
    }
}

fn generate(input: &Path, options: &GenerateOptions<'_>, config: &Config) -> Result<PathBuf, String> {
    let json = read_input(input)?;
    let record = NodeRecord::from_json(&json).map_err(|e| format!("{}: {e}", input.display()))?;
    verbose!("Outline loaded from {}", input.display());

    let format = resolve_format(options.format, config)?;
    let title = resolve_title(options.title, &record);
    let theme = resolve_theme(options.theme, config);

    let service = MindMapService::from_config(config);
    let document = service
        .generate(&record, &title, format, theme.as_deref())
        .map_err(|e| e.to_string())?;

    let path = output_path(options.output, config, &document);
    write_document(&path, &document)?;
    info!(
        "Wrote {} document ({} bytes) to {}",
        document.format,
        document.bytes.len(),
        path.display()
    );
    Ok(path)
}

/// Read the outline from a file, or stdin for `-`
fn read_input(input: &Path) -> Result<String, String> {
    if input == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read stdin: {e}"))?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).map_err(|e| format!("Failed to read {}: {e}", input.display()))
    }
}

/// CLI format, else the configured default, else OPML
fn resolve_format(cli: Option<&str>, config: &Config) -> Result<OutputFormat, String> {
    let name = cli
        .or_else(|| Some(config.generation.default_format.as_str()).filter(|s| !s.is_empty()))
        .unwrap_or("opml");
    name.parse().map_err(|e| format!("{e}"))
}

/// CLI title, else the root name, else a generic title
fn resolve_title(cli: Option<&str>, record: &NodeRecord) -> String {
    cli.map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| Some(record.name.trim()).filter(|n| !n.is_empty()))
        .unwrap_or(UNTITLED)
        .to_string()
}

/// CLI theme, else the configured default; empty means unstyled
fn resolve_theme(cli: Option<&str>, config: &Config) -> Option<String> {
    cli.map(str::to_string)
        .or_else(|| Some(config.generation.default_theme.clone()))
        .filter(|t| !t.trim().is_empty())
}

fn output_path(cli: Option<&Path>, config: &Config, document: &GeneratedDocument) -> PathBuf {
    cli.map_or_else(
        || PathBuf::from(&config.paths.out_dir).join(&document.file_name),
        Path::to_path_buf,
    )
}

fn write_document(path: &Path, document: &GeneratedDocument) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {e}", parent.display()))?;
    }
    fs::write(path, &document.bytes).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
