//! CLI tool for converting editor slide exports into typed slide JSON.

use anyhow::{Context, Result};
use clap::Parser;
use slidekit_core::{parse_document, MarkupSerializer, SlideConverter, ThemeDefaults};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Convert slide export JSON into the typed slide model.
#[derive(Parser, Debug)]
#[command(name = "slidekit-import")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input export file(s) (.json)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Fallback font for text without one (a theme in the document wins)
    #[arg(long, default_value = "")]
    font_name: String,

    /// Fallback text color for text without one (a theme in the document wins)
    #[arg(long, default_value = "#333")]
    font_color: String,

    /// Escape markup characters in text content
    #[arg(long)]
    escape_text: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let theme = ThemeDefaults::new(args.font_name.clone(), args.font_color.clone());
    let converter = SlideConverter::new()
        .with_markup_serializer(MarkupSerializer::new().with_escape_text(args.escape_text));

    for input_path in &args.input {
        log::info!("Processing: {}", input_path.display());

        match process_file(input_path, &args, &converter, &theme) {
            Ok(output) => {
                if args.print {
                    println!("{}", output);
                } else {
                    let output_path = get_output_path(input_path, args.output.as_ref())?;
                    write_output(&output_path, &output)?;
                    log::info!("Written to: {}", output_path.display());
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Convert a single export file to output JSON.
fn process_file(
    input_path: &Path,
    args: &Args,
    converter: &SlideConverter,
    theme: &ThemeDefaults,
) -> Result<String> {
    let input = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let document = parse_document(&input)
        .with_context(|| format!("Failed to parse {}", input_path.display()))?;

    let (converted, stats) = converter.convert_document(&document, theme);

    log::info!(
        "  Converted {} slides, {} elements ({} skipped)",
        stats.slides,
        stats.elements,
        stats.skipped
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&converted)?
    } else {
        serde_json::to_string(&converted)?
    };

    Ok(output)
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.slides.json", stem);

    let output_path = match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        },
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    writeln!(file, "{}", content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_next_to_input() {
        let path = get_output_path(Path::new("exports/deck.json"), None).unwrap();
        assert_eq!(path, PathBuf::from("exports/deck.slides.json"));
    }

    #[test]
    fn test_output_path_without_stem() {
        let path = get_output_path(Path::new(""), None).unwrap();
        assert_eq!(path, PathBuf::from("output.slides.json"));
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["slidekit-import", "deck.json"]);
        assert_eq!(args.input, vec![PathBuf::from("deck.json")]);
        assert_eq!(args.font_color, "#333");
        assert_eq!(args.font_name, "");
        assert!(!args.escape_text);
        assert!(!args.pretty);
    }
}
