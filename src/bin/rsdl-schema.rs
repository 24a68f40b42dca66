//! RSDL Schema CLI
//!
//! Command-line interface for transcoding RSDL schemas to and from Swagger
//! 2.0 documents.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rsdl_schema::{
    export_schema, import_document, is_url, load_document_auto, load_schema, load_schema_str,
    Diagnostic,
};

#[derive(Parser)]
#[command(name = "rsdl-schema")]
#[command(about = "Transcode RSDL schemas to and from Swagger 2.0")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a schema to a Swagger 2.0 document
    Export {
        /// Schema source: file path, or - for stdin
        schema: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Base path prefix for the generated document (default: /api)
        #[arg(long)]
        base_path: Option<String>,

        /// Compact JSON output (pretty-printed by default)
        #[arg(long)]
        compact: bool,
    },

    /// Import a Swagger 2.0 document into a schema
    Import {
        /// Document source: file path or URL (http:// or https://)
        document: String,

        /// Schema name when the document title does not carry one
        /// (default: derived from the source filename)
        #[arg(long)]
        name: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Compact JSON output (pretty-printed by default)
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            schema,
            output,
            base_path,
            compact,
        } => run_export(&schema, output, base_path.as_deref(), compact),

        Commands::Import {
            document,
            name,
            output,
            compact,
        } => run_import(&document, name.as_deref(), output, compact),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_export(
    source: &str,
    output: Option<PathBuf>,
    base_path: Option<&str>,
    compact: bool,
) -> Result<(), u8> {
    let schema = if source == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content).map_err(|e| {
            eprintln!("Error reading stdin: {}", e);
            3u8
        })?;
        load_schema_str(&content).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?
    } else {
        load_schema(Path::new(source)).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?
    };

    let exported = export_schema(&schema, base_path).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    report_diagnostics(&exported.diagnostics);

    write_json(&exported.doc, output, compact)
}

fn run_import(
    source: &str,
    name: Option<&str>,
    output: Option<PathBuf>,
    compact: bool,
) -> Result<(), u8> {
    let doc = load_document_auto(source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let fallback = name
        .map(str::to_string)
        .unwrap_or_else(|| source_stem(source));
    let imported = import_document(&doc, &fallback);
    report_diagnostics(&imported.diagnostics);

    write_json(&imported.schema, output, compact)
}

/// Schema name derived from the source: the last path segment without its
/// extension.
fn source_stem(source: &str) -> String {
    let last = if is_url(source) {
        source.rsplit('/').next().unwrap_or(source)
    } else {
        Path::new(source)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(source)
    };
    match last.rfind('.') {
        Some(i) if i > 0 => last[..i].to_string(),
        _ => last.to_string(),
    }
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);
    }
}

fn write_json<T: serde::Serialize>(
    value: &T,
    output: Option<PathBuf>,
    compact: bool,
) -> Result<(), u8> {
    let json_output = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}
