//! Command-line front end for the `ctjson` library.
//!
//! Reads a document from a file (or standard input) and prints its tokens,
//! its compact reconstruction, its structural dump, or its compact JSON form.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ctjson::{parse_with_limits, pretty_print, tokenize_with_limits, Limits, ParseError};

#[derive(Parser)]
#[command(name = "ctjson")]
#[command(about = "Tokenize and parse integer-only JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Sets the level of verbosity.
    #[arg(short, long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbosity: u8,

    /// Maximum nesting depth of objects and arrays.
    #[arg(
        long,
        global = true,
        default_value_t = ctjson::DEFAULT_MAX_DEPTH,
        value_parser = parse_max_depth
    )]
    max_depth: usize,

    /// Maximum input size in bytes.
    #[arg(long, global = true, default_value_t = ctjson::MAX_JSON_SIZE_BYTES)]
    max_input_size: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one token per line as `<offset> <token>`.
    Tokenize {
        /// File to read. If none, the standard input is used.
        path: Option<PathBuf>,
    },

    /// Print the tokens back as compact text.
    Reconstruct {
        /// File to read. If none, the standard input is used.
        path: Option<PathBuf>,
    },

    /// Parse the document and print its structural dump.
    Parse {
        /// File to read. If none, the standard input is used.
        path: Option<PathBuf>,

        /// Spaces per nesting level.
        #[arg(short, long, default_value_t = 2)]
        indent: usize,
    },

    /// Parse the document and print it as compact JSON.
    Format {
        /// File to read. If none, the standard input is used.
        path: Option<PathBuf>,
    },
}

impl Command {
    fn path(&self) -> Option<&PathBuf> {
        match self {
            Command::Tokenize { path }
            | Command::Reconstruct { path }
            | Command::Parse { path, .. }
            | Command::Format { path } => path.as_ref(),
        }
    }
}

fn parse_max_depth(arg: &str) -> Result<usize, String> {
    let depth: usize = arg.parse().map_err(|e| format!("{e}"))?;
    if depth > ctjson::MAX_SUPPORTED_DEPTH {
        return Err(format!("must be at most {}", ctjson::MAX_SUPPORTED_DEPTH));
    }
    Ok(depth)
}

fn read_source(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(path) => {
            log::info!("reading {}", path.display());
            std::fs::read_to_string(path)
        }
        None => {
            log::info!("reading standard input");
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = stderrlog::new()
        .verbosity(usize::from(cli.verbosity))
        .init()
    {
        eprintln!("warning: could not install logger: {e}");
    }

    let limits = Limits {
        max_input_size: cli.max_input_size,
        max_depth: cli.max_depth,
    };

    let source = match read_source(cli.command.path()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let output: Result<String, ParseError> = match &cli.command {
        Command::Tokenize { .. } => tokenize_with_limits(&source, limits)
            .map(|tokens| {
                tokens
                    .iter()
                    .map(|token| format!("{} {}", token.position, token.kind))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .map_err(Into::into),
        Command::Reconstruct { .. } => tokenize_with_limits(&source, limits)
            .map(|tokens| ctjson::reconstruct(&tokens))
            .map_err(Into::into),
        Command::Parse { indent, .. } => {
            parse_with_limits(&source, limits).map(|node| pretty_print(&node, *indent))
        }
        Command::Format { .. } => {
            parse_with_limits(&source, limits).map(|node| node.to_json_string())
        }
    };

    match output {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("failed at byte {}", e.position());
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
