use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::{ArgAction, Parser};
use gust::{lexer::lexer::Lexer, parse_with_options, render_error, ParseOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Scan and parse a gust source file, printing the AST or its diagnostics.
#[derive(Debug, Parser)]
#[command(name = "gust", about = "Front end for the gust language")]
struct Cli {
    /// Source file to parse
    file: PathBuf,

    /// Print the token stream instead of the AST
    #[arg(long)]
    tokens: bool,

    /// Keep comments as tokens and collect them on the program
    #[arg(long)]
    emit_comments: bool,

    /// Report unterminated strings and block comments as errors
    #[arg(long)]
    strict: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.file.display(), error);
            return ExitCode::FAILURE;
        }
    };
    let file_name = cli.file.to_string_lossy().to_string();

    let mut options = ParseOptions::default();
    if cli.emit_comments {
        options = options.emit_comments();
    }
    if cli.strict {
        options = options.strict();
    }

    let start = Instant::now();

    if cli.tokens {
        let lexer = Lexer::new(source, Some(file_name)).with_comments(options.comments);
        for token in lexer {
            println!("{:>5}..{:<5} {}", token.span.start.0, token.span.end.0, token);
        }
        info!(elapsed = ?start.elapsed(), "tokenized");
        return ExitCode::SUCCESS;
    }

    let (program, errors) = parse_with_options(source.clone(), Some(file_name), options);
    info!(elapsed = ?start.elapsed(), statements = program.statements.len(), "parsed");

    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{}\n", render_error(error, &source));
        }
        eprintln!("{} error(s) found", errors.len());
        return ExitCode::FAILURE;
    }

    for comment in &program.comments {
        println!("{}", comment);
    }
    println!("{}", program);

    ExitCode::SUCCESS
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // Target is the library crate, where the scanner and parser log.
    match v {
        0 => "gust=warn",
        1 => "gust=debug",
        _ => "gust=trace",
    }
}
