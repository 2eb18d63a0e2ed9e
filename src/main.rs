use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser as CliParser;
use cminus::{ArrayPolicy, Parser, ParserConfig, Scanner};
use tracing_subscriber::EnvFilter;

/// Parse and evaluate a cminus program, then print its symbol table.
#[derive(CliParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to run
    file: PathBuf,

    /// Print the symbol table as JSON
    #[arg(long)]
    json: bool,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Log every consumed token and symbol update
    #[arg(short, long)]
    verbose: bool,

    /// Evaluate array syntax as no-ops instead of rejecting it
    #[arg(long)]
    allow_arrays: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("cminus=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&args) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {} failed", args.file.display()))?;

    let tokens = Scanner::new(&source).scan_tokens()?;
    if args.tokens {
        for token in &tokens {
            println!(
                "{:>4}:{:<4} {:<14} {}",
                token.line,
                token.column,
                format!("{:?}", token.kind),
                token.lexeme
            );
        }
    }

    let arrays = if args.allow_arrays {
        ArrayPolicy::Ignore
    } else {
        ArrayPolicy::Reject
    };
    let config = ParserConfig::default().with_arrays(arrays);

    let program = Parser::with_config(tokens, config)
        .parse()
        .with_context(|| format!("parsing {} failed", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&program.symbols)?);
    } else {
        println!("Parsing successful.");
        println!();
        println!("Symbol Table ({}):", program.name);
        print!("{}", program.symbols);
    }

    Ok(())
}
