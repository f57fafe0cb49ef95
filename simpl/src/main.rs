use clap::{ArgAction, Args, Parser, Subcommand};
use miette::{IntoDiagnostic, MietteHandlerOpts, NamedSource, Report, Result};
use simpl_interpreter::{Environment, Evaluator};
use simpl_parser::{parse_program, tokenize};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

mod repl;
mod sexpr;

use repl::{ReplConfig, ReplSession};

#[derive(Parser)]
#[command(
    name = "simpl",
    version,
    about = "The Simpl scripting language",
    long_about = "Simpl is a small expression-oriented scripting language with objects, closures and a tree-walking interpreter."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    repl: ReplArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ReplArgs {
    /// Do not load or save REPL history
    #[arg(long, global = true)]
    no_history: bool,

    /// REPL history file
    #[arg(long, value_name = "PATH", global = true)]
    history_file: Option<String>,

    /// REPL prompt
    #[arg(long, global = true)]
    prompt: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a Simpl source file and print its final value
    Run {
        /// Simpl source file (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse Simpl source files and display their AST
    Parse {
        /// Simpl source files to parse (use '-' to read from stdin)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Show the full tree with span information
        #[arg(short, long)]
        spans: bool,
    },

    /// Print the token stream of a Simpl source file
    Tokens {
        /// Simpl source file (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Start the interactive REPL (the default)
    Repl,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    setup_miette_handler();

    let outcome = match cli.command {
        Some(Commands::Run { file }) => handle_run_command(&file),
        Some(Commands::Parse { files, spans }) => handle_parse_command(files, spans),
        Some(Commands::Tokens { file }) => handle_tokens_command(&file),
        Some(Commands::Repl) | None => handle_repl_command(cli.repl),
    };

    if let Err(report) = outcome {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

/// Install env_logger; RUST_LOG takes precedence over -v
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Configure miette for graphical error reporting
fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn handle_run_command(file_path: &Path) -> Result<()> {
    let (source, source_name) = read_source(file_path)?;

    let program = parse_program(&source)
        .map_err(|error| Report::new(error).with_source_code(named(&source_name, &source)))?;

    let environment = Environment::root();
    let value = Evaluator::new()
        .evaluate(&program, &environment)
        .map_err(|error| Report::new(error).with_source_code(named(&source_name, &source)))?;

    println!("{value}");
    Ok(())
}

fn handle_parse_command(files: Vec<PathBuf>, spans: bool) -> Result<()> {
    let mut success = true;
    let multiple_files = files.len() > 1;

    for file_path in files {
        match parse_single_file(&file_path, spans) {
            Ok(()) => {
                if multiple_files {
                    println!("ok {}", display_name(&file_path));
                }
            }
            Err(e) => {
                eprintln!("{e:?}");
                success = false;
            }
        }
    }

    if success {
        Ok(())
    } else {
        Err(miette::miette!("Parsing failed"))
    }
}

fn parse_single_file(file_path: &Path, spans: bool) -> Result<()> {
    let (source, source_name) = read_source(file_path)?;
    let program = parse_program(&source)
        .map_err(|error| Report::new(error).with_source_code(named(&source_name, &source)))?;

    if spans {
        println!("{program:#?}");
    } else {
        println!("{}", sexpr::format_program_as_sexpr(&program));
    }
    Ok(())
}

fn handle_tokens_command(file_path: &Path) -> Result<()> {
    let (source, source_name) = read_source(file_path)?;
    let tokens = tokenize(&source)
        .map_err(|error| Report::new(error).with_source_code(named(&source_name, &source)))?;

    for token in tokens {
        println!(
            "{:>4}..{:<4} {:<14} {}",
            token.span.start,
            token.span.end,
            format!("{:?}", token.kind),
            token.value
        );
    }
    Ok(())
}

fn handle_repl_command(args: ReplArgs) -> Result<()> {
    let mut config = ReplConfig::default();
    if args.no_history {
        config.persist_history = false;
    }
    if let Some(history_file) = args.history_file {
        config.history_file = Some(history_file);
    }
    if let Some(prompt) = args.prompt {
        config.prompt = prompt;
    }
    config.verbose_errors = log::log_enabled!(log::Level::Debug);

    let mut session = ReplSession::with_config(config)?;
    session.run()?;
    Ok(())
}

/// Read a `.simpl` file, or stdin for '-'
fn read_source(file_path: &Path) -> Result<(String, String)> {
    if file_path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        return Ok((buffer, "<stdin>".to_string()));
    }

    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }

    if file_path.extension().and_then(|s| s.to_str()) != Some("simpl") {
        return Err(miette::miette!(
            "Expected .simpl file, got: {}",
            file_path.display()
        ));
    }

    log::info!("reading {}", file_path.display());
    let source = fs::read_to_string(file_path).into_diagnostic()?;
    Ok((source, file_path.display().to_string()))
}

fn display_name(file_path: &Path) -> String {
    if file_path.to_str() == Some("-") {
        "<stdin>".to_string()
    } else {
        file_path.display().to_string()
    }
}

fn named(name: &str, source: &str) -> NamedSource<String> {
    NamedSource::new(name, source.to_string())
}
