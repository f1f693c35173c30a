// yac: tokenizer and parser shell

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser as CliParser, Subcommand};
use crossterm::tty::IsTty;
use tracing::info;

use yac::config::LogSettings;
use yac::logging;
use yac::parse;
use yac::repl::{Mode, Printer, Repl};

/// Tokenize and parse programs in a small C-like scripting language.
#[derive(CliParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Disable coloured output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive shell (the default).
    Repl {
        /// Parse each line and print its canonical form instead of tokens.
        #[arg(long)]
        ast: bool,
    },
    /// Print every token of a source file.
    Tokens { file: PathBuf },
    /// Parse a source file and print its canonical form and diagnostics.
    Parse { file: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(LogSettings::from_env());

    let color = !args.no_color && io::stdout().is_tty();

    match args.command.unwrap_or(Command::Repl { ast: false }) {
        Command::Repl { ast } => {
            let mode = if ast { Mode::Ast } else { Mode::Tokens };
            info!(?mode, "starting shell");
            let stdin = io::stdin();
            Repl::new(mode, color).start(stdin.lock(), &mut io::stdout().lock())?;
        }
        Command::Tokens { file } => {
            let source = read_source(&file)?;
            Printer::new(color).write_tokens(&mut io::stdout().lock(), &source)?;
        }
        Command::Parse { file } => {
            let source = read_source(&file)?;
            let output = parse(&source);
            let printer = Printer::new(color);
            printer.write_parse_output(&mut io::stdout().lock(), &output)?;

            if output.has_errors() {
                eprintln!(
                    "Parsing {} produced {} diagnostic(s).",
                    file.display(),
                    output.diagnostics.len()
                );
                std::process::exit(1);
            }
            eprintln!(
                "Parsed successfully. Found {} top-level statements.",
                output.program.len()
            );
        }
    }

    Ok(())
}

fn read_source(path: &Path) -> io::Result<String> {
    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        std::process::exit(1);
    }
    info!(path = %path.display(), "reading source");
    fs::read_to_string(path)
}
