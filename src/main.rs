use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use taylorscript::{
    error::ExecError,
    interpreter::{evaluator::core::Context, lexer::scan_tokens},
    run,
};

/// TaylorScript is a small dynamically-typed scripting language with a
/// themed keyword vocabulary.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a .tay script. Starts the interactive prompt when omitted.
    script: Option<PathBuf>,

    /// Print the scanned token table before running.
    #[arg(short, long)]
    tokens: bool,
}

fn main() {
    let args = Args::parse();

    match args.script {
        Some(path) => run_file(&path, args.tokens),
        None => {
            if let Err(e) = run_prompt(args.tokens) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
    }
}

/// Runs a script file to completion.
///
/// Exits 65 after lexical/parse errors (or a wrong file extension) and 70
/// after a runtime error.
fn run_file(path: &Path, show_tokens: bool) {
    if path.extension().is_none_or(|ext| ext != "tay") {
        eprintln!("[FileExtensionError] Source file must end with .tay extension.");
        process::exit(65);
    }

    let source = fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  path.display());
        process::exit(1);
    });

    if show_tokens {
        print_tokens(&source);
    }

    let mut context = Context::new();
    if let Err(error) = run(&source, &mut context) {
        eprintln!("{error}");
        match error {
            ExecError::Syntax(_) => process::exit(65),
            ExecError::Runtime(_) => process::exit(70),
        }
    }
}

/// Reads and runs lines interactively.
///
/// Each line is scanned and parsed on its own, so error state never leaks
/// between lines, but the evaluation context is shared: variables and
/// functions declared on earlier lines stay visible.
fn run_prompt(show_tokens: bool) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut context = Context::new();

    println!("TaylorScript v{}", env!("CARGO_PKG_VERSION"));
    loop {
        match rl.readline("->> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if show_tokens {
                    print_tokens(&line);
                }
                if let Err(error) = run(&line, &mut context) {
                    eprintln!("{error}");
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => return Err(error),
        }
    }
    Ok(())
}

/// Prints the token table for a piece of source text.
fn print_tokens(source: &str) {
    let (tokens, _) = scan_tokens(source);
    for (token, line) in &tokens {
        println!("{line:>4}  {token:?}");
    }
}
