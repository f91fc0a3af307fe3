//! Lagoon CLI
//!
//! Runs a script file or evaluates one expression.

mod report;

use std::path::Path;
use std::process::ExitCode;

use lagoon_eval::value::display;
use lagoon_eval::Interpreter;
use tracing::debug;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return ExitCode::FAILURE;
    };

    match command.as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: lagoon run <file.lg>");
                return ExitCode::FAILURE;
            };
            run_file(Path::new(path))
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: lagoon eval <expression>");
                return ExitCode::FAILURE;
            }
            eval_expression(&args[2..].join(" "))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("lagoon {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        // `lagoon script.lg` is shorthand for `lagoon run script.lg`.
        other if !other.starts_with('-') => run_file(Path::new(other)),
        other => {
            eprintln!("error: unknown option '{other}'");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("Lagoon scripting language");
    println!();
    println!("Usage: lagoon <command> [args]");
    println!();
    println!("Commands:");
    println!("  run <file>     Run a script");
    println!("  eval <expr>    Evaluate an expression and print its value");
    println!("  help           Show this message");
    println!("  version        Show the version");
    println!();
    println!("Environment:");
    println!("  RUST_LOG         Enable logging, e.g. RUST_LOG=lagoon_eval=debug");
    println!("  LAGOON_LOG_TREE  Render logs as an indented call tree");
}

fn run_file(path: &Path) -> ExitCode {
    debug!(path = %path.display(), "run file");
    let interpreter = Interpreter::new();
    match interpreter.run_file(path) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let text = std::fs::read_to_string(path).unwrap_or_default();
            report::error(&path.display().to_string(), &text, &err);
            ExitCode::FAILURE
        }
    }
}

fn eval_expression(source: &str) -> ExitCode {
    debug!(bytes = source.len(), "eval expression");
    let interpreter = Interpreter::new();
    match interpreter.eval_source(source) {
        Ok(value) => {
            if !value.is_none() {
                println!("{}", display::repr(&value));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            report::error("<expr>", source, &err);
            ExitCode::FAILURE
        }
    }
}

/// Installs a subscriber only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_err() {
        return;
    }
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if std::env::var("LAGOON_LOG_TREE").is_ok() {
        registry
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
