use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::info;

use rill::ast_printer::AstPrinter;
use rill::diagnostics::Reporter;
use rill::parser::Parser;
use rill::scanner::Scanner;

#[derive(ClapParser, Debug)]
#[command(version, about = "Rill language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: Option<PathBuf> },

    /// Parses input from a file as a single expression and prints its AST
    Parse { filename: Option<PathBuf> },

    /// Runs input from a file as a Rill program
    Run { filename: Option<PathBuf> },
}

fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let source = std::fs::read_to_string(&filename)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", source.len(), filename);

    Ok(source)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    // Write to file with module path and source line
    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rill::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // override with RUST_LOG
        .init();

    info!("Logger initialized, writing to app.log");

    Ok(())
}

/// Drain the reporter to stderr.  Returns whether anything was printed.
fn print_diagnostics(reporter: &Reporter) -> bool {
    let diagnostics = reporter.take();

    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic);
    }

    !diagnostics.is_empty()
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.command {
        Commands::Tokenize { filename } => match filename {
            Some(filename) => {
                info!("Running Tokenize subcommand");

                let source = read_file(filename)?;
                let reporter = Reporter::new();

                let tokens = Scanner::new(&source, reporter.clone()).scan_tokens();

                for token in &tokens {
                    println!("{}", token);
                }

                if print_diagnostics(&reporter) {
                    std::process::exit(65);
                }
            }

            None => {
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },

        Commands::Parse { filename } => match filename {
            Some(filename) => {
                info!("Running Parse subcommand");

                let source = read_file(filename)?;
                let reporter = Reporter::new();

                let tokens = Scanner::new(&source, reporter.clone()).scan_tokens();
                let expr = Parser::new(&tokens, reporter.clone()).parse_expression();

                match expr {
                    Some(expr) if !reporter.has_error() => {
                        println!("{}", AstPrinter.print(&expr));
                    }

                    _ => {
                        print_diagnostics(&reporter);
                        std::process::exit(65);
                    }
                }
            }

            None => {
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },

        Commands::Run { filename } => match filename {
            Some(filename) => {
                info!("Running Run subcommand");

                let source = read_file(filename)?;
                let reporter = Reporter::new();

                let mut stdout = std::io::stdout();
                let outcome = rill::run(&source, &mut stdout, reporter.clone());

                print_diagnostics(&reporter);

                if outcome.had_compile_error {
                    std::process::exit(65);
                }

                if outcome.had_runtime_error {
                    std::process::exit(70);
                }
            }

            None => {
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },
    }

    Ok(())
}
