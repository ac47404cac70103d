pub mod ast_printer;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod native;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

use std::io::Write;

use diagnostics::Reporter;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// What a full pipeline run produced, alongside whatever the shared
/// [`Reporter`] collected.  The host decides how to render diagnostics
/// and which exit code the two flags map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// A scan, parse, or resolve diagnostic was reported; the program was
    /// not executed.
    pub had_compile_error: bool,

    /// Execution started but a runtime fault halted it.
    pub had_runtime_error: bool,
}

/// Run `source` through the whole pipeline, writing program output
/// (`print`) to `output` and diagnostics into `reporter`.
pub fn run(source: &str, output: &mut dyn Write, reporter: Reporter) -> RunOutcome {
    let tokens = Scanner::new(source, reporter.clone()).scan_tokens();
    let statements = Parser::new(&tokens, reporter.clone()).parse();

    let mut interpreter = Interpreter::new(output, reporter.clone());
    native::install(&interpreter);

    Resolver::new(&mut interpreter, reporter.clone()).resolve(&statements);

    // don't execute a program that failed to scan/parse/resolve cleanly
    if reporter.has_error() {
        return RunOutcome {
            had_compile_error: true,
            had_runtime_error: false,
        };
    }

    RunOutcome {
        had_compile_error: false,
        had_runtime_error: interpreter.interpret(&statements).is_err(),
    }
}
