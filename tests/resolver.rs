use rill::diagnostics::{Diagnostic, Reporter};
use rill::interpreter::Interpreter;
use rill::parser::Parser;
use rill::resolver::Resolver;
use rill::scanner::Scanner;

/// Resolve a program and return what the pass reported.
fn resolve(source: &str) -> Vec<Diagnostic> {
    let reporter = Reporter::new();
    let tokens = Scanner::new(source, reporter.clone()).scan_tokens();
    let statements = Parser::new(&tokens, reporter.clone()).parse();

    assert!(
        !reporter.has_error(),
        "source must scan and parse cleanly: {:?}",
        reporter.take()
    );

    let mut sink = Vec::new();
    let mut interpreter = Interpreter::new(&mut sink, reporter.clone());
    Resolver::new(&mut interpreter, reporter.clone()).resolve(&statements);

    reporter.take()
}

fn assert_clean(source: &str) {
    let diagnostics = resolve(source);

    assert!(
        diagnostics.is_empty(),
        "expected no diagnostics, got: {:?}",
        diagnostics
    );
}

#[test]
fn self_referential_initializer_is_an_error() {
    let diagnostics = resolve("let x = x;");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("own initializer"));
}

#[test]
fn shadowing_an_outer_binding_is_fine() {
    assert_clean("let x = 1; { let x = 2; x; }");
}

#[test]
fn shadowing_cannot_read_itself_in_its_own_initializer() {
    // `x` on the right refers to the new, not-yet-defined binding
    let diagnostics = resolve("let x = 1; { let x = x; }");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("own initializer"));
}

#[test]
fn duplicate_declaration_in_same_scope_is_an_error() {
    let diagnostics = resolve("{ let a = 1; let a = 2; }");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0]
        .message
        .contains("Already a variable with this name"));
}

#[test]
fn duplicate_declarations_in_sibling_scopes_are_fine() {
    assert_clean("{ let a = 1; } { let a = 2; }");
}

#[test]
fn return_outside_a_function_is_an_error() {
    let diagnostics = resolve("return 1;");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("return from top-level"));
}

#[test]
fn return_inside_a_loop_inside_a_function_is_fine() {
    assert_clean("fn f() { while true { return 1; } }");
}

#[test]
fn break_outside_a_loop_is_an_error() {
    let diagnostics = resolve("fn f() { break; }");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("'break'"));
}

#[test]
fn continue_outside_a_loop_is_an_error() {
    let diagnostics = resolve("continue;");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("'continue'"));
}

#[test]
fn break_cannot_cross_a_call_boundary() {
    // the loop is outside the function literal, so the break is orphaned
    let diagnostics = resolve("while true { let f = fn () { break; }; }");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("'break'"));
}

#[test]
fn break_and_continue_inside_loops_are_fine() {
    assert_clean("while true { break; } while true { continue; }");
    assert_clean("for let mut i = 0; i < 3; i += 1 { continue; }");
}

#[test]
fn reassigning_an_immutable_binding_is_an_error() {
    let diagnostics = resolve("let a = 1; a = 2;");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("not mutable"));
}

#[test]
fn compound_assignment_also_requires_mut() {
    let diagnostics = resolve("let a = 1; a += 2;");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("not mutable"));
}

#[test]
fn mutable_bindings_may_be_reassigned() {
    assert_clean("let mut a = 1; a = 2; a += 3;");
}

#[test]
fn captured_bindings_keep_their_mutability() {
    // reassignment through a closure checks the declaring scope
    let diagnostics = resolve("fn f() { let a = 1; let g = fn () { a = 2; }; }");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("not mutable"));

    assert_clean("fn f() { let mut a = 1; let g = fn () { a = 2; }; }");
}

#[test]
fn functions_may_recurse() {
    assert_clean("fn f(n) { if n > 0 { f(n - 1); } }");
}

#[test]
fn methods_resolve_self() {
    assert_clean(
        "class P { let x = 0; fn init(x) { self.x = x; } fn get() { return self.x; } }",
    );
}

#[test]
fn errors_accumulate_without_aborting() {
    let diagnostics = resolve("return 1; break; let a = 1; a = 2;");

    // all three problems reported in one pass
    assert_eq!(diagnostics.len(), 3);
}

#[test]
fn compile_errors_prevent_execution() {
    let mut output = Vec::new();
    let reporter = Reporter::new();

    let outcome = rill::run("print(1); return 2;", &mut output, reporter.clone());

    assert!(outcome.had_compile_error);
    assert!(!outcome.had_runtime_error);
    assert!(output.is_empty(), "program must not have run");
    assert!(reporter.has_error());
}
