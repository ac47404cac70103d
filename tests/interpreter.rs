use rill::diagnostics::Reporter;
use rill::RunOutcome;

/// Run source through the whole pipeline with a fresh environment and
/// return the program's `print` output plus what was reported.
fn run(source: &str) -> (String, RunOutcome, Reporter) {
    let mut buffer = Vec::new();
    let reporter = Reporter::new();

    let outcome = rill::run(source, &mut buffer, reporter.clone());
    let output = String::from_utf8(buffer).expect("program output is UTF-8");

    (output, outcome, reporter)
}

/// Run source that must complete without any diagnostics.
fn run_ok(source: &str) -> String {
    let (output, outcome, reporter) = run(source);

    assert!(
        !outcome.had_compile_error && !outcome.had_runtime_error,
        "diagnostics: {:?}",
        reporter.take()
    );

    output
}

/// Run source that must hit a runtime fault; returns output + message.
fn run_fault(source: &str) -> (String, String) {
    let (output, outcome, reporter) = run(source);

    assert!(!outcome.had_compile_error, "unexpected compile error");
    assert!(outcome.had_runtime_error, "expected a runtime fault");

    let diagnostics = reporter.take();
    assert_eq!(diagnostics.len(), 1, "fault must be reported exactly once");

    (output, diagnostics[0].message.clone())
}

// ───────────────────────── printing & literals ─────────────────────────

#[test]
fn print_renders_values() {
    let output = run_ok(
        "print(1 + 2);\n\
         print(2.5);\n\
         print('a' + 'b');\n\
         print(true);\n\
         print(nil);",
    );

    assert_eq!(output, "3\n2.5\nab\ntrue\nnil\n");
}

#[test]
fn str_native_renders_like_print() {
    assert_eq!(run_ok("print(str(42) + '!');"), "42!\n");
    assert_eq!(run_ok("print(str(nil));"), "nil\n");
}

#[test]
fn clock_native_returns_a_number() {
    assert_eq!(run_ok("print(clock() > 0);"), "true\n");
}

#[test]
fn function_values_render_with_their_names() {
    let output = run_ok(
        "fn greet() { }\n\
         print(greet);\n\
         print(print);\n\
         print(fn () { });",
    );

    assert_eq!(output, "<fn greet>\n<native fn print>\n<fn>\n");
}

// ───────────────────────── scoping & bindings ─────────────────────────

#[test]
fn block_scoping_and_shadowing() {
    let output = run_ok(
        "let a = 'global';\n\
         {\n\
             let a = 'outer';\n\
             {\n\
                 let a = 'inner';\n\
                 print(a);\n\
             }\n\
             print(a);\n\
         }\n\
         print(a);",
    );

    assert_eq!(output, "inner\nouter\nglobal\n");
}

#[test]
fn assignment_returns_the_assigned_value() {
    assert_eq!(run_ok("let mut a = 1; print(a = 7);"), "7\n");
}

#[test]
fn compound_assignment_updates_in_place() {
    let output = run_ok(
        "let mut a = 10;\n\
         a += 5; print(a);\n\
         a -= 3; print(a);\n\
         a *= 2; print(a);\n\
         a /= 4; print(a);",
    );

    assert_eq!(output, "15\n12\n24\n6\n");
}

#[test]
fn undefined_variable_is_a_fault() {
    let (_, message) = run_fault("print(missing);");

    assert!(message.contains("Undefined variable 'missing'"));
}

// ───────────────────────── closures ─────────────────────────

#[test]
fn closures_capture_by_reference() {
    let output = run_ok(
        "fn makeCounter() {\n\
             let mut count = 0;\n\
             return fn () {\n\
                 count += 1;\n\
                 return count;\n\
             };\n\
         }\n\
         let counter = makeCounter();\n\
         print(counter());\n\
         print(counter());",
    );

    assert_eq!(output, "1\n2\n");
}

#[test]
fn closures_observe_mutations_made_after_capture() {
    let output = run_ok(
        "fn make() {\n\
             let mut x = 'before';\n\
             let get = fn () { return x; };\n\
             x = 'after';\n\
             return get;\n\
         }\n\
         print(make()());",
    );

    assert_eq!(output, "after\n");
}

#[test]
fn sibling_closures_share_one_environment() {
    let output = run_ok(
        "fn make() {\n\
             let mut n = 0;\n\
             let bump = fn () { n += 1; };\n\
             let read = fn () { return n; };\n\
             bump(); bump();\n\
             return read;\n\
         }\n\
         print(make()());",
    );

    assert_eq!(output, "2\n");
}

#[test]
fn recursion_works() {
    let output = run_ok(
        "fn fib(n) {\n\
             if n < 2 { return n; }\n\
             return fib(n - 1) + fib(n - 2);\n\
         }\n\
         print(fib(10));",
    );

    assert_eq!(output, "55\n");
}

// ───────────────────────── control flow ─────────────────────────

#[test]
fn if_else_chains() {
    let output = run_ok(
        "let x = 2;\n\
         if x == 1 { print('one'); }\n\
         else if x == 2 { print('two'); }\n\
         else { print('many'); }",
    );

    assert_eq!(output, "two\n");
}

#[test]
fn while_and_for_loops() {
    assert_eq!(
        run_ok(
            "let mut sum = 0;\n\
             for let mut i = 1; i <= 4; i += 1 { sum += i; }\n\
             print(sum);"
        ),
        "10\n"
    );

    assert_eq!(
        run_ok(
            "let mut i = 3;\n\
             while i > 0 { print(i); i -= 1; }"
        ),
        "3\n2\n1\n"
    );
}

#[test]
fn break_terminates_only_the_innermost_loop() {
    let output = run_ok(
        "let mut i = 0;\n\
         while i < 3 {\n\
             i += 1;\n\
             let mut j = 0;\n\
             while true {\n\
                 j += 1;\n\
                 if j == 2 { break; }\n\
             }\n\
             print(i * 10 + j);\n\
         }",
    );

    assert_eq!(output, "12\n22\n32\n");
}

#[test]
fn continue_rechecks_the_loop_condition() {
    let output = run_ok(
        "let mut i = 0;\n\
         while i < 5 {\n\
             i += 1;\n\
             if i == 2 { continue; }\n\
             print(i);\n\
         }",
    );

    assert_eq!(output, "1\n3\n4\n5\n");
}

#[test]
fn return_defaults_to_nil() {
    assert_eq!(run_ok("fn f() { return; } print(f());"), "nil\n");
    assert_eq!(run_ok("fn g() { } print(g());"), "nil\n");
}

#[test]
fn logical_operators_return_operand_values() {
    let output = run_ok(
        "print(nil or 'default');\n\
         print(false and 1);\n\
         print(1 and 2);\n\
         print('left' or ignored);",
    );

    // the short-circuited right side is never evaluated
    assert_eq!(output, "default\nfalse\n2\nleft\n");
}

#[test]
fn ternary_selects_by_truthiness() {
    assert_eq!(run_ok("print(1 == 1 ? 'yes' : 'no');"), "yes\n");
    assert_eq!(run_ok("print(0 ? 'zero is truthy' : 'unreached');"), "zero is truthy\n");
}

#[test]
fn ternary_condition_must_be_bool_or_number() {
    let (_, message) = run_fault("print('s' ? 1 : 2);");

    assert!(message.contains("boolean or a number"));
}

#[test]
fn comma_evaluates_left_then_yields_right() {
    let output = run_ok(
        "let mut a = 1;\n\
         let b = (a = 5, a + 1);\n\
         print(a);\n\
         print(b);",
    );

    assert_eq!(output, "5\n6\n");
}

// ───────────────────────── operators & type errors ─────────────────────────

#[test]
fn truthiness_only_nil_and_false_are_falsy() {
    let output = run_ok(
        "print(!nil);\n\
         print(!false);\n\
         print(!0);\n\
         print(!'');\n\
         print(!true);",
    );

    assert_eq!(output, "true\ntrue\nfalse\nfalse\nfalse\n");
}

#[test]
fn unary_plus_is_a_pass_through() {
    assert_eq!(run_ok("print(+5); print(+'s');"), "5\ns\n");
}

#[test]
fn unary_minus_requires_a_number() {
    let (_, message) = run_fault("print(-'s');");

    assert!(message.contains("Operand must be a number"));
}

#[test]
fn division_by_zero_follows_ieee_semantics() {
    assert_eq!(run_ok("print(10 / 0);"), "inf\n");
    assert_eq!(run_ok("print(-10 / 0);"), "-inf\n");
}

#[test]
fn plus_concatenates_strings_and_adds_numbers_only() {
    let (_, message) = run_fault("print(1 + 'one');");

    assert!(message.contains("two numbers or two strings"));
}

#[test]
fn equality_is_numeric_only() {
    assert_eq!(run_ok("print(1 + 1 == 2); print(1 != 2);"), "true\ntrue\n");

    // comparing non-numbers faults rather than answering false
    let (_, message) = run_fault("print('a' == 'a');");
    assert!(message.contains("Operands must be numbers"));
}

#[test]
fn comparisons_require_numbers() {
    let (_, message) = run_fault("print('a' < 'b');");

    assert!(message.contains("Operands must be numbers"));
}

// ───────────────────────── calls & arity ─────────────────────────

#[test]
fn arity_mismatch_names_both_counts_and_skips_the_body() {
    let (output, message) = run_fault(
        "fn two(a, b) { print('ran'); }\n\
         two(1);",
    );

    assert!(message.contains("Expected 2 arguments but got 1"));
    assert!(output.is_empty(), "callee body must not run");
}

#[test]
fn native_arity_is_checked_too() {
    let (_, message) = run_fault("clock(1);");

    assert!(message.contains("Expected 0 arguments but got 1"));
}

#[test]
fn calling_a_non_callable_is_a_fault() {
    let (_, message) = run_fault("let x = 4; x();");

    assert!(message.contains("Can only call functions and classes"));
}

#[test]
fn faults_halt_remaining_top_level_statements() {
    let (output, message) = run_fault(
        "print('first');\n\
         missing();\n\
         print('second');",
    );

    assert_eq!(output, "first\n");
    assert!(message.contains("Undefined variable"));
}

// ───────────────────────── classes & instances ─────────────────────────

#[test]
fn constructors_seed_defaults_then_run_init() {
    let output = run_ok(
        "class Point {\n\
             let x = 0;\n\
             let y = 0;\n\
             fn init(x) { self.x = x; }\n\
             fn sum() { return self.x + self.y; }\n\
         }\n\
         let p = Point(7);\n\
         print(p.x);\n\
         print(p.y);\n\
         print(p.sum());\n\
         print(p);",
    );

    assert_eq!(output, "7\n0\n7\nPoint instance\n");
}

#[test]
fn classes_without_init_take_no_arguments() {
    let output = run_ok(
        "class Empty { }\n\
         print(Empty());",
    );

    assert_eq!(output, "Empty instance\n");

    let (_, message) = run_fault("class Empty { } Empty(1);");
    assert!(message.contains("Expected 0 arguments but got 1"));
}

#[test]
fn fields_shadow_methods() {
    let output = run_ok(
        "class C {\n\
             let size = 'field';\n\
             fn size() { return 'method'; }\n\
         }\n\
         print(C().size);",
    );

    assert_eq!(output, "field\n");
}

#[test]
fn bound_methods_remember_their_receiver() {
    let output = run_ok(
        "class Greeter {\n\
             let name = 'rill';\n\
             fn hello() { return 'hi ' + self.name; }\n\
         }\n\
         let m = Greeter().hello;\n\
         print(m());",
    );

    assert_eq!(output, "hi rill\n");
}

#[test]
fn instances_have_independent_fields() {
    let output = run_ok(
        "class Box {\n\
             let v = 0;\n\
             fn init(v) { self.v = v; }\n\
         }\n\
         let a = Box(1);\n\
         let b = Box(2);\n\
         print(a.v);\n\
         print(b.v);",
    );

    assert_eq!(output, "1\n2\n");
}

#[test]
fn setting_an_undeclared_field_is_a_fault() {
    let (_, message) = run_fault(
        "class C { let x = 0; }\n\
         let c = C();\n\
         c.missing = 1;",
    );

    assert!(message.contains("Undefined property 'missing'"));
}

#[test]
fn reading_an_absent_property_is_a_fault() {
    let (_, message) = run_fault("class C { } print(C().ghost);");

    assert!(message.contains("Undefined property 'ghost'"));
}

#[test]
fn property_access_on_non_instances_is_a_fault() {
    let (_, message) = run_fault("print((4).x);");

    assert!(message.contains("Only instances have properties"));
}

// ───────────────────────── static members ─────────────────────────

#[test]
fn static_fields_live_on_the_class() {
    let output = run_ok(
        "class Counter {\n\
             static let total = 0;\n\
             static fn bump() {\n\
                 Counter.total += 1;\n\
                 return Counter.total;\n\
             }\n\
         }\n\
         print(Counter.bump());\n\
         print(Counter.bump());\n\
         print(Counter.total);",
    );

    assert_eq!(output, "1\n2\n2\n");
}

#[test]
fn non_static_members_are_gated_on_the_class() {
    let (_, message) = run_fault(
        "class Point { let x = 0; }\n\
         print(Point.x);",
    );

    assert!(message.contains("Undefined static 'x'"));
}

#[test]
fn static_writes_update_defaults_for_later_instances() {
    // the class doubles as the storage instances are seeded from
    let output = run_ok(
        "class C {\n\
             static let mode = 'old';\n\
         }\n\
         C.mode = 'new';\n\
         print(C.mode);\n\
         print(C().mode);",
    );

    assert_eq!(output, "new\nnew\n");
}
