use std::{cell::RefCell, fs, io, io::Write, rc::Rc};

use taylorscript::{
    error::{ExecError, ParseError, RuntimeError},
    interpreter::evaluator::core::Context,
    run,
};
use walkdir::WalkDir;

/// A print sink the tests can read back after running a script.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capturing_context() -> (Context, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let context = Context::with_output(Box::new(buffer.clone()));
    (context, buffer)
}

fn run_source(source: &str) -> Result<String, ExecError> {
    let (mut context, buffer) = capturing_context();
    run(source, &mut context)?;
    let output = buffer.0.borrow().clone();
    Ok(String::from_utf8(output).expect("print output was not UTF-8"))
}

fn assert_prints(source: &str, expected: &str) {
    match run_source(source) {
        Ok(output) => assert_eq!(output, expected, "output mismatch for:\n{source}"),
        Err(e) => panic!("Script failed: {e}\n{source}"),
    }
}

fn assert_success(source: &str) {
    if let Err(e) = run_source(source) {
        panic!("Script failed: {e}\n{source}");
    }
}

fn syntax_errors(source: &str) -> Vec<ParseError> {
    match run_source(source) {
        Err(ExecError::Syntax(errors)) => errors,
        Err(ExecError::Runtime(e)) => panic!("Expected syntax errors, got runtime error: {e}"),
        Ok(_) => panic!("Script succeeded but was expected to fail:\n{source}"),
    }
}

fn runtime_error(source: &str) -> RuntimeError {
    match run_source(source) {
        Err(ExecError::Runtime(error)) => error,
        Err(ExecError::Syntax(errors)) => {
            panic!("Expected a runtime error, got syntax errors: {errors:?}")
        },
        Ok(_) => panic!("Script succeeded but was expected to fail:\n{source}"),
    }
}

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "tay"))
    {
        count += 1;
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        if let Err(e) = run_source(&source) {
            panic!("Demo script {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn arithmetic_follows_precedence() {
    assert_prints("SpeakNow[1 + 2 * 3 - 4 / 2];", "5\n");
    assert_prints("SpeakNow[(1 + 2) * 3];", "9\n");
    assert_prints("SpeakNow[2 ^ 10];", "1024\n");
    assert_prints("SpeakNow[0.5 + 0.25];", "0.75\n");
}

#[test]
fn exponent_is_right_associative_over_unary() {
    // Unary binds tighter than '^', and '^' chains to the right.
    assert_prints("SpeakNow[2 ^ 3 ^ 2];", "512\n");
    assert_prints("SpeakNow[-2 ^ 2];", "4\n");
}

#[test]
fn integer_valued_numbers_print_without_fraction() {
    assert_prints("SpeakNow[4 / 2];", "2\n");
    assert_prints("SpeakNow[3.0];", "3\n");
    assert_prints("SpeakNow[2.5];", "2.5\n");
}

#[test]
fn division_by_zero_is_an_error() {
    assert!(matches!(runtime_error("SpeakNow[1 / 0];"),
                     RuntimeError::DivisionByZero { .. }));
}

#[test]
fn string_concatenation() {
    assert_prints("SpeakNow[\"folk\" + \"lore\"];", "folklore\n");
    assert!(matches!(runtime_error("SpeakNow[\"s\" + 1];"),
                     RuntimeError::OperandsMustBeNumbersOrStrings { .. }));
}

#[test]
fn comparisons_require_numbers() {
    assert_prints("SpeakNow[2 < 3]; SpeakNow[3 <= 2];", "true\nfalse\n");
    assert!(matches!(runtime_error("SpeakNow[\"a\" < \"b\"];"),
                     RuntimeError::OperandsMustBeNumbers { .. }));
}

#[test]
fn unary_operators() {
    assert_prints("SpeakNow[-3 + 1];", "-2\n");
    assert_prints("SpeakNow[!BlankSpace];", "true\n");
    assert_prints("SpeakNow[!0];", "false\n");
    assert!(matches!(runtime_error("SpeakNow[-\"a\"];"),
                     RuntimeError::OperandMustBeNumber { .. }));
}

#[test]
fn truthiness_of_zero_empty_string_and_nil() {
    let source = r#"
        When[0] SpeakNow["zero is truthy"];
        When[""] SpeakNow["empty is truthy"];
        When[BlankSpace] SpeakNow["unreachable"];
        Thats SpeakNow["nil is falsy"];
        When[The0] SpeakNow["unreachable"];
        Thats SpeakNow["false is falsy"];
    "#;
    assert_prints(source,
                  "zero is truthy\nempty is truthy\nnil is falsy\nfalse is falsy\n");
}

#[test]
fn equality_across_types_is_false_not_an_error() {
    assert_prints("SpeakNow[BlankSpace == BlankSpace];", "true\n");
    assert_prints("SpeakNow[1 == \"1\"];", "false\n");
    assert_prints("SpeakNow[The1 == 1];", "false\n");
    assert_prints("SpeakNow[1 != 2];", "true\n");
}

#[test]
fn declaration_and_compound_assignment_round_trip() {
    assert_prints("Let x = 5; SpeakNow[x]; x += 3; SpeakNow[x];", "5\n8\n");
    assert_prints("Let x = 9; x /= 3; x *= 4; x -= 2; SpeakNow[x];", "10\n");
    // Compound assignment routes through the ordinary '+' path, so strings
    // concatenate too.
    assert_prints("Let s = \"mid\"; s += \"night\"; SpeakNow[s];",
                  "midnight\n");
}

#[test]
fn declaration_without_initializer_binds_nil() {
    assert_prints("Let x; SpeakNow[x];", "BlankSpace\n");
}

#[test]
fn assignment_to_undeclared_name_is_an_error() {
    assert!(matches!(runtime_error("z = 1;"),
                     RuntimeError::UndefinedVariable { .. }));
    assert!(matches!(runtime_error("z += 1;"),
                     RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn blocks_shadow_and_scope_their_locals() {
    let source = r#"
        Let a = "outer";
        [
            Let a = "inner";
            SpeakNow[a];
        ]
        SpeakNow[a];
    "#;
    assert_prints(source, "inner\nouter\n");

    let error = runtime_error("[ Let b = 1; ] SpeakNow[b];");
    assert!(matches!(error, RuntimeError::UndefinedVariable { ref name, .. } if name == "b"));
}

#[test]
fn assignment_reaches_enclosing_scopes() {
    let source = r#"
        Let total = 0;
        [
            total = total + 1;
            [
                total = total + 1;
            ]
        ]
        SpeakNow[total];
    "#;
    assert_prints(source, "2\n");
}

#[test]
fn logical_operators_short_circuit() {
    // The right side must not be evaluated: 'missing' is never declared.
    assert_prints("SpeakNow[The0 && missing[]];", "false\n");
    assert_prints("SpeakNow[The1 || missing[]];", "true\n");
    // The deciding operand's value comes through uncoerced.
    assert_prints("SpeakNow[1 && \"x\"];", "x\n");
    assert_prints("SpeakNow[BlankSpace || \"fallback\"];", "fallback\n");
}

#[test]
fn functions_declare_call_and_return() {
    let source = r#"
        Define add[a, b] [
            BackTo a + b;
        ]
        SpeakNow[add[2, 3]];
    "#;
    assert_prints(source, "5\n");
}

#[test]
fn wrong_argument_count_is_an_error() {
    let source = r#"
        Define add[a, b] [
            BackTo a + b;
        ]
        add[2];
    "#;
    assert!(matches!(runtime_error(source),
                     RuntimeError::ArityMismatch { expected: 2,
                                                   found: 1,
                                                   .. }));
}

#[test]
fn calling_a_non_callable_is_an_error() {
    assert!(matches!(runtime_error("Let x = 1; x[2];"),
                     RuntimeError::NotCallable { .. }));
}

#[test]
fn function_without_return_yields_nil() {
    assert_prints("Define noop[] [ ] SpeakNow[noop[]];", "BlankSpace\n");
}

#[test]
fn functions_are_first_class_and_calls_chain() {
    let source = r#"
        Define give[x] [
            BackTo x;
        ]
        Define twice[n] [
            BackTo n * 2;
        ]
        SpeakNow[give[twice][21]];
        SpeakNow[twice];
    "#;
    assert_prints(source, "42\n<fn twice>\n");
}

#[test]
fn recursion_through_the_global_scope() {
    let source = r#"
        Define fib[n] [
            When[n < 2] BackTo n;
            BackTo fib[n - 1] + fib[n - 2];
        ]
        SpeakNow[fib[10]];
    "#;
    assert_prints(source, "55\n");
}

#[test]
fn call_scopes_enclose_globals_not_the_declaration_site() {
    // A function declared inside a block runs against the global scope, so
    // it cannot read the block's locals even while the block is active.
    let source = r#"
        [
            Let local = "hidden";
            Define peek[] [
                BackTo local;
            ]
            SpeakNow[peek[]];
        ]
    "#;
    let error = runtime_error(source);
    assert!(matches!(error, RuntimeError::UndefinedVariable { ref name, .. } if name == "local"));
}

#[test]
fn return_unwinds_to_the_call_boundary_only() {
    let source = r#"
        Define pick[flag] [
            When[flag] [
                Let inner = "yes";
                BackTo inner;
            ]
            BackTo "no";
        ]
        SpeakNow[pick[The1]];
        SpeakNow[pick[The0]];
        SpeakNow["after"];
    "#;
    assert_prints(source, "yes\nno\nafter\n");
}

#[test]
fn loop_desugars_to_while() {
    assert_prints("AllTooWhile[Let x = 0; x < 3; x += 1] SpeakNow[x];",
                  "0\n1\n2\n");

    let source = r#"
        Let n = 3;
        AllTooWhile[n > 0] [
            SpeakNow[n];
            n -= 1;
        ]
    "#;
    assert_prints(source, "3\n2\n1\n");

    assert_prints("Let i = 10; AllTooWhile[; i > 8; i -= 1] SpeakNow[i];",
                  "10\n9\n");
}

#[test]
fn loop_accepts_an_assignment_initializer() {
    assert_prints("Let x; AllTooWhile[x = 0; x < 3; x += 1] SpeakNow[x];",
                  "0\n1\n2\n");
}

#[test]
fn empty_and_comment_only_sources_run_cleanly() {
    assert_success("");
    assert_success("-- nothing but a comment");
    assert_success("-* a block\n   comment *-");
}

#[test]
fn loop_with_missing_condition_defaults_to_true() {
    let source = r#"
        Define first[] [
            AllTooWhile[Let i = 0; ; i += 1] [
                When[i == 2] BackTo i;
            ]
        ]
        SpeakNow[first[]];
    "#;
    assert_prints(source, "2\n");
}

#[test]
fn elif_chain_checks_conditions_left_to_right() {
    let source = r#"
        Define classify[grade] [
            When[grade == 1] BackTo "one";
            Then[grade == 2] BackTo "two";
            Then[grade == 3] BackTo "three";
            Thats BackTo "other";
        ]
        SpeakNow[classify[2]];
        SpeakNow[classify[3]];
        SpeakNow[classify[9]];
    "#;
    assert_prints(source, "two\nthree\nother\n");
}

#[test]
fn unterminated_string_reports_and_emits_no_token() {
    let errors = syntax_errors("Let s = \"abc");
    assert!(errors.iter()
                  .any(|e| matches!(e, ParseError::UnterminatedString { .. })),
            "got {errors:?}");
}

#[test]
fn unterminated_block_comment_reports() {
    let errors = syntax_errors("Let x = 1; -* no end");
    assert!(errors.iter()
                  .any(|e| matches!(e, ParseError::UnterminatedComment { .. })),
            "got {errors:?}");
}

#[test]
fn unexpected_character_reports_and_scanning_continues() {
    let errors = syntax_errors("Let x = 1 ? 2;");
    assert!(errors.iter()
                  .any(|e| matches!(e, ParseError::UnexpectedCharacter { .. })),
            "got {errors:?}");
}

#[test]
fn parse_errors_are_reported_independently_per_statement() {
    // Two malformed statements, one valid one between them; synchronization
    // lets both errors surface in a single run.
    let source = r#"
        Let = 5;
        Let ok = 1;
        SpeakNow[ok;
    "#;
    let errors = syntax_errors(source);
    assert!(errors.len() >= 2, "got {errors:?}");
}

#[test]
fn invalid_assignment_target_does_not_abort_the_parse() {
    let errors = syntax_errors("1 = 2;");
    assert!(errors.iter()
                  .any(|e| matches!(e, ParseError::InvalidAssignmentTarget { .. })),
            "got {errors:?}");
    assert_eq!(errors.len(), 1);
}

#[test]
fn reserved_keywords_have_no_grammar() {
    assert!(!syntax_errors("Dear[1];").is_empty());
    assert!(!syntax_errors("Fear [ SpeakNow[1]; ]").is_empty());
}

#[test]
fn comment_newlines_keep_line_numbers_accurate() {
    let source = "-* multi\nline *-\nSpeakNow[oops];";
    let error = runtime_error(source);
    assert!(matches!(error, RuntimeError::UndefinedVariable { line: 3, .. }),
            "got {error:?}");
}

#[test]
fn fragment_inclusion_splices_tokens() {
    let source = r#"
        Tailor["demos/melody"]
        SpeakNow[chorus["la"]];
    "#;
    assert_prints(source, "la la\n");
}

#[test]
fn missing_fragment_reports_and_scanning_continues() {
    let errors = syntax_errors("Tailor[\"demos/nope\"] SpeakNow[1];");
    assert!(errors.iter()
                  .any(|e| matches!(e, ParseError::FragmentNotFound { .. })),
            "got {errors:?}");
    assert_eq!(errors.len(), 1, "the rest of the source should still parse");
}

#[test]
fn nested_fragment_inclusion_is_rejected() {
    let errors = syntax_errors("Tailor[\"tests/nested\"]");
    assert!(errors.iter()
                  .any(|e| matches!(e, ParseError::NestedFragment { .. })),
            "got {errors:?}");
}

#[test]
fn tailor_without_a_path_is_an_error() {
    let errors = syntax_errors("Tailor + 1;");
    assert!(errors.iter()
                  .any(|e| matches!(e, ParseError::ExpectedFragmentPath { .. })),
            "got {errors:?}");
}

#[test]
fn context_persists_across_runs_like_the_repl() {
    let (mut context, buffer) = capturing_context();

    run("Let x = 1;", &mut context).expect("declaration failed");
    run("Define bump[] [ x += 1; ]", &mut context).expect("definition failed");
    run("bump[];", &mut context).expect("call failed");

    // A failing line reports but does not reset earlier state.
    assert!(run("SpeakNow[missing];", &mut context).is_err());

    run("SpeakNow[x];", &mut context).expect("print failed");
    let output = String::from_utf8(buffer.0.borrow().clone()).expect("non-UTF-8 output");
    assert_eq!(output, "2\n");
}

#[test]
fn runtime_errors_carry_the_offending_line() {
    let error = runtime_error("Let a = 1;\nLet b = 2;\nSpeakNow[a + c];");
    assert!(matches!(error,
                     RuntimeError::UndefinedVariable { ref name, line: 3 } if name == "c"),
            "got {error:?}");
}

#[test]
fn runtime_error_stops_execution() {
    let source = r#"
        SpeakNow["before"];
        SpeakNow[1 / 0];
        SpeakNow["after"];
    "#;
    let (mut context, buffer) = capturing_context();
    assert!(run(source, &mut context).is_err());
    let output = String::from_utf8(buffer.0.borrow().clone()).expect("non-UTF-8 output");
    assert_eq!(output, "before\n");
}

#[test]
fn syntax_errors_prevent_any_evaluation() {
    let source = r#"
        SpeakNow["side effect"];
        Let = broken;
    "#;
    let (mut context, buffer) = capturing_context();
    assert!(matches!(run(source, &mut context), Err(ExecError::Syntax(_))));
    assert!(buffer.0.borrow().is_empty(),
            "nothing may print when the parse failed");
}
