use pseudokod::{
    ast::{BinaryOperator, Expr, Literal, Program, Statement, Target, UnaryOperator},
    interpreter::lexer::Position,
    parse,
};

fn parse_ok(src: &str) -> Program {
    parse(src).unwrap_or_else(|e| panic!("Parsing failed:\n{src}\nError: {e}"))
}

fn printed_expr(src: &str) -> Expr {
    match parse_ok(src).body.remove(0) {
        Statement::Print { value, .. } => value,
        other => panic!("Expected a print statement, got {other:?}"),
    }
}

fn assert_parse_error(src: &str, message: &str) {
    match parse(src) {
        Ok(program) => panic!("Expected a syntax error for:\n{src}\nGot: {program:?}"),
        Err(e) => assert_eq!(e.message, message, "Program:\n{src}"),
    }
}

fn number(expr: &Expr) -> f64 {
    match expr {
        Expr::Literal { value: Literal::Number(n),
                        .. } => *n,
        other => panic!("Expected a number literal, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let Expr::Binary { left, op, right, .. } = printed_expr("wypisz 1 + 2 * 3") else {
        panic!("Expected a binary expression");
    };

    assert_eq!(op, BinaryOperator::Add);
    assert!((number(&left) - 1.0).abs() < f64::EPSILON);
    assert!(matches!(*right,
                     Expr::Binary { op: BinaryOperator::Mul,
                                    .. }));
}

#[test]
fn parentheses_group() {
    let Expr::Binary { left, op, .. } = printed_expr("wypisz (1 + 2) * 3") else {
        panic!("Expected a binary expression");
    };

    assert_eq!(op, BinaryOperator::Mul);
    assert!(matches!(*left,
                     Expr::Binary { op: BinaryOperator::Add,
                                    .. }));
}

#[test]
fn binary_operators_are_left_associative() {
    let Expr::Binary { left, op, right, .. } = printed_expr("wypisz 10 - 2 - 3") else {
        panic!("Expected a binary expression");
    };

    assert_eq!(op, BinaryOperator::Sub);
    assert!(matches!(*left,
                     Expr::Binary { op: BinaryOperator::Sub,
                                    .. }));
    assert!((number(&right) - 3.0).abs() < f64::EPSILON);
}

#[test]
fn logical_tiers() {
    let Expr::Binary { left, op, .. } = printed_expr("wypisz nie a oraz b lub c") else {
        panic!("Expected a binary expression");
    };

    assert_eq!(op, BinaryOperator::Or);
    let Expr::Binary { left, op, .. } = *left else {
        panic!("Expected a conjunction");
    };
    assert_eq!(op, BinaryOperator::And);
    assert!(matches!(*left,
                     Expr::Unary { op: UnaryOperator::Not,
                                   .. }));
}

#[test]
fn not_applies_to_whole_comparison() {
    let Expr::Unary { op, operand, .. } = printed_expr("wypisz nie a < b") else {
        panic!("Expected a unary expression");
    };

    assert_eq!(op, UnaryOperator::Not);
    assert!(matches!(*operand,
                     Expr::Binary { op: BinaryOperator::Less,
                                    .. }));
}

#[test]
fn minus_folds_into_number_literals() {
    let expr = printed_expr("wypisz -5");

    assert!((number(&expr) + 5.0).abs() < f64::EPSILON);
    assert_eq!(expr.position(), Position::new(0, 7));
}

#[test]
fn minus_before_other_operands_negates() {
    assert!(matches!(printed_expr("wypisz -x"),
                     Expr::Unary { op: UnaryOperator::Negate,
                                   .. }));

    let Expr::Binary { op, right, .. } = printed_expr("wypisz 2 - -3") else {
        panic!("Expected a binary expression");
    };
    assert_eq!(op, BinaryOperator::Sub);
    assert!((number(&right) + 3.0).abs() < f64::EPSILON);
}

#[test]
fn indexing() {
    let Expr::Index { target, index, position } = printed_expr("wypisz T[i + 1]") else {
        panic!("Expected an index expression");
    };

    assert_eq!(position, Position::new(0, 8));
    assert_eq!(target.subject(), "T");
    assert!(matches!(*index,
                     Expr::Binary { op: BinaryOperator::Add,
                                    .. }));
}

#[test]
fn calls() {
    let Expr::Call(call) = printed_expr("wypisz f(1, g(2))") else {
        panic!("Expected a call");
    };

    assert_eq!(call.callee.name, "f");
    assert_eq!(call.position, Position::new(0, 8));
    assert_eq!(call.arguments.len(), 2);
    assert!(matches!(&call.arguments[1], Expr::Call(inner) if inner.callee.name == "g"));
}

#[test]
fn call_arguments_may_hold_parentheses() {
    let Expr::Call(call) = printed_expr("wypisz f((1 + 2) * 3)") else {
        panic!("Expected a call");
    };

    assert_eq!(call.arguments.len(), 1);
    assert!(matches!(&call.arguments[0],
                     Expr::Binary { op: BinaryOperator::Mul,
                                    .. }));
}

#[test]
fn call_without_arguments() {
    let program = parse_ok("f()");

    assert!(matches!(&program.body[0], Statement::Call(call) if call.arguments.is_empty()));
}

#[test]
fn element_assignment() {
    let program = parse_ok("T[2] <- 1");

    let Statement::Assignment { target: Target::Element { array, index },
                                .. } = &program.body[0]
    else {
        panic!("Expected an element assignment");
    };
    assert_eq!(array.name, "T");
    assert!((number(index) - 2.0).abs() < f64::EPSILON);
}

#[test]
fn for_loop() {
    let program = parse_ok("dla i = 1, 2, ..., n - 1 wykonuj\n    wypisz i");

    let Statement::For { variable,
                         start,
                         end,
                         body,
                         position,
                         .. } = &program.body[0]
    else {
        panic!("Expected a for loop");
    };
    assert_eq!(variable.name, "i");
    assert!((number(start) - 1.0).abs() < f64::EPSILON);
    assert!(matches!(end,
                     Expr::Binary { op: BinaryOperator::Sub,
                                    .. }));
    assert_eq!(body.statements.len(), 1);
    assert_eq!(*position, Position::new(0, 0));
}

#[test]
fn if_with_else() {
    let program = parse_ok("jeżeli a to\n    wypisz 1\n    wypisz 2\nw przeciwnym razie\n    wypisz 3");

    let Statement::If { then_branch,
                        else_branch: Some(else_branch),
                        .. } = &program.body[0]
    else {
        panic!("Expected an if with an else branch");
    };
    assert_eq!(then_branch.statements.len(), 2);
    assert_eq!(else_branch.statements.len(), 1);
    assert_eq!(program.body.len(), 1);
}

#[test]
fn blocks_close_on_dedent() {
    let src = "dopóki a wykonuj
    jeżeli b to
        wypisz 1
    wypisz 2
wypisz 3";
    let program = parse_ok(src);

    assert_eq!(program.body.len(), 2);
    let Statement::While { body, .. } = &program.body[0] else {
        panic!("Expected a while loop");
    };
    assert_eq!(body.statements.len(), 2);
}

#[test]
fn function_definition() {
    let program = parse_ok("funkcja suma(a, b)\n    zwróć a + b\nwypisz suma(1, 2)");

    let Statement::Function(def) = &program.body[0] else {
        panic!("Expected a function definition");
    };
    assert_eq!(def.name.name, "suma");
    assert_eq!(def.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), ["a", "b"]);
    assert!(matches!(def.body.statements[0], Statement::Return { value: Some(_), .. }));
}

#[test]
fn bare_return() {
    let program = parse_ok("funkcja f()\n    zwróć\nf()");

    let Statement::Function(def) = &program.body[0] else {
        panic!("Expected a function definition");
    };
    assert!(matches!(def.body.statements[0], Statement::Return { value: None, .. }));
}

#[test]
fn errors() {
    assert_parse_error("wypisz ()", "Oczekiwano wyrażenia, znaleziono: nawias okrągły.");
    assert_parse_error("dla i = 1, 2 wykonuj\n    wypisz i",
                       "Nieoczekiwany token: słowo kluczowe, oczekiwano: przecinek.");
    assert_parse_error("wypisz", "Nieoczekiwany koniec wejścia, oczekiwano: wyrażenie.");
    assert_parse_error("wypisz 1 2", "Nieoczekiwane wyrażenie.");
    assert_parse_error("funkcja f()\n    wypisz 1\nzwróć 2", "Słowo kluczowe ZWRÓĆ poza funkcją.");
    assert_parse_error("jeżeli a to\n    wypisz 1\n        wypisz 2", "Nieoczekiwane wcięcie.");
}

#[test]
fn error_positions() {
    let error = parse("wypisz 1 +\nwypisz 2").unwrap_err();

    assert_eq!(error.position, Position::new(0, 9));
    assert_eq!(error.to_string(), "Wiersz 1, kolumna 10: Brak operandu dla operatora +.");
}
