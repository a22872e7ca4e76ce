use std::time::Duration;

use pseudokod::{
    Bindings, Error, InitialValue, Options, Printed,
    error::INTERNAL_ERROR_MESSAGE,
    execute,
    harness::{
        ErrorReport, Request, Response, TIMEOUT_MESSAGE, Worker,
        bindings::{BindingError, parse_binding, parse_value},
        format_output,
    },
};

fn request(code: &str) -> Request {
    Request { code: code.to_string(),
              ..Request::default() }
}

#[test]
fn binding_values() {
    assert_eq!(parse_value(" 2.5 "), InitialValue::Number(2.5));
    assert_eq!(parse_value("-3"), InitialValue::Number(-3.0));
    assert_eq!(parse_value("PRAWDA"), InitialValue::Bool(true));
    assert_eq!(parse_value("FAŁSZ"), InitialValue::Bool(false));
    assert_eq!(parse_value("ala"), InitialValue::Text("ala".into()));
    assert_eq!(parse_value("\"12\""), InitialValue::Text("12".into()));
    assert_eq!(parse_value("1.5.2"), InitialValue::Text("1.5.2".into()));
}

#[test]
fn binding_arrays() {
    assert_eq!(parse_value("[]"), InitialValue::Array(Vec::new()));
    assert_eq!(parse_value("[7]"), InitialValue::Array(vec![InitialValue::Number(7.0)]));
    assert_eq!(parse_value("1,10,4"),
               InitialValue::Array(vec![InitialValue::Number(1.0),
                                        InitialValue::Number(10.0),
                                        InitialValue::Number(4.0)]));
    assert_eq!(parse_value("[\"a\", FAŁSZ]"),
               InitialValue::Array(vec![InitialValue::Text("a".into()), InitialValue::Bool(false)]));
}

#[test]
fn binding_names() {
    assert_eq!(parse_binding("T=1, 2"),
               Ok(("T".to_string(),
                   InitialValue::Array(vec![InitialValue::Number(1.0), InitialValue::Number(2.0)]))));
    assert_eq!(parse_binding("napis_1 = x=y"),
               Ok(("napis_1".to_string(), InitialValue::Text("x=y".into()))));

    assert_eq!(parse_binding("n"), Err(BindingError::MissingEquals("n".into())));
    assert_eq!(parse_binding("1n=2"), Err(BindingError::InvalidName("1n".into())));
    assert_eq!(parse_binding("=2"), Err(BindingError::InvalidName(String::new())));
}

#[test]
fn parsed_bindings_run() {
    let mut bindings = Bindings::new();
    for text in ["n=3", "T=[5, 6, 7]"] {
        let (name, value) = parse_binding(text).unwrap();
        bindings.insert(name, value);
    }

    let output = execute("wypisz T[n]", &bindings, Options::default()).unwrap();
    assert_eq!(output, vec![Printed::Number(7.0)]);
}

#[test]
fn output_formatting() {
    let output = vec![Printed::Number(-0.5),
                      Printed::Text("ala".into()),
                      Printed::Array(vec![Printed::Text("b".into()),
                                          Printed::Array(Vec::new()),
                                          Printed::Number(2.0)])];

    assert_eq!(format_output(&output), "-0.5\nala\n[b, [], 2]");
    assert_eq!(format_output(&[]), "");
}

#[test]
fn large_and_tiny_numbers_use_exponents() {
    let output = vec![Printed::Number(1e23),
                      Printed::Number(-1e21),
                      Printed::Number(1e20),
                      Printed::Number(0.000_001),
                      Printed::Number(1e-7),
                      Printed::Number(2.5e-8)];

    assert_eq!(format_output(&output),
               "1e+23\n-1e+21\n100000000000000000000\n0.000001\n1e-7\n2.5e-8");
}

#[test]
fn successful_response() {
    let code = "wypisz 1\nwypisz \"a\"";
    let response = Response::from_result(code, execute(code, &Bindings::new(), Options::default()));

    assert_eq!(response,
               Response { output: Some("1\na".to_string()),
                          error:  None, });
}

#[test]
fn runtime_error_response_keeps_output() {
    let code = "wypisz 1\nwypisz\t2 + PRAWDA";
    let response = Response::from_result(code, execute(code, &Bindings::new(), Options::default()));

    assert_eq!(response.output.as_deref(), Some("1"));
    let Some(ErrorReport::Diagnostic { lines,
                                       line,
                                       column,
                                       message, }) = &response.error
    else {
        panic!("Expected a diagnostic, got {:?}", response.error);
    };
    assert_eq!(lines, &["wypisz 1", "wypisz    2 + PRAWDA"]);
    assert_eq!((*line, *column), (2, 13));
    assert!(message.starts_with("Wiersz 2, kolumna 13: Operację dodawania"));

    let report = response.error.as_ref().unwrap().to_string();
    let caret = report.lines().nth(1).unwrap();
    assert_eq!(caret, format!("{}^", " ".repeat(12)));
}

#[test]
fn error_report_points_at_column() {
    let code = "x <- 1\nwypisz y";
    let response = Response::from_result(code, execute(code, &Bindings::new(), Options::default()));

    assert_eq!(response.output.as_deref(), Some(""));
    assert_eq!(response.error.unwrap().to_string(),
               "wypisz y\n       ^\nWiersz 2, kolumna 8: Nieznana zmienna: y.");
}

#[test]
fn error_report_without_source_line() {
    let report = ErrorReport::Diagnostic { lines:   vec!["a".to_string()],
                                           line:    5,
                                           column:  1,
                                           message: "Wiersz 5, kolumna 1: coś.".to_string(), };

    assert_eq!(report.to_string(), "Wiersz 5, kolumna 1: coś.");
    assert_eq!(ErrorReport::Generic(TIMEOUT_MESSAGE.to_string()).to_string(), TIMEOUT_MESSAGE);
}

#[test]
fn internal_errors_hide_their_detail() {
    let response = Response::from_result("x", Err(Error::Internal("secret detail".into())));

    assert_eq!(response,
               Response { output: Some(String::new()),
                          error:  Some(ErrorReport::Generic(INTERNAL_ERROR_MESSAGE.to_string())), });

    let error = Error::Internal("secret detail".into());
    assert!(error.is_internal());
    assert!(!error.to_string().contains("secret detail"));
    assert_eq!(error.to_string(), INTERNAL_ERROR_MESSAGE);
    assert_eq!(error.message(), INTERNAL_ERROR_MESSAGE);
    assert_eq!((error.line(), error.column()), (None, None));
}

#[test]
fn diagnostics_expose_their_parts() {
    let error = execute("x <- 1\nwypisz y", &Bindings::new(), Options::default()).unwrap_err();

    assert!(!error.is_internal());
    assert_eq!(error.message(), "Nieznana zmienna: y.");
    assert_eq!((error.line(), error.column()), (Some(2), Some(8)));
}

#[test]
fn syntax_error_response() {
    let response = Worker::default().run(request("wypisz 1\nwypisz (2"));

    assert_eq!(response.output.as_deref(), Some(""));
    assert!(matches!(response.error, Some(ErrorReport::Diagnostic { line: 2, .. })));
}

#[test]
fn worker_runs_requests() {
    let mut request = request("wypisz s[0] + s[2]");
    request.bindings.insert("s".to_string(), InitialValue::Text("kot".into()));
    request.options = Options::zero_based();

    let response = Worker::new(Duration::from_secs(5)).run(request);

    assert_eq!(response.output.as_deref(), Some("kt"));
    assert_eq!(response.error, None);
}

#[test]
fn worker_survives_deep_recursion() {
    let response = Worker::default().run(request("funkcja f(n)\n    zwróć f(n + 1)\nf(1)"));

    let Some(ErrorReport::Diagnostic { message, .. }) = &response.error else {
        panic!("Expected a diagnostic, got {:?}", response.error);
    };
    assert!(message.ends_with("Przepełnienie stosu!"));
}

#[test]
fn worker_gives_up_on_endless_programs() {
    let worker = Worker::new(Duration::from_millis(200));
    let response = worker.run(request("i <- 0\ndopóki PRAWDA wykonuj\n    i <- i + 1"));

    assert_eq!(response,
               Response { output: None,
                          error:  Some(ErrorReport::Generic(TIMEOUT_MESSAGE.to_string())), });
}
