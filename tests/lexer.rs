use pseudokod::interpreter::lexer::{Keyword, Lexer, Operator, Position, Side, TokenKind};

fn kinds(src: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(src);
    let mut kinds = Vec::new();

    while let Some(token) = lexer.next_token()
                                 .unwrap_or_else(|e| panic!("Lexing failed:\n{src}\nError: {e}"))
    {
        kinds.push(token.kind);
    }
    kinds
}

fn positions(src: &str) -> Vec<Position> {
    let mut lexer = Lexer::new(src);
    let mut positions = Vec::new();

    while let Some(token) = lexer.next_token().unwrap() {
        positions.push(token.position);
    }
    positions
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

#[test]
fn assignment_and_indented_print() {
    assert_eq!(kinds("x <- 1\n    wypisz x"),
               vec![ident("x"),
                    TokenKind::Keyword(Keyword::Assign),
                    TokenKind::Number(1.0),
                    TokenKind::NewLine,
                    TokenKind::Indentation,
                    TokenKind::Keyword(Keyword::Print),
                    ident("x")]);
}

#[test]
fn for_loop_header() {
    assert_eq!(kinds("dla i = 1, 2, ..., n wykonuj"),
               vec![TokenKind::Keyword(Keyword::For),
                    ident("i"),
                    TokenKind::Keyword(Keyword::Equals),
                    TokenKind::Number(1.0),
                    TokenKind::Comma,
                    TokenKind::Number(2.0),
                    TokenKind::Comma,
                    TokenKind::Ellipsis,
                    TokenKind::Comma,
                    ident("n"),
                    TokenKind::Keyword(Keyword::Do)]);
}

#[test]
fn operators() {
    assert_eq!(kinds("a <= b != c div 2 mod 3"),
               vec![ident("a"),
                    TokenKind::Operator(Operator::LessEqual),
                    ident("b"),
                    TokenKind::Operator(Operator::NotEqual),
                    ident("c"),
                    TokenKind::Operator(Operator::IntDiv),
                    TokenKind::Number(2.0),
                    TokenKind::Operator(Operator::Mod),
                    TokenKind::Number(3.0)]);

    assert_eq!(kinds("nie a oraz b lub c"),
               vec![TokenKind::Operator(Operator::Not),
                    ident("a"),
                    TokenKind::Operator(Operator::And),
                    ident("b"),
                    TokenKind::Operator(Operator::Or),
                    ident("c")]);

    assert_eq!(kinds("x<-1"),
               vec![ident("x"), TokenKind::Keyword(Keyword::Assign), TokenKind::Number(1.0)]);
}

#[test]
fn literals() {
    assert_eq!(kinds("PRAWDA FAŁSZ \"ala ma kota\" 2.5"),
               vec![TokenKind::Bool(true),
                    TokenKind::Bool(false),
                    TokenKind::Text("ala ma kota".to_string()),
                    TokenKind::Number(2.5)]);
}

#[test]
fn strings_keep_everything_between_quotes() {
    assert_eq!(kinds("\"# nie komentarz, <- \""),
               vec![TokenKind::Text("# nie komentarz, <- ".to_string())]);
}

#[test]
fn else_is_one_keyword() {
    assert_eq!(kinds("w przeciwnym razie"), vec![TokenKind::Keyword(Keyword::Else)]);
}

#[test]
fn keyword_prefixes_are_identifiers() {
    assert_eq!(kinds("dlaczego todo niebo dl"),
               vec![ident("dlaczego"), ident("todo"), ident("niebo"), ident("dl")]);
}

#[test]
fn delimiters() {
    assert_eq!(kinds("f(T[1])"),
               vec![ident("f"),
                    TokenKind::Parenthesis(Side::Open),
                    ident("T"),
                    TokenKind::Bracket(Side::Open),
                    TokenKind::Number(1.0),
                    TokenKind::Bracket(Side::Close),
                    TokenKind::Parenthesis(Side::Close)]);
}

#[test]
fn blank_and_comment_lines_collapse_into_one_newline() {
    let src = "a\n\n# komentarz\n\nb";

    assert_eq!(kinds(src), vec![ident("a"), TokenKind::NewLine, ident("b")]);
    assert_eq!(positions(src)[1], Position::new(4, 0));
}

#[test]
fn indentation_counts_runs_of_four_spaces() {
    assert_eq!(kinds("x\n        y"),
               vec![ident("x"),
                    TokenKind::NewLine,
                    TokenKind::Indentation,
                    TokenKind::Indentation,
                    ident("y")]);
    assert_eq!(kinds("x\n     y"),
               vec![ident("x"), TokenKind::NewLine, TokenKind::Indentation, ident("y")]);
    assert_eq!(kinds("x\n  y"), vec![ident("x"), TokenKind::NewLine, ident("y")]);
}

#[test]
fn spaces_inside_a_line_are_not_indentation() {
    assert_eq!(kinds("a        b"), vec![ident("a"), ident("b")]);
}

#[test]
fn first_tab_is_one_indentation_level() {
    assert_eq!(kinds("x\n\ty"),
               vec![ident("x"), TokenKind::NewLine, TokenKind::Indentation, ident("y")]);
}

#[test]
fn columns_count_characters() {
    assert_eq!(positions("\"żółw\" + x"),
               vec![Position::new(0, 0), Position::new(0, 7), Position::new(0, 9)]);
}

#[test]
fn unterminated_string_at_end_of_input() {
    let error = Lexer::new("\"abc").next_token().unwrap_err();

    assert_eq!(error.message, "Nieoczekiwany koniec wejścia. Oczekiwano zamknięcia napisu.");
    assert_eq!(error.position, Position::new(0, 4));
}

#[test]
fn unterminated_string_at_end_of_line() {
    let error = Lexer::new("\"abc\nx").next_token().unwrap_err();

    assert_eq!(error.message, "Nieoczekiwany koniec linii. Oczekiwano zamknięcia napisu.");
}

#[test]
fn polish_letters_in_names_are_rejected() {
    let mut lexer = Lexer::new("x <- żółw");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();

    let error = lexer.next_token().unwrap_err();
    assert!(error.message.contains("Nie używaj polskich znaków"), "{}", error.message);
    assert_eq!(error.position, Position::new(0, 5));
}

#[test]
fn numbers_must_not_run_into_letters() {
    assert!(Lexer::new("1abc").next_token().is_err());
}

#[test]
fn empty_source_has_no_tokens() {
    assert!(kinds("").is_empty());
    assert!(!Lexer::new("").has_more_tokens());
}

#[test]
fn set_back_rereads_tokens() {
    let mut lexer = Lexer::new("a b");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();

    lexer.set_back(Position::new(0, 0), false);
    let token = lexer.next_token().unwrap().unwrap();

    assert_eq!(token.kind, ident("a"));
}

#[test]
fn set_back_with_newline_reemits_it() {
    let mut lexer = Lexer::new("a\nb");
    lexer.next_token().unwrap();
    let newline = lexer.next_token().unwrap().unwrap();
    assert_eq!(newline.kind, TokenKind::NewLine);
    lexer.next_token().unwrap();

    lexer.set_back(newline.position, true);
    let again = lexer.next_token().unwrap().unwrap();

    assert_eq!(again, newline);
}
