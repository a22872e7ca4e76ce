//! Property-based tests for the interpreter.
//!
//! Invariants that should hold for all inputs:
//! - Counting loops visit exactly the values between their bounds
//! - Sorting programs sort, indexing respects the configured origin
//! - Arithmetic matches IEEE 754 doubles
//! - Parsing never panics, whatever the input

use proptest::prelude::*;
use pseudokod::{
    Bindings, Error, InitialValue, Options, execute, parse, util::num::format_number,
};

fn run(src: &str, bindings: &Bindings, options: Options) -> Result<Vec<String>, Error> {
    execute(src, bindings, options).map(|output| output.iter().map(ToString::to_string).collect())
}

fn array_binding(name: &str, values: &[i32]) -> Bindings {
    let array = values.iter().map(|v| InitialValue::Number(f64::from(*v))).collect();

    let mut bindings = Bindings::new();
    bindings.insert(name.to_string(), InitialValue::Array(array));
    bindings
}

fn array_text(values: &[i32]) -> String {
    let items = values.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!("[{}]", items.join(", "))
}

/// Property: `dla` visits `start, start + step, ...` up to and including the
/// bound, in the direction of the step.
mod loop_properties {
    use super::*;

    proptest! {
        #[test]
        fn counting_loops_visit_every_step(
            start in -20i32..20,
            step in prop_oneof![-5i32..=-1, 1i32..=5],
            end in -40i32..40
        ) {
            let src = format!("dla i = {start}, {}, ..., {end} wykonuj\n    wypisz i", start + step);

            let mut expected = Vec::new();
            let mut i = start;
            while (step > 0 && i <= end) || (step < 0 && i >= end) {
                expected.push(i.to_string());
                i += step;
            }

            prop_assert_eq!(run(&src, &Bindings::new(), Options::default()).unwrap(), expected);
        }

        #[test]
        fn zero_step_loops_never_run(start in -20i32..20, end in -40i32..40) {
            let src = format!("dla i = {start}, {start}, ..., {end} wykonuj\n    wypisz i");

            prop_assert!(run(&src, &Bindings::new(), Options::default()).unwrap().is_empty());
        }
    }
}

/// Property: programs over arrays behave like the same algorithm in Rust.
mod array_properties {
    use super::*;

    const BUBBLE_SORT: &str = "n <- dl(T)
dla i = 1, 2, ..., n - 1 wykonuj
    dla j = 1, 2, ..., n - i wykonuj
        jeżeli T[j] > T[j + 1] to
            temp <- T[j]
            T[j] <- T[j + 1]
            T[j + 1] <- temp
wypisz T";

    proptest! {
        #[test]
        fn bubble_sort_sorts(values in prop::collection::vec(-100i32..100, 1..12)) {
            let mut sorted = values.clone();
            sorted.sort_unstable();

            let output = run(BUBBLE_SORT, &array_binding("T", &values), Options::default()).unwrap();

            prop_assert_eq!(output, vec![array_text(&sorted)]);
        }

        #[test]
        fn indexing_respects_origin(
            values in prop::collection::vec(0i32..1000, 1..10),
            origin in -3i64..3
        ) {
            let bindings = array_binding("T", &values);
            let options = Options { array_origin: origin,
                                    string_origin: origin };
            #[allow(clippy::cast_possible_wrap)]
            let last = origin + values.len() as i64 - 1;

            let first_and_last = run(&format!("wypisz T[{origin}]\nwypisz T[{last}]"), &bindings, options).unwrap();
            prop_assert_eq!(first_and_last,
                            vec![values[0].to_string(), values[values.len() - 1].to_string()]);

            for outside in [origin - 1, last + 1] {
                let result = run(&format!("wypisz T[{outside}]"), &bindings, options);
                prop_assert!(matches!(result, Err(Error::Runtime(_))), "T[{}] should be out of range", outside);
            }
        }

        #[test]
        fn appending_grows_arrays(values in prop::collection::vec(-50i32..50, 0..10)) {
            let mut src = String::new();
            for (i, value) in values.iter().enumerate() {
                src.push_str(&format!("T[{}] <- {value}\n", i + 1));
            }
            src.push_str("T[dl(T) + 1] <- 0\nwypisz dl(T)");

            let output = run(&src, &Bindings::new(), Options::default()).unwrap();

            prop_assert_eq!(output, vec![(values.len() + 1).to_string()]);
        }
    }
}

/// Property: arithmetic on integers agrees with the same operations on
/// `f64`, and logic never evaluates what it can skip.
mod expression_properties {
    use super::*;

    proptest! {
        #[test]
        fn arithmetic_matches_doubles(a in -1000i32..1000, b in -1000i32..1000) {
            let (x, y) = (f64::from(a), f64::from(b));
            let src = format!("wypisz {a} + {b} * {b}\nwypisz {a} - {b}\nwypisz {a} / {b}");

            let output = run(&src, &Bindings::new(), Options::default()).unwrap();

            prop_assert_eq!(output,
                            vec![format_number(x + y * y),
                                 format_number(x - y),
                                 format_number(x / y)]);
        }

        #[test]
        fn integer_division_floors(a in -1000i32..1000, b in prop_oneof![-50i32..=-1, 1i32..50]) {
            let (x, y) = (f64::from(a), f64::from(b));
            let src = format!("wypisz {a} div {b}\nwypisz {a} mod {b}");

            let output = run(&src, &Bindings::new(), Options::default()).unwrap();

            prop_assert_eq!(output, vec![format_number((x / y).floor()), format_number(x % y)]);
        }

        #[test]
        fn logic_short_circuits(left: bool) {
            let literal = if left { "PRAWDA" } else { "FAŁSZ" };

            let or = run(&format!("wypisz {literal} lub brak"), &Bindings::new(), Options::default());
            prop_assert_eq!(or.is_ok(), left);

            let and = run(&format!("wypisz {literal} oraz brak"), &Bindings::new(), Options::default());
            prop_assert_eq!(and.is_ok(), !left);
        }
    }
}

/// Property: the parser rejects or accepts, but never panics.
mod parser_properties {
    use super::*;

    const VOCABULARY: &[&str] = &["x", "T", "f", "1", "2.5", "\"a\"", "PRAWDA", "(", ")", "[", "]", ",",
                                  "...", "<-", "=", "+", "-", "*", "div", "<", "==", "nie", "oraz",
                                  "dla", "dopóki", "jeżeli", "to", "w przeciwnym razie", "wykonuj",
                                  "wypisz", "funkcja", "zwróć", "\n", "\n    ", "    ", "#"];

    proptest! {
        #[test]
        fn parsing_never_panics(words in prop::collection::vec(prop::sample::select(VOCABULARY), 0..30)) {
            let src = words.join(" ");
            let _ = parse(&src);
        }

        #[test]
        fn parsing_arbitrary_text_never_panics(src in "\\PC{0,60}") {
            let _ = parse(&src);
        }
    }
}
