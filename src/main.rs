use std::{fs, io, process, time::Duration};

use clap::Parser;
use pseudokod::{
    Bindings, Options,
    harness::{Request, Worker, bindings::parse_binding},
};
use tracing_subscriber::EnvFilter;

/// pseudokod runs programs written in a small pseudocode language with Polish
/// keywords.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells pseudokod to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// A starting variable as NAME=VALUE. `1, 2, 3` is an array, `PRAWDA`
    /// and `FAŁSZ` are booleans.
    #[arg(short, long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// First array index.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    array_origin: i64,

    /// First string index.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    string_origin: i64,

    /// Index both arrays and strings from 0.
    #[arg(long, conflicts_with_all = ["array_origin", "string_origin"])]
    zero_based: bool,

    /// Wall-clock budget for the program, in milliseconds.
    #[arg(short, long, default_value_t = 5000)]
    timeout_ms: u64,

    contents: String,
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr)
                             .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                                                  EnvFilter::new("warn")
                                              }))
                             .init();

    let args = Args::parse();

    let code = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Nie udało się odczytać pliku '{}'. Czy na pewno istnieje?",
                      &args.contents);
            process::exit(2);
        })
    } else {
        args.contents
    };

    let mut bindings = Bindings::new();
    for var in &args.vars {
        match parse_binding(var) {
            Ok((name, value)) => {
                bindings.insert(name, value);
            },
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            },
        }
    }

    let options = if args.zero_based {
        Options::zero_based()
    } else {
        Options { array_origin:  args.array_origin,
                  string_origin: args.string_origin, }
    };

    let request = Request { code,
                            bindings,
                            options };
    let response = Worker::new(Duration::from_millis(args.timeout_ms)).run(request);

    if let Some(output) = response.output.filter(|output| !output.is_empty()) {
        println!("{output}");
    }

    if let Some(error) = response.error {
        eprintln!("{error}");
        // Also ends an abandoned worker thread.
        process::exit(1);
    }
}
