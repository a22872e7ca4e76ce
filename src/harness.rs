/// Parsing of starting bindings typed in as text.
pub mod bindings;

use std::{
    fmt,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

use tracing::{error, warn};

use crate::{
    Bindings, Error, Options, Printed, STACK_SIZE,
    error::INTERNAL_ERROR_MESSAGE,
    interpreter::lexer::source_lines,
    run_program,
};

/// Wall-clock budget used when the host does not choose one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Reported when a program outlives its budget.
pub const TIMEOUT_MESSAGE: &str = "Program wykonywał się zbyt długo.";

/// One program to run.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Program text.
    pub code:     String,
    /// Starting bindings.
    pub bindings: Bindings,
    /// Array and string origins.
    pub options:  Options,
}

/// The outcome of a request, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Printed output, one item per line. `None` when the run was abandoned.
    pub output: Option<String>,
    /// What went wrong, if anything.
    pub error:  Option<ErrorReport>,
}

/// A failure as the host displays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorReport {
    /// A syntax or runtime error with its location.
    Diagnostic {
        /// Source lines, with the first tab of each expanded like the lexer
        /// does, so that columns line up.
        lines:   Vec<String>,
        /// 1-based line.
        line:    usize,
        /// 1-based column.
        column:  usize,
        /// The full message, position prefix included.
        message: String,
    },
    /// A failure without a location: internal errors and timeouts.
    Generic(String),
}

impl fmt::Display for ErrorReport {
    /// Renders the offending source line, a caret under the column and the
    /// message. Falls back to the bare message when the line does not exist.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic(message) => f.write_str(message),
            Self::Diagnostic { lines,
                               line,
                               column,
                               message, } => match line.checked_sub(1).and_then(|i| lines.get(i)) {
                Some(source) => {
                    let pointer = " ".repeat(column.saturating_sub(1));
                    write!(f, "{source}\n{pointer}^\n{message}")
                },
                None => f.write_str(message),
            },
        }
    }
}

/// Joins printed items into display text, one item per line.
///
/// # Example
/// ```
/// use pseudokod::{Printed, harness::format_output};
///
/// let output = vec![Printed::Text("PRAWDA".into()),
///                   Printed::Array(vec![Printed::Number(1.5), Printed::Bool(false)])];
/// assert_eq!(format_output(&output), "PRAWDA\n[1.5, FAŁSZ]");
/// ```
#[must_use]
pub fn format_output(output: &[Printed]) -> String {
    output.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

impl Response {
    /// Builds the response for a finished run of `code`.
    #[must_use]
    pub fn from_result(code: &str, result: Result<Vec<Printed>, Error>) -> Self {
        match result {
            Ok(output) => Self { output: Some(format_output(&output)),
                                 error:  None, },
            Err(Error::Internal(_)) => Self::generic(Some(String::new()), INTERNAL_ERROR_MESSAGE),
            Err(error) => {
                let output = match &error {
                    Error::Runtime(runtime) => format_output(&runtime.output),
                    _ => String::new(),
                };

                Self { output: Some(output),
                       error:  Some(ErrorReport::Diagnostic { lines:   source_lines(code),
                                                              line:    error.line().unwrap_or(0),
                                                              column:  error.column().unwrap_or(0),
                                                              message: error.to_string(), }), }
            },
        }
    }

    fn generic(output: Option<String>, message: &str) -> Self {
        Self { output,
               error: Some(ErrorReport::Generic(message.to_string())) }
    }
}

/// Runs programs on throwaway threads under a wall-clock budget.
///
/// The interpreter has no notion of cancellation. Each request therefore
/// gets a fresh detached thread, and when the budget runs out the worker
/// stops waiting and abandons it. Nothing the abandoned thread computes is
/// reported. A long-lived host should exit or otherwise reclaim such threads.
#[derive(Debug, Clone, Copy)]
pub struct Worker {
    timeout: Duration,
}

impl Default for Worker {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Worker {
    /// Creates a worker with the given budget per request.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Runs one request and waits for it at most the configured budget.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    ///
    /// use pseudokod::harness::{Request, Worker};
    ///
    /// let request = Request { code: "wypisz \"ala\" + \" ma kota\"".to_string(),
    ///                         ..Request::default() };
    /// let response = Worker::new(Duration::from_secs(5)).run(request);
    ///
    /// assert_eq!(response.output.as_deref(), Some("ala ma kota"));
    /// assert!(response.error.is_none());
    /// ```
    #[must_use]
    pub fn run(&self, request: Request) -> Response {
        let (sender, receiver) = mpsc::channel();

        let spawned = thread::Builder::new().name("pseudokod-worker".to_string())
                                            .stack_size(STACK_SIZE)
                                            .spawn(move || {
                                                let result = run_program(&request.code,
                                                                         &request.bindings,
                                                                         request.options);
                                                let response =
                                                    Response::from_result(&request.code, result);
                                                // The receiver is gone if the run timed out.
                                                let _ = sender.send(response);
                                            });

        if let Err(e) = spawned {
            error!(error = %e, "cannot spawn worker thread");
            return Response::generic(Some(String::new()), INTERNAL_ERROR_MESSAGE);
        }

        match receiver.recv_timeout(self.timeout) {
            Ok(response) => response,
            Err(RecvTimeoutError::Timeout) => {
                warn!(timeout_ms = self.timeout.as_millis(), "program exceeded its time budget");
                Response::generic(None, TIMEOUT_MESSAGE)
            },
            Err(RecvTimeoutError::Disconnected) => {
                error!("worker thread ended without a response");
                Response::generic(Some(String::new()), INTERNAL_ERROR_MESSAGE)
            },
        }
    }
}
