use eqt_error::Error as SpannedError;

/// Utility enum to package errors that can occur while running a command. Each variant keeps the
/// text its spans point into.
#[derive(Debug)]
pub enum Error {
    /// The command line itself could not be understood.
    Command(SpannedError, String),

    /// Errors that occurred while parsing an equation.
    Parse(Vec<SpannedError>, String),

    /// The engine rejected a gesture or click. The spans point into the equation as it was
    /// printed before the command.
    Engine(SpannedError, String),
}

impl Error {
    /// Report the errors in this [`Error`] to stderr.
    pub fn report_to_stderr(&self) {
        let (errs, src_id, src) = match self {
            Self::Command(err, line) => (std::slice::from_ref(err), "command", line),
            Self::Parse(errs, equation) => (errs.as_slice(), "equation", equation),
            Self::Engine(err, rendered) => (std::slice::from_ref(err), "equation", rendered),
        };
        for err in errs {
            eprint!("{}", err.report_to_string(src_id, src));
        }
    }
}
