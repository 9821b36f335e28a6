//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Parse errors point into the equation string the student typed, while engine errors point into
//! the rendered equation (see `EquationState::span_of` in `eqt-engine`). Either way, the spans are
//! byte ranges into a single source string, which is handed to [`ariadne`] when the report is
//! printed.

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, ops::Range};

// lets `#[derive(ErrorKind)]` expand inside this crate's own tests
extern crate self as eqt_error;

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;

    /// Returns the error as a [`std::any::Any`], so that callers can check which kind of error
    /// occurred.
    fn as_any(&self) -> &dyn std::any::Any;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Returns true if the error is of the given kind.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the error kind as the concrete type `K`, if it is of that type.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Renders the report for this error against the given source into a string.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so the
    /// report is written into a buffer instead. The output contains ANSI color codes.
    pub fn report_to_string(&self, src_id: &str, src: &str) -> String {
        let mut buf = Vec::new();
        self.build_report(src_id)
            .write((src_id, Source::from(src)), &mut buf)
            .expect("writing to a `Vec<u8>` cannot fail");
        String::from_utf8_lossy(&buf).into_owned()
    }
}
