//! Equation state engine for a drag-and-drop algebra tutor.
//!
//! An equation is held as an [`EquationState`]: two sides, each an ordered sequence of
//! [`Term`]s (numbers, variables and operators). The student changes it in two ways:
//!
//! - dragging a number or variable across the equals sign, which removes it from its side and
//!   applies the inverse operation to the other side (see [`rules::move_across`]),
//! - clicking an operator, which combines it and its two neighbours into the computed result (see
//!   [`rules::resolve`]).
//!
//! A [`Session`] ties these together and records a [`Step`] for every transformation.
//!
//! ```
//! use eqt_engine::{Click, Gesture, Session};
//!
//! let mut session = Session::new("2x + 3 = 5").unwrap();
//!
//! let three = session.state().left()[2].clone();
//! session.drag(&Gesture::for_term(&three, true)).unwrap();
//! assert_eq!(session.render(), "2x = 5 - 3");
//!
//! let minus = session.state().right()[1].clone();
//! session.click(&Click::on(&minus)).unwrap();
//! assert_eq!(session.render(), "2x = 2");
//! assert_eq!(session.steps().len(), 3);
//! ```

pub mod arith;
pub mod error;
pub mod gesture;
pub mod options;
pub mod rules;
pub mod session;
pub mod state;
pub mod step;
pub mod term;

pub use gesture::{BoundaryProvider, Click, Gesture};
pub use options::{EngineOptions, EngineOptionsBuilder};
pub use session::{Applied, Session};
pub use state::EquationState;
pub use step::{Step, StepRecorder, StepSink};
pub use term::{Role, Side, Term, TermId, TermKind};
