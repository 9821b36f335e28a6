//! A solving session: one equation, the steps taken on it, and the options the rules run with.

use crate::{
    gesture::{Click, Gesture},
    options::EngineOptions,
    rules,
    state::EquationState,
    step::{Step, StepRecorder, StepSink},
    term::{Term, TermKind},
};
use eqt_error::Error;
use tracing::debug;

/// The outcome of a gesture or click that was accepted by a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Whether the equation changed.
    pub changed: bool,

    /// The identity of the step recorded for the change, if one was recorded.
    pub step: Option<u32>,

    /// For a move across the equals sign, the term as it was before the move.
    pub moved: Option<Term>,
}

impl Applied {
    fn unchanged() -> Self {
        Self { changed: false, step: None, moved: None }
    }
}

/// Owns the current [`EquationState`] and routes gestures and clicks to the transformation
/// rules.
///
/// Every accepted transformation replaces the state and records a step. A rejected one returns an
/// error and leaves both the state and the steps untouched, so the presentation can report the
/// error and carry on.
#[derive(Debug, Clone)]
pub struct Session {
    state: EquationState,
    recorder: StepRecorder,
    options: EngineOptions,
}

impl Session {
    /// Starts a session on the given equation, with the default options.
    pub fn new(equation: &str) -> Result<Self, Vec<Error>> {
        Self::with_options(equation, EngineOptions::default())
    }

    /// Starts a session on the given equation.
    pub fn with_options(equation: &str, options: EngineOptions) -> Result<Self, Vec<Error>> {
        let state = EquationState::parse(equation)?;
        debug!(equation = %state, ?options, "session started");
        Ok(Self {
            recorder: StepRecorder::new(state.render()),
            state,
            options,
        })
    }

    /// Replaces the equation being solved and starts a new step list.
    ///
    /// If the equation cannot be parsed, the session keeps its current equation and steps.
    pub fn load(&mut self, equation: &str) -> Result<(), Vec<Error>> {
        let state = match EquationState::parse(equation) {
            Ok(state) => state,
            Err(errs) => {
                debug!(equation, errors = errs.len(), "kept previous equation");
                return Err(errs);
            },
        };
        debug!(equation = %state, "loaded equation");
        self.recorder = StepRecorder::new(state.render());
        self.state = state;
        Ok(())
    }

    /// Applies a finished drag.
    pub fn drag(&mut self, gesture: &Gesture) -> Result<Applied, Error> {
        let moved = rules::move_across(&self.state, gesture, &self.options)
            .inspect_err(|err| debug!(?gesture, error = ?err.kind, "rejected drag"))?;

        match moved {
            Some(moved) => {
                let mut applied = self.commit(moved.state);
                applied.moved = Some(moved.term);
                Ok(applied)
            },
            None => {
                debug!(?gesture, "drag left the equation unchanged");
                Ok(Applied::unchanged())
            },
        }
    }

    /// Applies a click. Clicking an operator resolves it; clicking a coefficient-variable product
    /// expands it.
    pub fn click(&mut self, click: &Click) -> Result<Applied, Error> {
        let kind = self.state.find(click.side, click.term_id).map(|(_, term)| term.kind);
        let next = match kind {
            Some(TermKind::Operator) => rules::resolve(&self.state, click, &self.options),
            _ => rules::expand(&self.state, click),
        }.inspect_err(|err| debug!(?click, error = ?err.kind, "rejected click"))?;

        Ok(self.commit(next))
    }

    /// Swaps in the new state and records a step for it.
    fn commit(&mut self, next: EquationState) -> Applied {
        let changed = next != self.state;
        let step = self.recorder.record(next.render());
        debug!(from = %self.state, to = %next, ?step, "committed transition");
        self.state = next;
        Applied { changed, step, moved: None }
    }

    /// Flips the completion of a step. Returns the new completion, or [`None`] if there is no
    /// such step.
    pub fn toggle_step(&mut self, id: u32) -> Option<bool> {
        self.recorder.toggle(id)
    }

    /// Returns the steps taken so far, starting with the equation as it was loaded.
    pub fn steps(&self) -> &[Step] {
        self.recorder.steps()
    }

    /// Hands the description of every step, oldest first, to the given sink.
    pub fn write_steps(&self, sink: &mut impl StepSink) {
        for step in self.recorder.steps() {
            sink.push(step.description.clone());
        }
    }

    /// Returns the current equation.
    pub fn state(&self) -> &EquationState {
        &self.state
    }

    /// Renders the current equation.
    pub fn render(&self) -> String {
        self.state.render()
    }

    /// Returns the options the rules run with.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Returns true if the current equation is solved.
    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }
}
