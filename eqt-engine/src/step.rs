//! The list of steps taken while solving an equation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One entry of the step list: the equation as it was rendered right after a transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// The identity of the step, one greater than the step before it.
    pub id: u32,

    /// The rendered equation.
    pub description: String,

    /// Whether the student has checked off this step.
    pub completed: bool,
}

/// A type that receives the descriptions of the steps taken while solving an equation.
///
/// [`StepSink`] is also implemented for the unit type `()`, which discards every step, and for
/// `Vec<String>`, which keeps the descriptions in order.
pub trait StepSink {
    /// Adds a step description to the sink.
    fn push(&mut self, description: String);
}

impl StepSink for () {
    #[inline]
    fn push(&mut self, _: String) {}
}

impl StepSink for Vec<String> {
    #[inline]
    fn push(&mut self, description: String) {
        self.push(description);
    }
}

/// Records a [`Step`] for every transformation that changes the equation.
///
/// The list only grows: steps are never removed or reordered. A description equal to that of the
/// last step is not recorded again, so a gesture that leaves the equation unchanged never shows
/// up in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepRecorder {
    steps: Vec<Step>,
}

impl StepRecorder {
    /// Creates a recorder seeded with the initial rendering of the equation. The seed step is
    /// already completed.
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            steps: vec![Step {
                id: 1,
                description: seed.into(),
                completed: true,
            }],
        }
    }

    /// Appends a step with the given description, returning its identity. Returns [`None`] if the
    /// description is the same as the last step's.
    pub fn record(&mut self, description: impl Into<String>) -> Option<u32> {
        let description = description.into();
        if self.last().is_some_and(|last| last.description == description) {
            return None;
        }

        let id = self.steps.iter().map(|step| step.id).max().map_or(1, |max| max + 1);
        self.steps.push(Step {
            id,
            description,
            completed: false,
        });
        Some(id)
    }

    /// Flips the completion of the step with the given identity. Returns the new completion, or
    /// [`None`] if there is no such step.
    pub fn toggle(&mut self, id: u32) -> Option<bool> {
        let step = self.steps.iter_mut().find(|step| step.id == id)?;
        step.completed = !step.completed;
        Some(step.completed)
    }

    /// Returns the recorded steps, oldest first.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the most recent step.
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }
}

impl StepSink for StepRecorder {
    fn push(&mut self, description: String) {
        self.record(description);
    }
}
