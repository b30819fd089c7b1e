//! Multi-step wizard state container.
//!
//! `Stepper<V>` owns the current step index and the aggregate value built up
//! across steps. Navigation may run a caller-supplied async transition that
//! validates the step being left and returns the next aggregate; the stepper
//! commits index and value together only when that transition succeeds. It is
//! deliberately UI-agnostic: views read snapshots through the accessors and
//! decide for themselves what each step renders.

use std::future::Future;

pub mod error;

pub use error::{FieldError, ValidationError};

#[cfg(test)]
mod tests;

/// What `retreat_with` does with its transition's outcome.
///
/// Back-navigation is generally non-destructive and needs no re-validation,
/// so by default the transition runs (side effects are observable) but its
/// result is dropped and the index always moves. `Commit` makes back
/// symmetric with forward for callers that do want merge-on-back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackBehavior {
    #[default]
    Discard,
    Commit,
}

/// The wizard state machine: an index over `0..step_count` plus the aggregate
/// value. `step` is `None` when the stepper is frozen; navigation then leaves
/// the index untouched.
#[derive(Debug, Clone)]
pub struct Stepper<V> {
    value: Option<V>,
    step: Option<usize>,
    step_count: usize,
    titles: Vec<String>,
    back_behavior: BackBehavior,
}

impl<V: Clone> Stepper<V> {
    /// Create a stepper positioned on step 0 with no value.
    ///
    /// # Panics
    /// Panics if `step_count` is zero; a wizard needs at least one step.
    pub fn new(step_count: usize) -> Self {
        assert!(step_count >= 1, "step_count must be at least 1");
        Self {
            value: None,
            step: Some(0),
            step_count,
            titles: Vec::new(),
            back_behavior: BackBehavior::default(),
        }
    }

    /// Set the initial aggregate value.
    pub fn with_value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    /// Set per-step display titles. The list may be shorter than the step
    /// count; missing entries render blank.
    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Choose what back-navigation does with a transition result.
    pub fn with_back_behavior(mut self, back_behavior: BackBehavior) -> Self {
        self.back_behavior = back_behavior;
        self
    }

    pub fn step(&self) -> Option<usize> {
        self.step
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Consume the stepper, yielding the accumulated value.
    pub fn into_value(self) -> Option<V> {
        self.value
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Title of the current step, or `""` when absent or frozen.
    pub fn current_title(&self) -> &str {
        self.step
            .and_then(|s| self.titles.get(s))
            .map_or("", String::as_str)
    }

    pub fn is_first_step(&self) -> bool {
        self.step == Some(0)
    }

    pub fn is_last_step(&self) -> bool {
        self.step == Some(self.step_count - 1)
    }

    /// Disable navigation: the index becomes `None` and stays there.
    pub fn freeze(&mut self) {
        self.step = None;
    }

    /// Move forward one step without running a transition. Clamped on the
    /// last step; the value is untouched.
    pub fn advance(&mut self) {
        self.step = self.step.map(|s| (s + 1).min(self.step_count - 1));
    }

    /// Move back one step without running a transition. Clamped on step 0.
    pub fn retreat(&mut self) {
        self.step = self.step.map(|s| s.saturating_sub(1));
    }

    /// Run `transition` against a snapshot of the current value, then commit
    /// its result and the next index together.
    ///
    /// The transition receives the current aggregate and either resolves with
    /// the next one (the transition itself merges prior fields in; the
    /// stepper just stores what comes back) or rejects with a
    /// [`ValidationError`], in which case nothing changes and the error
    /// propagates to the caller. On the last step the index is clamped but
    /// the transition still runs and its value still commits, so "Next" on
    /// the final step doubles as a submit-and-merge action. Exactly one state
    /// commit per successful call.
    pub async fn advance_with<F, Fut>(&mut self, transition: F) -> Result<(), ValidationError>
    where
        F: FnOnce(Option<V>) -> Fut,
        Fut: Future<Output = Result<Option<V>, ValidationError>>,
    {
        let candidate = self.step.map(|s| (s + 1).min(self.step_count - 1));
        let next_value = transition(self.value.clone()).await?;
        self.value = next_value;
        self.step = candidate;
        Ok(())
    }

    /// Run `transition`, then move back one step.
    ///
    /// With [`BackBehavior::Discard`] the transition's outcome is ignored and
    /// the index always moves (clamped at 0). With [`BackBehavior::Commit`]
    /// this mirrors [`Stepper::advance_with`]: rejection aborts, success
    /// commits the returned value.
    pub async fn retreat_with<F, Fut>(&mut self, transition: F) -> Result<(), ValidationError>
    where
        F: FnOnce(Option<V>) -> Fut,
        Fut: Future<Output = Result<Option<V>, ValidationError>>,
    {
        let candidate = self.step.map(|s| s.saturating_sub(1));
        let outcome = transition(self.value.clone()).await;
        match self.back_behavior {
            BackBehavior::Discard => {
                self.step = candidate;
                Ok(())
            }
            BackBehavior::Commit => {
                self.value = outcome?;
                self.step = candidate;
                Ok(())
            }
        }
    }
}
