//! Individuals: candidate policies, each a fixed-size ordered collection of
//! rules plus a cached performance-assessment result.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::env::PerfAssessment;
use crate::error::{LcsError, Result};
use crate::inference::infer_action;
use crate::interval::ObsValue;
use crate::rule::{Action, Rule};

static NEXT_INDIV_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide monotonically increasing individual id; ids are never
/// reused.
fn next_indiv_id() -> u64 {
    NEXT_INDIV_ID.fetch_add(1, Ordering::Relaxed)
}

/// One candidate policy.
///
/// The id is assigned at construction and never changes; crossover and
/// cloning always go through `Indiv::new` for offspring, so a new individual
/// means a new id. Cloning an `Indiv` duplicates its id deliberately: clones
/// are owned working copies (a tournament winner handed to crossover, an
/// individual handed to a worker), not new members of the population.
#[derive(Debug, Clone)]
pub struct Indiv<T> {
    rules: Vec<Rule<T>>,
    selectable_actions: Vec<Action>,
    id: u64,
    // *most recent* perf assessment result
    perf_assessment_res: Option<PerfAssessment>,
}

impl<T: ObsValue> Indiv<T> {
    pub fn new(rules: Vec<Rule<T>>, selectable_actions: Vec<Action>) -> Self {
        Self {
            rules,
            selectable_actions,
            id: next_indiv_id(),
            perf_assessment_res: None,
        }
    }

    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    pub(crate) fn rules_mut(&mut self) -> &mut [Rule<T>] {
        &mut self.rules
    }

    /// Consumes the individual, yielding its rules (crossover).
    pub(crate) fn into_rules(self) -> Vec<Rule<T>> {
        self.rules
    }

    pub fn selectable_actions(&self) -> &[Action] {
        &self.selectable_actions
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The most recent performance-assessment result.
    ///
    /// Reading it before assessment has run is a programming error and
    /// aborts the calling code path.
    pub fn perf_assessment_res(&self) -> Result<&PerfAssessment> {
        self.perf_assessment_res
            .as_ref()
            .ok_or(LcsError::UnsetProperty("perf_assessment_res"))
    }

    pub fn set_perf_assessment_res(&mut self, res: PerfAssessment) {
        self.perf_assessment_res = Some(res);
    }

    pub fn has_perf_assessment(&self) -> bool {
        self.perf_assessment_res.is_some()
    }

    /// Fitness is the assessed performance; undefined until assessment has
    /// run.
    pub fn fitness(&self) -> Result<f64> {
        Ok(self.perf_assessment_res()?.perf())
    }

    /// Performs inference on `obs`, making the individual act as a policy.
    ///
    /// `None` means no rule matched: a truncated decision the caller must
    /// handle (e.g. by ending a rollout).
    pub fn select_action(&self, obs: &[T], x_nought: f64) -> Option<Action> {
        infer_action(self, obs, x_nought)
    }
}
