//! Ordered, conditionally executed scoring steps.
//!
//! Steps run in ascending priority (ties keep insertion order). Each step may
//! carry a [`StepCondition`] which sees only the [`RunningTotal`] so far; when
//! it holds, the step's calculator runs against the full input and its value
//! is added to the total.

use crate::factors::Factor;
use crate::scorer::weights::{ScoreSet, WeightSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Snapshot handed to step conditions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunningTotal {
    pub total: f64,
    /// Steps that ran so far. Only custom conditions read it.
    pub steps_applied: usize,
}

pub type ConditionFn = dyn Fn(RunningTotal) -> bool + Send + Sync;

#[derive(Clone)]
pub enum StepCondition {
    Always,
    TotalAbove(f64),
    TotalAtLeast(f64),
    TotalBelow(f64),
    Custom(Arc<ConditionFn>),
}

impl StepCondition {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(RunningTotal) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub fn holds(&self, running: RunningTotal) -> bool {
        match self {
            Self::Always => true,
            Self::TotalAbove(t) => running.total > *t,
            Self::TotalAtLeast(t) => running.total >= *t,
            Self::TotalBelow(t) => running.total < *t,
            Self::Custom(f) => f(running),
        }
    }
}

impl fmt::Debug for StepCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "Always"),
            Self::TotalAbove(t) => write!(f, "TotalAbove({})", t),
            Self::TotalAtLeast(t) => write!(f, "TotalAtLeast({})", t),
            Self::TotalBelow(t) => write!(f, "TotalBelow({})", t),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

pub trait StepCalculator: Send + Sync {
    fn calculate(&self, scores: &ScoreSet, weights: &WeightSet) -> f64;
}

impl<F> StepCalculator for F
where
    F: Fn(&ScoreSet, &WeightSet) -> f64 + Send + Sync,
{
    fn calculate(&self, scores: &ScoreSet, weights: &WeightSet) -> f64 {
        self(scores, weights)
    }
}

#[derive(Clone)]
pub struct Step {
    pub name: String,
    pub description: String,
    pub priority: i32,
    pub condition: StepCondition,
    calculator: Arc<dyn StepCalculator>,
}

impl Step {
    pub fn new<C>(name: &str, priority: i32, calculator: C) -> Self
    where
        C: StepCalculator + 'static,
    {
        Self {
            name: name.to_string(),
            description: String::new(),
            priority,
            condition: StepCondition::Always,
            calculator: Arc::new(calculator),
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn when(mut self, condition: StepCondition) -> Self {
        self.condition = condition;
        self
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("condition", &self.condition)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct CalculationPipeline {
    pub name: String,
    pub description: String,
    steps: Vec<Step>,
}

impl CalculationPipeline {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            steps: Vec::new(),
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Executes the steps and returns the accumulated total. Inputs are not
    /// validated here.
    pub fn run(&self, scores: &ScoreSet, weights: &WeightSet) -> f64 {
        let mut ordered: Vec<&Step> = self.steps.iter().collect();
        ordered.sort_by_key(|s| s.priority);

        let mut running = RunningTotal::default();
        for step in ordered {
            if step.condition.holds(running) {
                let value = step.calculator.calculate(scores, weights);
                running.total += value;
                running.steps_applied += 1;
                debug!(
                    "[{}] step '{}' added {:.3} (total {:.3})",
                    self.name, step.name, value, running.total
                );
            } else {
                debug!(
                    "[{}] step '{}' skipped at total {:.3}",
                    self.name, step.name, running.total
                );
            }
        }
        running.total
    }

    /// School district first, then size against maintenance cost, then a
    /// small transport bonus for units that already score above 60.
    pub fn family() -> Self {
        Self::new("family")
            .describe("School district, size/fee balance and transport access")
            .with_step(
                Step::new("school_district", 1, |s: &ScoreSet, _: &WeightSet| {
                    s.get(Factor::SchoolDistrict).to_real() * 0.4
                })
                .describe("School district at 40%"),
            )
            .with_step(
                Step::new("size_fee_balance", 2, |s: &ScoreSet, _: &WeightSet| {
                    let size = s.get(Factor::ApartmentSize).to_real() * 0.6;
                    let fee = s.get(Factor::MaintenanceFee).to_real() * 0.4;
                    (size + fee) * 0.4
                })
                .describe("Apartment size against maintenance fee at 40%"),
            )
            .with_step(
                Step::new("transport_bonus", 3, |s: &ScoreSet, _: &WeightSet| {
                    let transport = s.get(Factor::TransportationAccess).to_real();
                    if transport >= 85.0 {
                        1.0
                    } else if transport >= 75.0 {
                        0.4
                    } else {
                        0.0
                    }
                })
                .describe("Bonus for good transport access")
                .when(StepCondition::TotalAbove(60.0)),
            )
    }
}
