//! Per-instance audit trail of the damage pipeline.

use std::borrow::Cow;
use std::fmt;

/// Identity of a pipeline step, used for ledger lookups and lifesteal bases.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StepId(Cow<'static, str>);

impl StepId {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for StepId {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Amount before and after one executed step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRecord {
    pub step: StepId,
    pub pre: i64,
    pub post: i64,
}

impl StepRecord {
    /// True when the step left the amount unchanged.
    pub fn is_noop(&self) -> bool {
        self.pre == self.post
    }
}

/// Pair returned by [`AmountLedger::step_amount`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepAmount {
    pub pre: i64,
    pub post: i64,
}

/// Running damage amount plus the ordered record of every executed step.
///
/// Records are append-only and in execution order. Consecutive records chain:
/// `records[i].post == records[i + 1].pre`, and the first record starts at
/// [`AmountLedger::initial`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmountLedger {
    initial: i64,
    current: i64,
    records: Vec<StepRecord>,
}

impl AmountLedger {
    pub fn new(initial: i64) -> Self {
        Self {
            initial,
            current: initial,
            records: Vec::new(),
        }
    }

    pub fn initial(&self) -> i64 {
        self.initial
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn set_current(&mut self, amount: i64) {
        self.current = amount;
    }

    /// Appends a record. Does not touch `current`.
    pub fn record_step(&mut self, step: StepId, pre: i64, post: i64) {
        self.records.push(StepRecord { step, pre, post });
    }

    /// Returns the last record for `step`, if the step ever ran.
    pub fn step_amount(&self, step: &StepId) -> Option<StepAmount> {
        self.records
            .iter()
            .rev()
            .find(|record| &record.step == step)
            .map(|record| StepAmount {
                pre: record.pre,
                post: record.post,
            })
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// True if every adjacent pair of records chains and the first starts at `initial`.
    pub fn is_continuous(&self) -> bool {
        let starts_at_initial = self
            .records
            .first()
            .is_none_or(|first| first.pre == self.initial);
        starts_at_initial
            && self
                .records
                .windows(2)
                .all(|pair| pair[0].post == pair[1].pre)
    }
}
