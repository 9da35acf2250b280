//! Batch-trial bookkeeping for the CLI's `trial` subcommand, in the
//! teacher's `DataRecord`/`DecodingFailureRatio` idiom (src/record.rs).

use std::{fmt, ops::AddAssign, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::growth::GrowthStrategy;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DecodingFailureRatio {
    failure_count: usize,
    trials: usize,
}

impl DecodingFailureRatio {
    #[inline]
    pub fn from(failure_count: usize, trials: usize) -> Result<Self, InvalidDfrError> {
        if failure_count <= trials {
            Ok(Self { failure_count, trials })
        } else {
            Err(InvalidDfrError)
        }
    }

    #[inline]
    pub fn failure_count(&self) -> usize {
        self.failure_count
    }

    #[inline]
    pub fn trials(&self) -> usize {
        self.trials
    }

    #[inline]
    pub fn ratio(&self) -> f64 {
        self.failure_count as f64 / self.trials as f64
    }
}

impl AddAssign for DecodingFailureRatio {
    fn add_assign(&mut self, other: Self) {
        self.failure_count += other.failure_count;
        self.trials += other.trials;
    }
}

#[derive(Clone, Copy, Debug, Error)]
#[error("invalid decoding failure ratio: number of failures must be <= number of trials")]
pub struct InvalidDfrError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrialRecord {
    code_name: String,
    physical_error_rate: f64,
    growth: GrowthStrategy,
    decoding_failure_ratio: DecodingFailureRatio,
    runtime: Duration,
}

impl TrialRecord {
    pub fn new(
        code_name: String,
        physical_error_rate: f64,
        growth: GrowthStrategy,
        decoding_failure_ratio: DecodingFailureRatio,
        runtime: Duration,
    ) -> Self {
        Self {
            code_name,
            physical_error_rate,
            growth,
            decoding_failure_ratio,
            runtime,
        }
    }
}

impl fmt::Display for TrialRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(self).or(Err(fmt::Error))?)
    }
}
