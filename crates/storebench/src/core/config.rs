// Dweve storebench - Storage Benchmark Harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Centralized run configuration.
//!
//! Holds the repetition count, the significance threshold used by the
//! comparator and the optional warm-up period. Defaults are documented
//! constants; each can be overridden from the environment or by the caller.

use crate::error::{BenchError, Result};
use std::time::Duration;

/// Default number of repetitions per benchmark method.
pub const DEFAULT_REPETITIONS: u32 = 10;

/// Default significance threshold for the two-sample test.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default warm-up duration before the first case runs.
pub const DEFAULT_WARMUP: Duration = Duration::ZERO;

/// Environment variable overriding [`DEFAULT_REPETITIONS`].
pub const ENV_REPETITIONS: &str = "STOREBENCH_REPETITIONS";

/// Environment variable overriding [`DEFAULT_ALPHA`].
pub const ENV_ALPHA: &str = "STOREBENCH_ALPHA";

/// Environment variable overriding [`DEFAULT_WARMUP`], in whole seconds.
pub const ENV_WARMUP_SECS: &str = "STOREBENCH_WARMUP_SECS";

/// Configuration for one benchmark run.
///
/// # Example
///
/// ```no_run
/// use storebench::core::config::RunConfig;
/// use std::time::Duration;
///
/// let config = RunConfig::default()
///     .with_repetitions(20)
///     .with_alpha(0.01)
///     .with_warmup(Duration::from_secs(2));
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Repetitions per benchmark method.
    pub repetitions: u32,
    /// Significance threshold; p-values below it are significant.
    pub alpha: f64,
    /// Warm-up duration before measurements start.
    pub warmup: Duration,
}

impl RunConfig {
    /// Creates a configuration with the documented defaults.
    pub fn new() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            alpha: DEFAULT_ALPHA,
            warmup: DEFAULT_WARMUP,
        }
    }

    /// Creates a configuration from `STOREBENCH_*` environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::new();
        Self {
            repetitions: env_parse(ENV_REPETITIONS).unwrap_or(defaults.repetitions),
            alpha: env_parse(ENV_ALPHA).unwrap_or(defaults.alpha),
            warmup: env_parse::<u64>(ENV_WARMUP_SECS)
                .map(Duration::from_secs)
                .unwrap_or(defaults.warmup),
        }
    }

    /// Sets the repetition count.
    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Sets the significance threshold.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the warm-up duration.
    pub fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    /// Checks that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidConfig`] if `repetitions` is zero or
    /// `alpha` is not strictly between 0 and 1.
    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(BenchError::invalid_config(
                "repetitions",
                "must be at least 1",
            ));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(BenchError::invalid_config(
                "alpha",
                format!("must be between 0 and 1 (exclusive), got {}", self.alpha),
            ));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}
