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

//! Two-sample significance testing.
//!
//! Decides whether a current set of timings is significantly faster, slower
//! or indistinguishable from a baseline set using Welch's t test (unequal
//! variances). With fewer than two samples on either side no variance
//! exists; the engine then reports only the direction of the mean delta and
//! leaves the p-value undefined instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-valued outcome of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Current is significantly faster.
    Better,
    /// Current is significantly slower.
    Worse,
    /// No significant difference, or not enough data to tell.
    None,
}

impl Classification {
    /// Returns the classification as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Better => "better",
            Classification::Worse => "worse",
            Classification::None => "none",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the mean delta, regardless of significance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Current mean is lower.
    Faster,
    /// Current mean is higher.
    Slower,
    /// Means are equal.
    Unchanged,
}

/// Summary statistics of one sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Unbiased sample variance; undefined below two samples.
    pub variance: Option<f64>,
    /// Smallest sample.
    pub min: u64,
    /// Largest sample.
    pub max: u64,
    /// Median (mean of the two middle values for even counts).
    pub median: f64,
}

impl SampleSummary {
    /// Summarizes `samples`, or returns `None` if there are none.
    pub fn from_samples(samples: &[u64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let count = samples.len();
        let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / count as f64;
        let variance = (count >= 2).then(|| {
            samples
                .iter()
                .map(|&s| {
                    let diff = s as f64 - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (count - 1) as f64
        });

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        let median = if count % 2 == 1 {
            sorted[count / 2] as f64
        } else {
            (sorted[count / 2 - 1] as f64 + sorted[count / 2] as f64) / 2.0
        };

        Some(Self {
            count,
            mean,
            variance,
            min: sorted[0],
            max: sorted[count - 1],
            median,
        })
    }

    /// Standard deviation; undefined below two samples.
    pub fn std_dev(&self) -> Option<f64> {
        self.variance.map(f64::sqrt)
    }
}

/// Outcome of a two-sample comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Significance {
    /// Two-sided p-value in `[0, 1]`; `None` when it cannot be computed.
    pub p_value: Option<f64>,
    /// Verdict at the requested threshold.
    pub classification: Classification,
    /// Direction of the mean delta.
    pub direction: Direction,
}

/// Compares `current` against `baseline` at significance level `alpha`.
///
/// # Example
///
/// ```
/// use storebench::stats::{compare_samples, Classification};
///
/// let result = compare_samples(&[100; 5], &[10; 5], 0.05);
/// assert_eq!(result.classification, Classification::Better);
/// ```
pub fn compare_samples(baseline: &[u64], current: &[u64], alpha: f64) -> Significance {
    let (Some(base), Some(cur)) = (
        SampleSummary::from_samples(baseline),
        SampleSummary::from_samples(current),
    ) else {
        return Significance {
            p_value: None,
            classification: Classification::None,
            direction: Direction::Unchanged,
        };
    };

    let direction = direction_of(base.mean, cur.mean);

    let p_value = match (base.variance, cur.variance) {
        (Some(vb), Some(vc)) => Some(welch_p_value(
            base.mean,
            vb,
            base.count,
            cur.mean,
            vc,
            cur.count,
        )),
        _ => None,
    };

    let classification = match p_value {
        Some(p) if p < alpha => {
            if cur.mean < base.mean {
                Classification::Better
            } else {
                Classification::Worse
            }
        }
        _ => Classification::None,
    };

    Significance {
        p_value,
        classification,
        direction,
    }
}

fn direction_of(baseline_mean: f64, current_mean: f64) -> Direction {
    if current_mean < baseline_mean {
        Direction::Faster
    } else if current_mean > baseline_mean {
        Direction::Slower
    } else {
        Direction::Unchanged
    }
}

/// Two-sided p-value of Welch's t test.
fn welch_p_value(mean_b: f64, var_b: f64, n_b: usize, mean_c: f64, var_c: f64, n_c: usize) -> f64 {
    let se_b = var_b / n_b as f64;
    let se_c = var_c / n_c as f64;
    let se2 = se_b + se_c;

    if se2 == 0.0 {
        // No spread on either side: any mean difference is exact.
        return if mean_b == mean_c { 1.0 } else { 0.0 };
    }

    let t = (mean_c - mean_b) / se2.sqrt();
    let df = se2 * se2
        / (se_b * se_b / (n_b - 1) as f64 + se_c * se_c / (n_c - 1) as f64);

    student_t_two_sided(t, df)
}

/// Two-sided tail probability `P(|T| >= |t|)` of Student's t distribution.
pub fn student_t_two_sided(t: f64, df: f64) -> f64 {
    if t == 0.0 {
        return 1.0;
    }
    if !t.is_finite() {
        return 0.0;
    }
    let x = df / (df + t * t);
    regularized_incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

/// Regularized incomplete beta function `I_x(a, b)`.
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();

    // The continued fraction converges fastest on this side of the mean.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// Continued fraction for the incomplete beta function (modified Lentz).
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITERATIONS: usize = 300;
    const EPSILON: f64 = 1e-15;
    const TINY: f64 = 1e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }

    h
}

/// Natural log of the gamma function (Lanczos, g = 7).
fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection formula.
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin().abs()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut acc = COEFFICIENTS[0];
    for (i, &coef) in COEFFICIENTS.iter().enumerate().skip(1) {
        acc += coef / (x + i as f64);
    }
    let t = x + G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}
