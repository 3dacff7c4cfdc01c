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

//! CPU warm-up before measurements.
//!
//! Spins a floating-point workload so frequency scaling settles before the
//! first repetition is timed.

use std::hint::black_box;
use std::time::{Duration, Instant};

/// Busy-loops for `duration` and returns the number of rounds performed.
///
/// A zero duration returns immediately.
pub fn warmup(duration: Duration) -> u64 {
    if duration.is_zero() {
        return 0;
    }

    let start = Instant::now();
    let mut rounds = 0u64;
    let mut x = 10_000.0f64;
    while start.elapsed() < duration {
        // Batch the clock reads so the loop is dominated by arithmetic.
        for i in 0..1_024u32 {
            let y = 10_000.0 + f64::from(i);
            x = black_box(((x / (y * y)) * (x + y)).sqrt() + 10_000.0);
        }
        rounds += 1;
    }
    black_box(x);
    rounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_warmup_is_noop() {
        assert_eq!(warmup(Duration::ZERO), 0);
    }

    #[test]
    fn test_warmup_runs_for_duration() {
        let start = Instant::now();
        let rounds = warmup(Duration::from_millis(10));
        assert!(rounds > 0);
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
