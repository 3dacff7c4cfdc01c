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

//! Failure isolation demo.

use storebench::harness::{BenchmarkCase, MethodSpec};
use storebench::storage::{Reply, Storage};
use storebench::BoxError;

/// A case whose first two methods fail and whose last one succeeds.
///
/// The setup hook fails exactly once, on its first call, which is the
/// first repetition of `bench_broken_setup`.
#[derive(Debug, Default)]
pub struct Faulty {
    setup_calls: usize,
}

impl<S: Storage<Reply = Reply>> BenchmarkCase<S> for Faulty {
    fn name(&self) -> &str {
        "Faulty"
    }

    fn setup(&mut self, store: &mut S) -> Result<(), BoxError> {
        self.setup_calls += 1;
        if self.setup_calls == 1 {
            return Err("fixture 'orders.seed' is missing".into());
        }
        store.execute("PUT orders:1 'pending'")?;
        Ok(())
    }

    fn list_benchmark_methods(&self) -> Vec<MethodSpec> {
        vec![
            MethodSpec::bench("bench_broken_setup"),
            MethodSpec::bench("bench_unsupported_statement").pure(),
            MethodSpec::bench("bench_count_orders").pure(),
        ]
    }

    fn invoke(&mut self, method: &str, store: &mut S) -> Result<(), BoxError> {
        match method {
            "bench_broken_setup" => {}
            "bench_unsupported_statement" => {
                store.execute("MERGE orders:1 'shipped'")?;
            }
            "bench_count_orders" => {
                store.execute("COUNT orders:")?;
            }
            other => return Err(format!("Faulty has no method '{}'", other).into()),
        }
        Ok(())
    }
}
