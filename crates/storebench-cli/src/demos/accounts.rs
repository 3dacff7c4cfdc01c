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

//! Account lookups.

use storebench::harness::{BenchmarkCase, MethodSpec};
use storebench::storage::{Reply, Storage};
use storebench::BoxError;

const SEEDED_ACCOUNTS: usize = 25;

/// Compares reading every account one key at a time with one range scan.
///
/// `bench_lookup_each` issues one `GET` per account after a `COUNT`, the
/// classic N+1 shape; `bench_lookup_scan` reads the same rows in one call.
#[derive(Debug, Default)]
pub struct Accounts {
    seeded: usize,
}

impl Accounts {
    fn read_each<S: Storage<Reply = Reply>>(&self, store: &mut S) -> Result<usize, BoxError> {
        let count = match store.execute("COUNT accounts:")? {
            Reply::Count(n) => n,
            other => return Err(format!("unexpected reply to COUNT: {:?}", other).into()),
        };

        let mut found = 0;
        for id in 0..count {
            if let Reply::Value(Some(_)) = store.execute(&format!("GET accounts:{}", id))? {
                found += 1;
            }
        }
        Ok(found)
    }
}

impl<S: Storage<Reply = Reply>> BenchmarkCase<S> for Accounts {
    fn name(&self) -> &str {
        "Accounts"
    }

    fn setup(&mut self, store: &mut S) -> Result<(), BoxError> {
        for id in 0..SEEDED_ACCOUNTS {
            store.execute(&format!("PUT accounts:{} 'owner {}'", id, id))?;
        }
        self.seeded = SEEDED_ACCOUNTS;
        Ok(())
    }

    fn list_benchmark_methods(&self) -> Vec<MethodSpec> {
        vec![
            MethodSpec::bench("bench_open_accounts"),
            MethodSpec::bench("bench_lookup_each").pure(),
            MethodSpec::bench("bench_lookup_scan").pure(),
            MethodSpec::bench("bench_close_accounts"),
            // Not a benchmark: filtered out by discovery.
            MethodSpec::bench("verify_seed").pure(),
        ]
    }

    fn invoke(&mut self, method: &str, store: &mut S) -> Result<(), BoxError> {
        match method {
            "bench_open_accounts" => {
                for id in self.seeded..self.seeded + 10 {
                    store.execute(&format!("PUT accounts:{} 'new owner'", id))?;
                }
            }
            "bench_lookup_each" => {
                let found = self.read_each(store)?;
                if found != self.seeded {
                    return Err(format!("expected {} accounts, found {}", self.seeded, found).into());
                }
            }
            "bench_lookup_scan" => match store.execute("SCAN accounts:")? {
                Reply::Entries(rows) if rows.len() == self.seeded => {}
                other => return Err(format!("unexpected scan result: {:?}", other).into()),
            },
            "bench_close_accounts" => {
                for id in (0..self.seeded).step_by(5) {
                    store.execute(&format!("DEL accounts:{}", id))?;
                }
            }
            "verify_seed" => {
                self.read_each(store)?;
            }
            other => return Err(format!("Accounts has no method '{}'", other).into()),
        }
        Ok(())
    }
}
