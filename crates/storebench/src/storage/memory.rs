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

//! In-memory reference backend.
//!
//! An ordered key/value store speaking a five-verb statement language:
//!
//! ```text
//! PUT key value      store (value may be single-quoted and contain spaces)
//! GET key            fetch one value
//! DEL key            remove one key
//! SCAN prefix        list all entries whose key starts with prefix
//! COUNT prefix       count entries whose key starts with prefix
//! ```

use super::Storage;
use crate::error::StorageError;
use std::collections::BTreeMap;

/// Reply to a [`MemoryStore`] statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `PUT` succeeded.
    Stored,
    /// `GET` result.
    Value(Option<String>),
    /// `DEL` result; whether the key existed.
    Deleted(bool),
    /// `SCAN` result in key order.
    Entries(Vec<(String, String)>),
    /// `COUNT` result.
    Count(usize),
}

/// Ordered in-memory key/value store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn scan(&self, prefix: &str) -> impl Iterator<Item = (&String, &String)> {
        let prefix = prefix.to_string();
        self.data
            .range(prefix.clone()..)
            .take_while(move |(k, _)| k.starts_with(&prefix))
    }
}

impl Storage for MemoryStore {
    type Reply = Reply;

    fn execute(&mut self, statement: &str) -> Result<Reply, StorageError> {
        let statement = statement.trim();
        let (verb, rest) = split_token(statement);
        let (key, rest) = split_token(rest);

        match verb.to_ascii_uppercase().as_str() {
            "PUT" => {
                require_key(key, statement)?;
                if rest.is_empty() {
                    return Err(StorageError::Backend(format!(
                        "PUT requires a value: {}",
                        statement
                    )));
                }
                self.data.insert(key.to_string(), unquote(rest).to_string());
                Ok(Reply::Stored)
            }
            "GET" => {
                require_key(key, statement)?;
                Ok(Reply::Value(self.data.get(key).cloned()))
            }
            "DEL" => {
                require_key(key, statement)?;
                Ok(Reply::Deleted(self.data.remove(key).is_some()))
            }
            "SCAN" => Ok(Reply::Entries(
                self.scan(key)
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )),
            "COUNT" => Ok(Reply::Count(self.scan(key).count())),
            _ => Err(StorageError::Unsupported(statement.to_string())),
        }
    }

    fn reset(&mut self) -> Result<(), StorageError> {
        self.data.clear();
        Ok(())
    }
}

fn split_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], input[idx..].trim()),
        None => (input, ""),
    }
}

fn require_key(key: &str, statement: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        Err(StorageError::Backend(format!(
            "statement requires a key: {}",
            statement
        )))
    } else {
        Ok(())
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value)
}
