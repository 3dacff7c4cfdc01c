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

//! JSON encoding and validation of reports.
//!
//! Decoding runs in two stages: the document is first checked structurally
//! as an untyped JSON value, so that a negative or fractional duration is
//! reported as a malformed report naming the offending field, and only then
//! deserialized into [`Report`].

use super::model::{Report, TOOL_VERSION};
use crate::error::ReportError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Encodes a report as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ReportError::Json`] if serialization fails.
pub fn encode(report: &Report) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Decodes and validates a report.
///
/// # Errors
///
/// Returns [`ReportError::Malformed`] when the text is not a JSON object,
/// the tool/version tag is missing or empty, a result has no samples, a
/// duration or count is not a non-negative integer, or any required field
/// is missing. Unknown fields are ignored.
pub fn decode(text: &str) -> Result<Report, ReportError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ReportError::malformed(format!("invalid JSON: {}", e)))?;

    validate(&value)?;

    let report: Report = serde_json::from_value(value)
        .map_err(|e| ReportError::malformed(e.to_string()))?;
    check_tool_version(&report.tool_version);
    Ok(report)
}

/// Encodes `report` and writes it to `path`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the file cannot be written.
pub fn save(report: &Report, path: &Path) -> Result<(), ReportError> {
    let json = encode(report)?;
    fs::write(path, json).map_err(|e| ReportError::io_error(path, e))?;
    debug!(path = %path.display(), results = report.results.len(), "report saved");
    Ok(())
}

/// Reads and decodes the report at `path`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the file cannot be read, or any error
/// [`decode`] returns.
pub fn load(path: &Path) -> Result<Report, ReportError> {
    let text = fs::read_to_string(path).map_err(|e| ReportError::io_error(path, e))?;
    decode(&text)
}

fn validate(value: &Value) -> Result<(), ReportError> {
    let root = value
        .as_object()
        .ok_or_else(|| ReportError::malformed("report must be a JSON object"))?;

    match root.get("toolVersion") {
        None => return Err(ReportError::malformed("missing 'toolVersion'")),
        Some(Value::String(tag)) if !tag.trim().is_empty() => {}
        Some(_) => {
            return Err(ReportError::malformed(
                "'toolVersion' must be a non-empty string",
            ))
        }
    }

    if !root.contains_key("timestamp") {
        return Err(ReportError::malformed("missing 'timestamp'"));
    }

    let results = match root.get("results") {
        None => return Err(ReportError::malformed("missing 'results'")),
        Some(Value::Array(results)) => results,
        Some(_) => return Err(ReportError::malformed("'results' must be an array")),
    };

    for (index, result) in results.iter().enumerate() {
        let result = result
            .as_object()
            .ok_or_else(|| ReportError::malformed(format!("results[{}] must be an object", index)))?;
        validate_result(index, result)?;
    }

    Ok(())
}

fn validate_result(index: usize, result: &Map<String, Value>) -> Result<(), ReportError> {
    let samples = match result.get("sampleNanos") {
        None => {
            return Err(ReportError::malformed(format!(
                "results[{}] is missing 'sampleNanos'",
                index
            )))
        }
        Some(Value::Array(samples)) => samples,
        Some(_) => {
            return Err(ReportError::malformed(format!(
                "results[{}].sampleNanos must be an array",
                index
            )))
        }
    };

    if samples.is_empty() {
        return Err(ReportError::malformed(format!(
            "results[{}].sampleNanos is empty",
            index
        )));
    }

    for (i, sample) in samples.iter().enumerate() {
        if sample.as_u64().is_none() {
            return Err(ReportError::malformed(format!(
                "results[{}].sampleNanos[{}] is not a non-negative integer: {}",
                index, i, sample
            )));
        }
    }

    if let Some(counts) = result.get("operationCounts") {
        let counts = counts.as_object().ok_or_else(|| {
            ReportError::malformed(format!(
                "results[{}].operationCounts must be an object",
                index
            ))
        })?;
        for (signature, count) in counts {
            if count.as_u64().is_none() {
                return Err(ReportError::malformed(format!(
                    "results[{}].operationCounts['{}'] is not a non-negative integer: {}",
                    index, signature, count
                )));
            }
        }
    }

    Ok(())
}

/// Warns about reports written by another tool or a newer major version.
fn check_tool_version(tag: &str) {
    let (ours_name, ours_version) = split_tag(TOOL_VERSION);
    let (name, version) = split_tag(tag);

    if name != ours_name {
        warn!(tool_version = tag, "report was written by a different tool");
        return;
    }

    if let (Some(theirs), Some(ours)) = (major_of(version), major_of(ours_version)) {
        if theirs > ours {
            warn!(
                tool_version = tag,
                current = TOOL_VERSION,
                "report was written by a newer major version"
            );
        }
    }
}

fn split_tag(tag: &str) -> (&str, &str) {
    tag.split_once('/').unwrap_or((tag, ""))
}

fn major_of(version: &str) -> Option<u64> {
    version.split('.').next()?.parse().ok()
}
