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

//! Error types for storebench operations.
//!
//! Each layer of the harness has its own error enum so callers can tell a
//! tracer invariant violation apart from a storage failure or a rejected
//! report file. Per-method benchmark failures are not errors at this level:
//! the runner turns them into [`MethodFailure`](crate::report::MethodFailure)
//! records and keeps going.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for harness-level operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Boxed error returned by user benchmark code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the operation tracer.
///
/// Both variants are internal invariant violations. The runner surfaces them
/// as execution failures of the repetition that hit them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceError {
    /// A capture was started while another one was still active.
    #[error("a capture is already active on this session")]
    AlreadyCapturing,

    /// A capture was stopped while none was active.
    #[error("no capture is active on this session")]
    NotCapturing,
}

/// Errors raised by a storage backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend does not understand the statement.
    #[error("unsupported statement: {0}")]
    Unsupported(String),

    /// The backend failed while executing a statement or a reset.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors raised while reading or writing report files.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The document parsed but failed structural validation.
    #[error("malformed report: {reason}")]
    Malformed {
        /// What made the report invalid
        reason: String,
    },

    /// Reading or writing the report file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The report file path
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The report could not be serialized or was not valid JSON.
    #[error("JSON error: {0}")]
    Json(String),
}

impl ReportError {
    /// Create a malformed-report error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Returns whether the error came from structural validation.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ReportError::Malformed { .. })
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Json(err.to_string())
    }
}

/// Errors that abort a harness operation as a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    /// Invalid configuration parameter.
    #[error("invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A requested module path matched no registered case.
    #[error("no benchmark cases registered under '{0}'")]
    UnknownModule(String),

    /// Loading or persisting a report failed.
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl BenchError {
    /// Create an invalid-configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BenchError::invalid_config("alpha", "must be between 0 and 1");
        let msg = err.to_string();
        assert!(msg.contains("alpha"));
        assert!(msg.contains("must be between 0 and 1"));

        let err = ReportError::malformed("results[0] is missing 'sampleNanos'");
        assert_eq!(
            err.to_string(),
            "malformed report: results[0] is missing 'sampleNanos'"
        );
    }

    #[test]
    fn test_report_error_is_transparent() {
        let err: BenchError = ReportError::malformed("missing 'toolVersion'").into();
        assert_eq!(err.to_string(), "malformed report: missing 'toolVersion'");
        assert!(matches!(err, BenchError::Report(ref e) if e.is_malformed()));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ReportError::io_error("baseline.json", source);
        assert!(err.to_string().contains("baseline.json"));
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_trace_error_equality() {
        assert_eq!(TraceError::AlreadyCapturing, TraceError::AlreadyCapturing);
        assert_ne!(TraceError::AlreadyCapturing, TraceError::NotCapturing);
    }
}
