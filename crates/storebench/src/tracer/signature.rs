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

//! Statement normalization into operation signatures.
//!
//! Literals are replaced by `?` so that statements differing only in their
//! parameters share one signature:
//!
//! ```
//! use storebench::tracer::normalize;
//!
//! assert_eq!(normalize("GET accounts:42"), "GET accounts:?");
//! assert_eq!(
//!     normalize("SELECT * FROM t WHERE id = 7 AND name = 'bob'"),
//!     "SELECT * FROM t WHERE id = ? AND name = ?"
//! );
//! ```

/// Placeholder substituted for every elided literal.
pub const PLACEHOLDER: char = '?';

/// Normalizes a statement into its signature.
///
/// - single- or double-quoted strings become `?` (a doubled quote inside
///   the literal is an escaped quote)
/// - numeric literals not attached to an identifier become `?`
/// - whitespace runs collapse to one space; leading and trailing
///   whitespace is dropped
pub fn normalize(statement: &str) -> String {
    let mut out = String::with_capacity(statement.len());
    let mut chars = statement.trim().chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                skip_quoted(&mut chars, c);
                out.push(PLACEHOLDER);
            }
            c if c.is_ascii_digit() && !continues_identifier(&out) => {
                while chars
                    .peek()
                    .is_some_and(|n| n.is_ascii_alphanumeric() || *n == '.' || *n == '_')
                {
                    chars.next();
                }
                out.push(PLACEHOLDER);
            }
            c if c.is_whitespace() => {
                while chars.peek().is_some_and(|n| n.is_whitespace()) {
                    chars.next();
                }
                out.push(' ');
            }
            c => out.push(c),
        }
    }

    out
}

fn continues_identifier(out: &str) -> bool {
    out.chars()
        .next_back()
        .is_some_and(|p| p.is_alphanumeric() || p == '_')
}

fn skip_quoted<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>, quote: char) {
    while let Some(c) = chars.next() {
        if c == quote {
            if chars.peek() == Some(&quote) {
                chars.next();
                continue;
            }
            return;
        }
    }
}
