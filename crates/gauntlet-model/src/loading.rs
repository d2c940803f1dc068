// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Instance loader for NK-landscape style fitness functions.
//!
//! This module turns line-oriented text streams into a validated
//! `FunctionTable`. The first meaningful line is the header; each of the
//! following `row_count` meaningful lines holds exactly one row. Because rows
//! are line-delimited, a row with too few or too many tokens is reported
//! against the line it appears on instead of silently borrowing tokens from
//! its neighbour.
//!
//! The parser accepts any `BufRead`, file path, raw reader, or string slice.
//! Lines may contain comments introduced by `#`, and blank lines are skipped.
//! Anything after the last row is ignored.

use crate::table::{FunctionTable, FunctionTableBuilder, TableError, MAX_ROW_ARITY};
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum InstanceLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input ended before the header or the declared number of rows.
    UnexpectedEof { line: usize },
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// A line holds the wrong number of tokens.
    TokenCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// The decoded data violates a structural invariant of the table.
    Table(TableError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The 1-based line the token appeared on.
    pub line: usize,
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "usize").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: could not parse token '{}' as type {}",
            self.line, self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

impl Display for InstanceLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof { line } => {
                write!(f, "unexpected end of input after line {line}")
            }
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::TokenCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: expected {expected} tokens, found {found}"
            ),
            Self::Table(e) => write!(f, "malformed instance: {e}"),
        }
    }
}

impl std::error::Error for InstanceLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstanceLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for InstanceLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<TableError> for InstanceLoaderError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

/// A configurable loader for function-table instances.
///
/// The format this parser expects is as follows (whitespace-separated tokens):
///
/// ```raw
/// N E A M              // variables, max evaluations, row arity (K + 1), row count
/// v_1 ... v_A  f_0 ... f_(2^A - 1)    // row 1
/// ...
/// v_1 ... v_A  f_0 ... f_(2^A - 1)    // row M
/// ```
///
/// # Configuration
/// * `enforce_row_count`: if true (the default), `M` must equal `N`. When
///   disabled, any positive `M` is accepted and every row contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLoader {
    enforce_row_count: bool,
}

impl Default for InstanceLoader {
    fn default() -> Self {
        Self {
            enforce_row_count: true,
        }
    }
}

impl InstanceLoader {
    /// Creates a new `InstanceLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether the declared row count must equal the number of variables.
    #[inline]
    pub fn enforce_row_count(mut self, yes: bool) -> Self {
        self.enforce_row_count = yes;
        self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<FunctionTable, InstanceLoaderError> {
        let mut sc = LineScanner::new(rdr);

        // Header
        if !sc.next_line()? {
            return Err(InstanceLoaderError::UnexpectedEof { line: sc.line() });
        }
        sc.expect_token_count(4)?;
        let mut tokens = sc.tokens();
        let num_variables: usize = sc.parse(tokens.next())?;
        let max_evaluations: u64 = sc.parse(tokens.next())?;
        let row_arity: usize = sc.parse(tokens.next())?;
        let row_count: usize = sc.parse(tokens.next())?;

        // Rejecting the arity here keeps `1 << row_arity` below from overflowing.
        if !(crate::table::MIN_ROW_ARITY..=MAX_ROW_ARITY).contains(&row_arity) {
            return Err(TableError::InvalidRowArity { row_arity }.into());
        }

        let mut builder = FunctionTableBuilder::new(num_variables, max_evaluations, row_arity)?
            .enforce_row_count(self.enforce_row_count);
        let values_per_row = builder.values_per_row();

        // Rows
        for _ in 0..row_count {
            if !sc.next_line()? {
                return Err(InstanceLoaderError::UnexpectedEof { line: sc.line() });
            }
            sc.expect_token_count(row_arity + values_per_row)?;

            let mut tokens = sc.tokens();
            let mut variables = Vec::with_capacity(row_arity);
            for _ in 0..row_arity {
                variables.push(sc.parse::<usize>(tokens.next())?);
            }
            let mut values = Vec::with_capacity(values_per_row);
            for _ in 0..values_per_row {
                values.push(sc.parse::<f64>(tokens.next())?);
            }

            builder.add_row(variables, values)?;
        }

        Ok(builder.build()?)
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<FunctionTable, InstanceLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<FunctionTable, InstanceLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<FunctionTable, InstanceLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

/// Reads one meaningful line at a time, with comments stripped.
struct LineScanner<R> {
    rdr: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> LineScanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            line: 0,
        }
    }

    /// The 1-based number of the line currently held in the buffer.
    #[inline]
    fn line(&self) -> usize {
        self.line
    }

    /// Advances to the next line holding at least one token.
    /// Returns `Ok(false)` on EOF.
    fn next_line(&mut self) -> Result<bool, InstanceLoaderError> {
        loop {
            self.buf.clear();
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(false);
            }
            self.line += 1;

            if let Some(comment) = self.buf.find('#') {
                self.buf.truncate(comment);
            }
            if self.buf.split_whitespace().next().is_some() {
                return Ok(true);
            }
        }
    }

    #[inline]
    fn tokens(&self) -> std::str::SplitWhitespace<'_> {
        self.buf.split_whitespace()
    }

    fn expect_token_count(&self, expected: usize) -> Result<(), InstanceLoaderError> {
        let found = self.tokens().count();
        if found != expected {
            return Err(InstanceLoaderError::TokenCount {
                line: self.line,
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Parses `token` into `T`, attributing failures to the current line.
    fn parse<T: FromStr>(&self, token: Option<&str>) -> Result<T, InstanceLoaderError> {
        let token = token.ok_or(InstanceLoaderError::UnexpectedEof { line: self.line })?;
        token.parse::<T>().map_err(|_| {
            InstanceLoaderError::Parse(ParseTokenError {
                line: self.line,
                token: token.to_owned(),
                type_name: std::any::type_name::<T>(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_table;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const SMALL_INSTANCE: &str = r#"
        # four variables, K = 2
        4 100 3 4
        0 1 2  1 2 3 4 5 6 7 8
        0 1 2  10 20 30 40 50 60 70 80   # second row
        0 1 2  0.5 0 0 0 0 0 0 0

        0 1 2  -1 0 0 0 0 0 0 0
    "#;

    #[test]
    fn test_loads_and_maps_correctly() {
        let table = InstanceLoader::new()
            .from_str(SMALL_INSTANCE)
            .expect("Failed to load");

        assert_eq!(table.num_variables(), 4);
        assert_eq!(table.max_evaluations(), 100);
        assert_eq!(table.subset_arity(), 2);
        assert_eq!(table.num_rows(), 4);
        assert!(table.rows().iter().all(|r| r.arity() == 3));

        // The all-false candidate picks values[0] of every row.
        assert_eq!(table.value(&[false; 4]), 1.0 + 10.0 + 0.5 - 1.0);
    }

    #[test]
    fn test_parse_error_structure() {
        let data = "4 100 3 4\n0 x 2 1 2 3 4 5 6 7 8\n";
        let res = InstanceLoader::new().from_str(data);

        match res {
            Err(InstanceLoaderError::Parse(e)) => {
                assert_eq!(e.token, "x");
                assert_eq!(e.line, 2);
                assert!(e.type_name.contains("usize"));
            }
            other => panic!("Expected Parse error with context, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_index_is_a_parse_error() {
        let data = "2 10 2 2\n-1 0 1 1 1 1\n0 1 1 1 1 1\n";
        assert!(matches!(
            InstanceLoader::new().from_str(data),
            Err(InstanceLoaderError::Parse(_))
        ));
    }

    #[test]
    fn test_header_missing_fields() {
        let res = InstanceLoader::new().from_str("4 100 3\n");
        assert!(matches!(
            res,
            Err(InstanceLoaderError::TokenCount {
                line: 1,
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            InstanceLoader::new().from_str("  # nothing here\n\n"),
            Err(InstanceLoaderError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_row_with_wrong_arity_is_rejected() {
        // Missing one lookup value on the second row.
        let data = "2 10 2 2\n0 1 1 2 3 4\n1 0 1 2 3\n";
        match InstanceLoader::new().from_str(data) {
            Err(InstanceLoaderError::TokenCount {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 6);
                assert_eq!(found, 5);
            }
            other => panic!("Expected TokenCount, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_rows() {
        let data = "2 10 2 2\n0 1 1 2 3 4\n";
        assert!(matches!(
            InstanceLoader::new().from_str(data),
            Err(InstanceLoaderError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_out_of_range_variable() {
        let data = "2 10 2 2\n0 2 1 2 3 4\n1 0 1 2 3 4\n";
        assert!(matches!(
            InstanceLoader::new().from_str(data),
            Err(InstanceLoaderError::Table(TableError::VariableOutOfRange {
                variable: 2,
                ..
            }))
        ));
    }

    #[test]
    fn test_row_count_must_match_variables() {
        let data = "3 10 2 2\n0 1 1 2 3 4\n1 2 1 2 3 4\n";
        assert!(matches!(
            InstanceLoader::new().from_str(data),
            Err(InstanceLoaderError::Table(TableError::RowCountMismatch {
                num_rows: 2,
                num_variables: 3
            }))
        ));

        let relaxed = InstanceLoader::new()
            .enforce_row_count(false)
            .from_str(data)
            .expect("relaxed loader accepts M != N");
        assert_eq!(relaxed.num_rows(), 2);
        assert_eq!(relaxed.value(&[false, false, false]), 2.0);
    }

    #[test]
    fn test_unsupported_arity() {
        assert!(matches!(
            InstanceLoader::new().from_str("2 10 1 2\n"),
            Err(InstanceLoaderError::Table(TableError::InvalidRowArity { row_arity: 1 }))
        ));
        assert!(matches!(
            InstanceLoader::new().from_str("2 10 64 2\n"),
            Err(InstanceLoaderError::Table(TableError::InvalidRowArity { row_arity: 64 }))
        ));
    }

    #[test]
    fn test_oversized_variable_count_is_rejected_without_allocating() {
        let data = "18446744073709551615 10 2 1\n0 1 1 2 3 4\n";
        assert!(matches!(
            InstanceLoader::new().from_str(data),
            Err(InstanceLoaderError::Table(TableError::RowCountMismatch {
                num_rows: 1,
                num_variables: usize::MAX
            }))
        ));

        let data = "1000000000 10 2 1000000000\n0 1 1 2 3 4\n";
        assert!(matches!(
            InstanceLoader::new().from_str(data),
            Err(InstanceLoaderError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_trailing_content_is_ignored() {
        let data = "2 10 2 2\n0 1 1 2 3 4\n1 0 1 2 3 4\nthis is not parsed\n";
        assert!(InstanceLoader::new().from_str(data).is_ok());
    }

    #[test]
    fn test_encode_then_decode_reproduces_table_exactly() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let num_variables = 12;
        let row_arity = 4;

        let mut builder =
            crate::table::FunctionTableBuilder::new(num_variables, 5_000, row_arity).unwrap();
        for _ in 0..num_variables {
            let vars: Vec<usize> = (0..row_arity)
                .map(|_| rng.random_range(0..num_variables))
                .collect();
            let values: Vec<f64> = (0..1 << row_arity)
                .map(|_| rng.random_range(-1.0e6..1.0e6) * rng.random_range(0.0..1.0e-3))
                .collect();
            builder.add_row(vars, values).unwrap();
        }
        let original = builder.build().unwrap();

        let decoded = InstanceLoader::new()
            .from_str(&encode_table(&original))
            .expect("encoded table must decode");

        assert_eq!(decoded.num_variables(), original.num_variables());
        assert_eq!(decoded.max_evaluations(), original.max_evaluations());
        for (a, b) in decoded.rows().iter().zip(original.rows()) {
            assert_eq!(a.variables(), b.variables());
            let a_bits: Vec<u64> = a.values().iter().map(|v| v.to_bits()).collect();
            let b_bits: Vec<u64> = b.values().iter().map(|v| v.to_bits()).collect();
            assert_eq!(a_bits, b_bits);
        }
        assert_eq!(decoded, original);
    }
}
