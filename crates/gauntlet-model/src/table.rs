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

//! Function tables: the in-memory form of one fitness instance.
//!
//! A `FunctionTable` is a sum of `Row`s. Every row names `K + 1` positions of
//! the candidate and carries a complete lookup table of `2^(K + 1)` values,
//! keyed by the bits at those positions read as a binary number with the first
//! listed position as the most significant bit. The value of a candidate is the
//! sum of the selected entry of every row, accumulated in row order.
//!
//! Tables are immutable once built. `FunctionTableBuilder` performs all
//! validation up front (dimensions, arity, value counts, index bounds, and
//! optionally `rows == num_variables`), so `FunctionTable::value` can index
//! without further checks.

use crate::index::{RowIndex, VariableIndex};
use smallvec::SmallVec;

/// The largest supported row arity (`K + 1`). A row of this arity carries
/// `2^30` values, far beyond any competition instance.
pub const MAX_ROW_ARITY: usize = 30;

/// The smallest supported row arity (`K + 1`); `K` must be positive.
pub const MIN_ROW_ARITY: usize = 2;

/// A violated structural invariant of a function table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The number of variables and the evaluation quota must both be positive.
    InvalidDimensions {
        num_variables: usize,
        max_evaluations: u64,
    },
    /// The declared row arity (`K + 1`) is outside `MIN_ROW_ARITY..=MAX_ROW_ARITY`.
    InvalidRowArity { row_arity: usize },
    /// A row lists the wrong number of variable positions.
    RowArity {
        row: RowIndex,
        expected: usize,
        found: usize,
    },
    /// A row carries the wrong number of lookup values.
    ValueCount {
        row: RowIndex,
        expected: usize,
        found: usize,
    },
    /// A row references a position outside the candidate.
    VariableOutOfRange {
        row: RowIndex,
        variable: usize,
        num_variables: usize,
    },
    /// The table has a different number of rows than variables.
    RowCountMismatch {
        num_rows: usize,
        num_variables: usize,
    },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions {
                num_variables,
                max_evaluations,
            } => write!(
                f,
                "number of variables ({}) and maximum evaluations ({}) must be positive",
                num_variables, max_evaluations
            ),
            Self::InvalidRowArity { row_arity } => write!(
                f,
                "row arity {} is outside the supported range {}..={}",
                row_arity, MIN_ROW_ARITY, MAX_ROW_ARITY
            ),
            Self::RowArity {
                row,
                expected,
                found,
            } => write!(
                f,
                "{} lists {} variables, expected {}",
                row, found, expected
            ),
            Self::ValueCount {
                row,
                expected,
                found,
            } => write!(f, "{} has {} values, expected {}", row, found, expected),
            Self::VariableOutOfRange {
                row,
                variable,
                num_variables,
            } => write!(
                f,
                "{} references variable {} but the candidate has {} variables",
                row, variable, num_variables
            ),
            Self::RowCountMismatch {
                num_rows,
                num_variables,
            } => write!(
                f,
                "table has {} rows but {} variables",
                num_rows, num_variables
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// One additive term of the fitness function.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    variables: SmallVec<[VariableIndex; 8]>,
    values: Vec<f64>,
}

impl Row {
    /// The candidate positions feeding this row, most significant first.
    #[inline]
    pub fn variables(&self) -> &[VariableIndex] {
        &self.variables
    }

    /// The complete lookup table of this row.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The number of candidate positions read by this row (`K + 1`).
    #[inline]
    pub fn arity(&self) -> usize {
        self.variables.len()
    }

    /// Builds the lookup key from the bits of `candidate` at this row's positions.
    #[inline(always)]
    pub fn lookup_key(&self, candidate: &[bool]) -> usize {
        self.variables
            .iter()
            .fold(0usize, |key, v| (key << 1) | usize::from(candidate[v.get()]))
    }

    /// Returns the contribution of this row to the value of `candidate`.
    #[inline(always)]
    pub fn value(&self, candidate: &[bool]) -> f64 {
        self.values[self.lookup_key(candidate)]
    }
}

/// An immutable, validated fitness function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTable {
    num_variables: usize,
    max_evaluations: u64,
    row_arity: usize,
    rows: Vec<Row>,
}

impl FunctionTable {
    /// Length of every candidate accepted by this table.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// The per-instance evaluation quota declared by the instance.
    #[inline]
    pub fn max_evaluations(&self) -> u64 {
        self.max_evaluations
    }

    /// `K`: every row reads `K + 1` positions.
    #[inline]
    pub fn subset_arity(&self) -> usize {
        self.row_arity - 1
    }

    /// `K + 1`: the number of positions read by every row.
    #[inline]
    pub fn row_arity(&self) -> usize {
        self.row_arity
    }

    /// The number of rows (additive terms).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the row at `row_index`.
    ///
    /// # Panics
    ///
    /// Panics if `row_index` is out of bounds.
    #[inline]
    pub fn row(&self, row_index: RowIndex) -> &Row {
        let index = row_index.get();
        debug_assert!(
            index < self.rows.len(),
            "called `FunctionTable::row` with row index out of bounds: the len is {} but the index is {}",
            self.rows.len(),
            index
        );

        &self.rows[index]
    }

    /// Sums the row contributions for `candidate`, in row order.
    ///
    /// # Panics
    ///
    /// Panics if `candidate.len() != self.num_variables()`.
    pub fn value(&self, candidate: &[bool]) -> f64 {
        assert_eq!(
            candidate.len(),
            self.num_variables,
            "called `FunctionTable::value` with a candidate of length {} but the table has {} variables",
            candidate.len(),
            self.num_variables
        );

        self.rows
            .iter()
            .fold(0.0, |total, row| total + row.value(candidate))
    }
}

impl std::fmt::Display for FunctionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FunctionTable(num_variables: {}, max_evaluations: {}, K: {}, rows: {})",
            self.num_variables,
            self.max_evaluations,
            self.subset_arity(),
            self.rows.len()
        )
    }
}

/// Collects and validates rows before freezing them into a `FunctionTable`.
///
/// By default `build` insists on exactly one row per variable, which is what
/// every published instance satisfies. `enforce_row_count(false)` accepts any
/// positive row count; the resulting table then sums all of its rows.
///
/// # Examples
///
/// ```rust
/// use gauntlet_model::table::FunctionTableBuilder;
///
/// let mut builder = FunctionTableBuilder::new(2, 10, 2).unwrap();
/// builder.add_row([0, 1], vec![0.0, 1.0, 2.0, 3.0]).unwrap();
/// builder.add_row([1, 0], vec![0.5, 0.5, 0.5, 0.5]).unwrap();
/// let table = builder.build().unwrap();
///
/// // Row 0 reads bits (x0, x1) = (true, false) -> key 0b10 = 2.
/// assert_eq!(table.value(&[true, false]), 2.0 + 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct FunctionTableBuilder {
    num_variables: usize,
    max_evaluations: u64,
    row_arity: usize,
    enforce_row_count: bool,
    rows: Vec<Row>,
}

impl FunctionTableBuilder {
    /// Starts a table over `num_variables` bits whose rows read `row_arity` (`K + 1`) bits each.
    pub fn new(
        num_variables: usize,
        max_evaluations: u64,
        row_arity: usize,
    ) -> Result<Self, TableError> {
        if num_variables == 0 || max_evaluations == 0 {
            return Err(TableError::InvalidDimensions {
                num_variables,
                max_evaluations,
            });
        }
        if !(MIN_ROW_ARITY..=MAX_ROW_ARITY).contains(&row_arity) {
            return Err(TableError::InvalidRowArity { row_arity });
        }

        Ok(Self {
            num_variables,
            max_evaluations,
            row_arity,
            enforce_row_count: true,
            rows: Vec::new(),
        })
    }

    /// Configures whether `build` requires exactly one row per variable.
    #[inline]
    pub fn enforce_row_count(mut self, yes: bool) -> Self {
        self.enforce_row_count = yes;
        self
    }

    /// The number of lookup values every row must carry (`2^(K + 1)`).
    #[inline]
    pub fn values_per_row(&self) -> usize {
        1usize << self.row_arity
    }

    /// The number of rows added so far.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Appends a row and returns its index.
    pub fn add_row<I>(&mut self, variables: I, values: Vec<f64>) -> Result<RowIndex, TableError>
    where
        I: IntoIterator<Item = usize>,
    {
        let row = RowIndex::new(self.rows.len());

        let variables: SmallVec<[VariableIndex; 8]> =
            variables.into_iter().map(VariableIndex::new).collect();
        if variables.len() != self.row_arity {
            return Err(TableError::RowArity {
                row,
                expected: self.row_arity,
                found: variables.len(),
            });
        }
        if let Some(bad) = variables.iter().find(|v| !v.is_within(self.num_variables)) {
            return Err(TableError::VariableOutOfRange {
                row,
                variable: bad.get(),
                num_variables: self.num_variables,
            });
        }

        let expected = self.values_per_row();
        if values.len() != expected {
            return Err(TableError::ValueCount {
                row,
                expected,
                found: values.len(),
            });
        }

        self.rows.push(Row { variables, values });
        Ok(row)
    }

    /// Freezes the rows into a `FunctionTable`.
    pub fn build(self) -> Result<FunctionTable, TableError> {
        let row_count_ok = if self.enforce_row_count {
            self.rows.len() == self.num_variables
        } else {
            !self.rows.is_empty()
        };
        if !row_count_ok {
            return Err(TableError::RowCountMismatch {
                num_rows: self.rows.len(),
                num_variables: self.num_variables,
            });
        }

        Ok(FunctionTable {
            num_variables: self.num_variables,
            max_evaluations: self.max_evaluations,
            row_arity: self.row_arity,
            rows: self.rows,
        })
    }
}
