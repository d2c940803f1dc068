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

//! Text encoder for function tables, the inverse of `loading::InstanceLoader`.
//!
//! Values are written with Rust's shortest round-trip float formatting, so
//! decoding an encoded table reproduces every value bit for bit.

use crate::table::FunctionTable;
use std::fmt;
use std::io::Write;

/// Displays a table in the instance text format.
///
/// The header is `num_variables max_evaluations K+1 row_count`, followed by
/// one line per row holding its `K + 1` variable positions and then its
/// `2^(K + 1)` values.
#[derive(Debug, Clone, Copy)]
pub struct InstanceText<'a>(pub &'a FunctionTable);

impl fmt::Display for InstanceText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.0;
        writeln!(
            f,
            "{} {} {} {}",
            table.num_variables(),
            table.max_evaluations(),
            table.row_arity(),
            table.num_rows()
        )?;

        for row in table.rows() {
            let mut first = true;
            for v in row.variables() {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{}", v.get())?;
                first = false;
            }
            for value in row.values() {
                write!(f, " {}", value)?;
            }
            f.write_str("\n")?;
        }

        Ok(())
    }
}

/// Writes `table` in the instance text format.
#[inline]
pub fn write_table<W: Write>(table: &FunctionTable, mut writer: W) -> std::io::Result<()> {
    write!(writer, "{}", InstanceText(table))
}

/// Encodes `table` into a `String` in the instance text format.
#[inline]
pub fn encode_table(table: &FunctionTable) -> String {
    InstanceText(table).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FunctionTableBuilder;

    #[test]
    fn test_encodes_header_and_rows() {
        let mut b = FunctionTableBuilder::new(2, 50, 2).unwrap();
        b.add_row([0, 1], vec![0.0, 0.25, -1.5, 3.0]).unwrap();
        b.add_row([1, 0], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let table = b.build().unwrap();

        let text = encode_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["2 50 2 2", "0 1 0 0.25 -1.5 3", "1 0 1 2 3 4"]);
    }

    #[test]
    fn test_write_table_matches_encoded_text() {
        let mut b = FunctionTableBuilder::new(2, 7, 2).unwrap();
        b.add_row([1, 0], vec![0.5, 1.0, 1.5, 2.0]).unwrap();
        b.add_row([0, 1], vec![-0.125, 0.0, 8.0, 1e-3]).unwrap();
        let table = b.build().unwrap();

        let mut buf = Vec::new();
        write_table(&table, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), encode_table(&table));
        assert_eq!(InstanceText(&table).to_string(), encode_table(&table));
    }
}
