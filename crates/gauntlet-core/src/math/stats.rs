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

//! Descriptive statistics over float slices.
//!
//! The variance is the bias-corrected sample variance (denominator `n - 1`),
//! so a single observation has variance `0` and an empty slice has none.

use num_traits::Float;

/// Returns the arithmetic mean of `values`, or `None` if the slice is empty.
#[inline]
pub fn mean<F>(values: &[F]) -> Option<F>
where
    F: Float,
{
    if values.is_empty() {
        return None;
    }
    let sum = values.iter().fold(F::zero(), |acc, &v| acc + v);
    F::from(values.len()).map(|n| sum / n)
}

/// Returns the sample variance of `values`, or `None` if the slice is empty.
pub fn sample_variance<F>(values: &[F]) -> Option<F>
where
    F: Float,
{
    let m = mean(values)?;
    if values.len() < 2 {
        return Some(F::zero());
    }

    let squared = values.iter().fold(F::zero(), |acc, &v| {
        let d = v - m;
        acc + d * d
    });
    F::from(values.len() - 1).map(|denominator| squared / denominator)
}

/// Returns the sample standard deviation of `values`, or `None` if the slice is empty.
#[inline]
pub fn sample_std_dev<F>(values: &[F]) -> Option<F>
where
    F: Float,
{
    sample_variance(values).map(Float::sqrt)
}
